// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "VaultFlow", "vaultflow"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("vaultflow.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    -- Singleton profile row; a local database is one user's by construction.
    CREATE TABLE IF NOT EXISTS profile(
        id INTEGER PRIMARY KEY CHECK(id = 1),
        tax_rate TEXT NOT NULL DEFAULT '30',
        gst_enabled INTEGER NOT NULL DEFAULT 0,
        currency TEXT NOT NULL DEFAULT 'INR'
    );
    INSERT OR IGNORE INTO profile(id) VALUES(1);

    -- Derived tax figures are frozen at insert time and never updated.
    CREATE TABLE IF NOT EXISTS income_events(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        amount TEXT NOT NULL,
        tax_rate TEXT NOT NULL,
        tax_slice TEXT NOT NULL,
        net_amount TEXT NOT NULL,
        event_date TEXT NOT NULL,
        client_name TEXT,
        description TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_income_events_date ON income_events(event_date);

    CREATE TABLE IF NOT EXISTS invoices(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        client_name TEXT NOT NULL,
        amount TEXT NOT NULL,
        currency TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'DRAFT'
            CHECK(status IN ('DRAFT','SENT','OVERDUE','PAID')),
        due_date TEXT NOT NULL,
        paid_date TEXT,
        invoice_ref TEXT NOT NULL UNIQUE,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_invoices_due ON invoices(due_date);

    CREATE TABLE IF NOT EXISTS expenses(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        description TEXT NOT NULL,
        amount TEXT NOT NULL,
        expense_date TEXT NOT NULL,
        category TEXT,
        ai_confidence REAL,
        is_deductible INTEGER,
        reviewed INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(expense_date);

    -- Bills are soft-deleted (active=0) so historical summaries stay
    -- reconstructable.
    CREATE TABLE IF NOT EXISTS committed_bills(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        amount TEXT NOT NULL,
        frequency TEXT NOT NULL
            CHECK(frequency IN ('WEEKLY','MONTHLY','QUARTERLY','YEARLY')),
        next_due TEXT NOT NULL,
        active INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    )?;
    Ok(())
}
