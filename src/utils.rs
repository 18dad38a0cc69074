// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

use crate::models::UserProfile;

const UA: &str = concat!(
    "vaultflow/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/vaultflow)"
);

pub fn http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn parse_bool(s: &str) -> Result<bool> {
    match s.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(anyhow::anyhow!("Invalid boolean '{}'", s)),
    }
}

pub fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

#[allow(dead_code)]
pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{} {:.2}", ccy, d)
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

// Key/value settings. These return the core taxonomy so a failed read or
// write is reported as a persistence failure, not wrapped further.

pub fn get_setting(conn: &Connection, key: &str) -> crate::error::Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> crate::error::Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

/// The profile is a singleton row seeded by the schema; reads never fail on a
/// fresh database.
pub fn get_profile(conn: &Connection) -> Result<UserProfile> {
    let (rate_s, gst, ccy): (String, bool, String) = conn
        .query_row(
            "SELECT tax_rate, gst_enabled, currency FROM profile WHERE id=1",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )
        .context("Profile row missing; run `vaultflow init`")?;
    let tax_rate = rate_s
        .parse::<Decimal>()
        .with_context(|| format!("Invalid stored tax rate '{}'", rate_s))?;
    Ok(UserProfile {
        tax_rate,
        gst_enabled: gst,
        currency: ccy,
    })
}

/// Next invoice reference for the given year: `VF-<year>-<3-digit seq>`.
/// The per-year counter lives in settings and only ever moves forward, so
/// references are never reused or renumbered even if invoices go away.
pub fn next_invoice_ref(conn: &Connection, year: i32) -> Result<String> {
    let key = format!("invoice_seq_{}", year);
    let seq: u32 = get_setting(conn, &key)?
        .map(|s| s.parse::<u32>())
        .transpose()
        .with_context(|| format!("Invalid invoice sequence for {}", year))?
        .unwrap_or(0)
        + 1;
    set_setting(conn, &key, &seq.to_string())?;
    Ok(format!("VF-{}-{:03}", year, seq))
}
