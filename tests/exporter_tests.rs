// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::Utc;
use rusqlite::Connection;
use tempfile::tempdir;
use vaultflow::ai::RuleCategorizer;
use vaultflow::commands::{exporter, expenses, income};
use vaultflow::{cli, db};

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

#[test]
fn export_income_writes_frozen_derivations_as_csv() {
    let conn = setup();
    let today = Utc::now().date_naive();
    income::add_income(
        &conn,
        "80000".parse().unwrap(),
        "30".parse().unwrap(),
        today,
        today,
        Some("Acme Corp".into()),
        Some("Retainer".into()),
    )
    .unwrap();

    let dir = tempdir().unwrap();
    let out_path = dir.path().join("income.csv");
    let out_str = out_path.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches =
        cli.get_matches_from(["vaultflow", "export", "--income", "--out", &out_str]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(&conn, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(
        lines.next().unwrap(),
        "event_date,client,amount,tax_rate,tax_slice,net_amount,description"
    );
    let row = lines.next().unwrap();
    assert!(row.contains("Acme Corp"));
    assert!(row.contains("24000"));
    assert!(row.contains("56000"));
}

#[test]
fn export_expenses_includes_categorization_columns() {
    let conn = setup();
    let today = Utc::now().date_naive();
    expenses::add_expense(
        &conn,
        "Figma subscription",
        "1500".parse().unwrap(),
        today,
        today,
        "INR",
        &RuleCategorizer,
    )
    .unwrap();

    let dir = tempdir().unwrap();
    let out_path = dir.path().join("expenses.csv");
    let out_str = out_path.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches =
        cli.get_matches_from(["vaultflow", "export", "--expenses", "--out", &out_str]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(&conn, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(
        lines.next().unwrap(),
        "expense_date,description,amount,category,confidence,deductible,reviewed"
    );
    let row = lines.next().unwrap();
    assert!(row.contains("Figma subscription"));
    assert!(row.contains("Software"));
    assert!(row.contains("true"));
}
