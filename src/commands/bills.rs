// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::money;
use crate::error::Error;
use crate::models::{BillFrequency, CommittedBill};
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
            let frequency = sub
                .get_one::<String>("frequency")
                .unwrap()
                .parse::<BillFrequency>()
                .map_err(Error::Validation)?;
            let next_due = parse_date(sub.get_one::<String>("next-due").unwrap())?;
            let bill = add_bill(conn, name, amount, frequency, next_due)?;
            println!(
                "Added bill '{}' ({:.2} {}, next due {})",
                bill.name,
                bill.amount,
                bill.frequency.as_str(),
                bill.next_due
            );
        }
        Some(("deactivate", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            deactivate(conn, id)?;
            println!("Bill #{} deactivated", id);
        }
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn add_bill(
    conn: &Connection,
    name: &str,
    amount: Decimal,
    frequency: BillFrequency,
    next_due: NaiveDate,
) -> Result<CommittedBill> {
    let amount = money::validate_amount(amount)?;
    conn.execute(
        "INSERT INTO committed_bills(name, amount, frequency, next_due) VALUES (?1, ?2, ?3, ?4)",
        params![
            name,
            amount.to_string(),
            frequency.as_str(),
            next_due.to_string()
        ],
    )?;
    get_bill(conn, conn.last_insert_rowid())
}

/// Soft delete: summaries stop counting the bill but the row stays.
pub fn deactivate(conn: &Connection, id: i64) -> Result<()> {
    let n = conn.execute(
        "UPDATE committed_bills SET active=0 WHERE id=?1",
        params![id],
    )?;
    if n == 0 {
        return Err(anyhow::anyhow!("Bill #{} not found", id));
    }
    Ok(())
}

pub fn get_bill(conn: &Connection, id: i64) -> Result<CommittedBill> {
    let mut stmt = conn.prepare(
        "SELECT id, name, amount, frequency, next_due, active, created_at
         FROM committed_bills WHERE id=?1",
    )?;
    let row = stmt
        .query_row(params![id], |r| {
            Ok((
                r.get::<_, i64>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, String>(2)?,
                r.get::<_, String>(3)?,
                r.get::<_, String>(4)?,
                r.get::<_, bool>(5)?,
                r.get::<_, String>(6)?,
            ))
        })
        .with_context(|| format!("Bill #{} not found", id))?;
    let (id, name, amount_s, freq_s, due_s, active, created_at) = row;
    Ok(CommittedBill {
        id,
        name,
        amount: parse_decimal(&amount_s)?,
        frequency: freq_s.parse().map_err(Error::Validation)?,
        next_due: parse_date(&due_s)?,
        active,
        created_at,
    })
}

pub fn all_bills(conn: &Connection) -> Result<Vec<CommittedBill>> {
    let mut stmt =
        conn.prepare("SELECT id FROM committed_bills ORDER BY created_at DESC, id DESC")?;
    let ids = stmt.query_map([], |r| r.get::<_, i64>(0))?;
    let mut out = Vec::new();
    for id in ids {
        out.push(get_bill(conn, id?)?);
    }
    Ok(out)
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let include_all = sub.get_flag("all");

    let data: Vec<CommittedBill> = all_bills(conn)?
        .into_iter()
        .filter(|b| include_all || b.active)
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|b| {
                vec![
                    b.id.to_string(),
                    b.name.clone(),
                    format!("{:.2}", b.amount),
                    b.frequency.as_str().to_string(),
                    b.next_due.to_string(),
                    if b.active { "yes".into() } else { "no".into() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Name", "Amount", "Frequency", "Next Due", "Active"], rows)
        );
    }
    Ok(())
}
