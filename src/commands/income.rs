// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::{money, tax};
use crate::models::IncomeEvent;
use crate::utils::{get_profile, maybe_print_json, parse_date, parse_decimal, pretty_table, today};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let client = sub.get_one::<String>("client").map(|s| s.to_string());
    let note = sub.get_one::<String>("note").map(|s| s.to_string());
    let rate = match sub.get_one::<String>("rate") {
        Some(r) => parse_decimal(r)?,
        None => get_profile(conn)?.tax_rate,
    };

    let ev = add_income(conn, amount, rate, date, today(), client, note)?;
    println!(
        "Recorded income {} on {} (tax slice {}, net {})",
        ev.amount, ev.event_date, ev.tax_slice, ev.net_amount
    );
    Ok(())
}

/// Validate and insert a single income event. The slice and net amount are
/// computed here, once, and stored; nothing ever recomputes them.
pub fn add_income(
    conn: &Connection,
    amount: Decimal,
    rate: Decimal,
    event_date: NaiveDate,
    today: NaiveDate,
    client_name: Option<String>,
    description: Option<String>,
) -> Result<IncomeEvent> {
    let amount = money::validate_amount(amount)?;
    money::validate_event_date(event_date, today)?;
    let slice = tax::tax_slice(amount, rate)?;
    let net = tax::net_amount(amount, rate)?;

    conn.execute(
        "INSERT INTO income_events(amount, tax_rate, tax_slice, net_amount, event_date, client_name, description)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            amount.to_string(),
            rate.to_string(),
            slice.to_string(),
            net.to_string(),
            event_date.to_string(),
            client_name,
            description
        ],
    )?;
    let id = conn.last_insert_rowid();
    let created_at: String = conn.query_row(
        "SELECT created_at FROM income_events WHERE id=?1",
        params![id],
        |r| r.get(0),
    )?;
    Ok(IncomeEvent {
        id,
        amount,
        tax_rate: rate,
        tax_slice: slice,
        net_amount: net,
        event_date,
        client_name,
        description,
        created_at,
    })
}

pub fn all_income(conn: &Connection) -> Result<Vec<IncomeEvent>> {
    let mut stmt = conn.prepare(
        "SELECT id, amount, tax_rate, tax_slice, net_amount, event_date, client_name, description, created_at
         FROM income_events ORDER BY created_at DESC, id DESC",
    )?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        out.push(row_to_event(r)?);
    }
    Ok(out)
}

fn row_to_event(r: &rusqlite::Row<'_>) -> Result<IncomeEvent> {
    let amount_s: String = r.get(1)?;
    let rate_s: String = r.get(2)?;
    let slice_s: String = r.get(3)?;
    let net_s: String = r.get(4)?;
    let date_s: String = r.get(5)?;
    Ok(IncomeEvent {
        id: r.get(0)?,
        amount: parse_decimal(&amount_s)?,
        tax_rate: parse_decimal(&rate_s)?,
        tax_slice: parse_decimal(&slice_s)?,
        net_amount: parse_decimal(&net_s)?,
        event_date: parse_date(&date_s)?,
        client_name: r.get(6)?,
        description: r.get(7)?,
        created_at: r.get(8)?,
    })
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let mut data = all_income(conn)?;
    if let Some(limit) = sub.get_one::<usize>("limit") {
        data.truncate(*limit);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|e| {
                vec![
                    e.event_date.to_string(),
                    e.client_name.clone().unwrap_or_default(),
                    format!("{:.2}", e.amount),
                    format!("{}%", e.tax_rate),
                    format!("{:.2}", e.tax_slice),
                    format!("{:.2}", e.net_amount),
                    e.description.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Client", "Amount", "Rate", "Tax Slice", "Net", "Note"],
                rows,
            )
        );
    }
    Ok(())
}
