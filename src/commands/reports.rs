// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{bills, expenses, income};
use crate::engine::balance::{summarize, ASSUMED_DEDUCTION_RATE};
use crate::engine::series::running_total;
use crate::utils::{maybe_print_json, pretty_table, today};
use anyhow::Result;
use chrono::Duration;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub)?,
        Some(("trend", sub)) => trend(conn, sub)?,
        Some(("deductibles", sub)) => deductibles(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let incomes = income::all_income(conn)?;
    let all_bills = bills::all_bills(conn)?;
    let all_expenses = expenses::all_expenses(conn)?;
    let s = summarize(&incomes, &all_bills, &all_expenses);

    if !maybe_print_json(json_flag, jsonl_flag, &s)? {
        let rows = vec![
            vec!["Gross income (net of tax)".into(), format!("{:.2}", s.gross)],
            vec!["Tax reserve".into(), format!("{:.2}", s.tax_reserve)],
            vec!["Committed bills".into(), format!("{:.2}", s.bills_total)],
            vec!["Real balance".into(), format!("{:.2}", s.real_balance)],
            vec![
                "Deductible expenses".into(),
                format!("{:.2}", s.deductible_total),
            ],
            vec![
                "Estimated tax saving".into(),
                format!("{:.2}", s.estimated_tax_saving),
            ],
        ];
        println!("{}", pretty_table(&["Aggregate", "Amount"], rows));
    }
    Ok(())
}

#[derive(Serialize)]
struct TrendPoint {
    date: String,
    running_net: String,
}

fn trend(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let days: usize = *sub.get_one::<usize>("days").unwrap_or(&30);

    let events: Vec<_> = income::all_income(conn)?
        .iter()
        .map(|e| (e.event_date, e.net_amount))
        .collect();
    let now = today();
    let series = running_total(&events, now, days);
    let start = now - Duration::days(days as i64 - 1);

    let data: Vec<TrendPoint> = series
        .iter()
        .enumerate()
        .map(|(i, v)| TrendPoint {
            date: (start + Duration::days(i as i64)).to_string(),
            running_net: format!("{:.2}", v),
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|p| vec![p.date.clone(), p.running_net.clone()])
            .collect();
        println!("{}", pretty_table(&["Date", "Running Net"], rows));
    }
    Ok(())
}

fn deductibles(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let deductible: Vec<_> = expenses::all_expenses(conn)?
        .into_iter()
        .filter(|e| e.is_deductible == Some(true))
        .collect();
    let s = summarize(&[], &[], &deductible);

    if !maybe_print_json(json_flag, jsonl_flag, &deductible)? {
        let mut rows: Vec<Vec<String>> = deductible
            .iter()
            .map(|e| {
                vec![
                    e.expense_date.to_string(),
                    e.description.clone(),
                    e.category.map(|c| c.as_str().to_string()).unwrap_or_default(),
                    format!("{:.2}", e.amount),
                ]
            })
            .collect();
        rows.push(vec![
            "".into(),
            "Total".into(),
            "".into(),
            format!("{:.2}", s.deductible_total),
        ]);
        rows.push(vec![
            "".into(),
            format!("Estimated saving @ {}", ASSUMED_DEDUCTION_RATE),
            "".into(),
            format!("{:.2}", s.estimated_tax_saving),
        ]);
        println!(
            "{}",
            pretty_table(&["Date", "Description", "Category", "Amount"], rows)
        );
    }
    Ok(())
}
