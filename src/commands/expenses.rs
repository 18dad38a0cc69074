// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ai::{
    categorize_with_fallback, CategorizationPolicy, CategorizeRequest, HttpCategorizer,
    RuleCategorizer,
};
use crate::engine::money;
use crate::error::Error;
use crate::models::{Expense, ExpenseCategory};
use crate::utils::{
    get_profile, get_setting, http_client, maybe_print_json, parse_bool, parse_date,
    parse_decimal, pretty_table, today,
};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("review", sub)) => review_cmd(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let desc = sub.get_one::<String>("desc").unwrap();
    let no_ai = sub.get_flag("no-ai");

    let endpoint = get_setting(conn, "ai_categorize_endpoint")?;
    let policy: Box<dyn CategorizationPolicy> = match endpoint {
        Some(url) if !no_ai => Box::new(HttpCategorizer::new(http_client()?, url)),
        _ => Box::new(RuleCategorizer),
    };
    let currency = get_profile(conn)?.currency;
    let exp = add_expense(conn, desc, amount, date, today(), &currency, policy.as_ref())?;
    println!(
        "Recorded expense #{} '{}' ({:.2}) -> {} (confidence {:.2}{})",
        exp.id,
        exp.description,
        exp.amount,
        exp.category.map(|c| c.as_str()).unwrap_or("uncategorized"),
        exp.ai_confidence.unwrap_or(0.0),
        if exp.is_deductible == Some(true) {
            ", deductible"
        } else {
            ""
        }
    );
    Ok(())
}

/// Record an expense, then enrich it with a categorization. The insert comes
/// first so a dead collaborator can never lose the record; enrichment is a
/// second write with whatever the policy (or the fallback) produced.
pub fn add_expense(
    conn: &Connection,
    description: &str,
    amount: Decimal,
    expense_date: NaiveDate,
    today: NaiveDate,
    currency: &str,
    policy: &dyn CategorizationPolicy,
) -> Result<Expense> {
    let amount = money::validate_amount(amount)?;
    money::validate_event_date(expense_date, today)?;

    conn.execute(
        "INSERT INTO expenses(description, amount, expense_date) VALUES (?1, ?2, ?3)",
        params![description, amount.to_string(), expense_date.to_string()],
    )?;
    let id = conn.last_insert_rowid();

    let req = CategorizeRequest {
        description: description.to_string(),
        amount,
        currency: currency.to_string(),
    };
    let cat = categorize_with_fallback(policy, &req);
    conn.execute(
        "UPDATE expenses SET category=?1, ai_confidence=?2, is_deductible=?3 WHERE id=?4",
        params![
            cat.category.as_str(),
            cat.confidence,
            cat.is_deductible,
            id
        ],
    )?;
    get_expense(conn, id)
}

/// Reviewing is one-way: this sets reviewed=1 and there is no write path back
/// to 0. The user may override the category and deductibility while at it.
pub fn review(
    conn: &Connection,
    id: i64,
    category: Option<ExpenseCategory>,
    is_deductible: Option<bool>,
) -> Result<Expense> {
    // Errors out before any write if the id is unknown
    get_expense(conn, id)?;
    if let Some(cat) = category {
        conn.execute(
            "UPDATE expenses SET category=?1 WHERE id=?2",
            params![cat.as_str(), id],
        )?;
    }
    if let Some(ded) = is_deductible {
        conn.execute(
            "UPDATE expenses SET is_deductible=?1 WHERE id=?2",
            params![ded, id],
        )?;
    }
    conn.execute("UPDATE expenses SET reviewed=1 WHERE id=?1", params![id])?;
    get_expense(conn, id)
}

pub fn get_expense(conn: &Connection, id: i64) -> Result<Expense> {
    let mut stmt = conn.prepare(
        "SELECT id, description, amount, expense_date, category, ai_confidence, is_deductible, reviewed, created_at
         FROM expenses WHERE id=?1",
    )?;
    let row = stmt
        .query_row(params![id], |r| {
            Ok((
                r.get::<_, i64>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, String>(2)?,
                r.get::<_, String>(3)?,
                r.get::<_, Option<String>>(4)?,
                r.get::<_, Option<f64>>(5)?,
                r.get::<_, Option<bool>>(6)?,
                r.get::<_, bool>(7)?,
                r.get::<_, String>(8)?,
            ))
        })
        .with_context(|| format!("Expense #{} not found", id))?;
    let (id, description, amount_s, date_s, cat_s, conf, ded, reviewed, created_at) = row;
    Ok(Expense {
        id,
        description,
        amount: parse_decimal(&amount_s)?,
        expense_date: parse_date(&date_s)?,
        category: cat_s
            .map(|s| s.parse::<ExpenseCategory>())
            .transpose()
            .map_err(Error::Validation)?,
        ai_confidence: conf,
        is_deductible: ded,
        reviewed,
        created_at,
    })
}

pub fn all_expenses(conn: &Connection) -> Result<Vec<Expense>> {
    let mut stmt =
        conn.prepare("SELECT id FROM expenses ORDER BY created_at DESC, id DESC")?;
    let ids = stmt.query_map([], |r| r.get::<_, i64>(0))?;
    let mut out = Vec::new();
    for id in ids {
        out.push(get_expense(conn, id?)?);
    }
    Ok(out)
}

fn review_cmd(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let category = sub
        .get_one::<String>("category")
        .map(|s| s.parse::<ExpenseCategory>())
        .transpose()
        .map_err(Error::Validation)?;
    let deductible = sub
        .get_one::<String>("deductible")
        .map(|s| parse_bool(s))
        .transpose()?;
    let exp = review(conn, id, category, deductible)?;
    println!(
        "Expense #{} reviewed ({}, {})",
        exp.id,
        exp.category.map(|c| c.as_str()).unwrap_or("uncategorized"),
        if exp.is_deductible == Some(true) {
            "deductible"
        } else {
            "not deductible"
        }
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let unreviewed_only = sub.get_flag("unreviewed");

    let data: Vec<Expense> = all_expenses(conn)?
        .into_iter()
        .filter(|e| !unreviewed_only || !e.reviewed)
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|e| {
                vec![
                    e.id.to_string(),
                    e.expense_date.to_string(),
                    e.description.clone(),
                    format!("{:.2}", e.amount),
                    e.category.map(|c| c.as_str().to_string()).unwrap_or_default(),
                    e.ai_confidence
                        .map(|c| format!("{:.2}", c))
                        .unwrap_or_default(),
                    match e.is_deductible {
                        Some(true) => "yes".into(),
                        Some(false) => "no".into(),
                        None => String::new(),
                    },
                    if e.reviewed { "yes".into() } else { "no".into() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "ID", "Date", "Description", "Amount", "Category", "Conf", "Deductible",
                    "Reviewed"
                ],
                rows,
            )
        );
    }
    Ok(())
}
