// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ai::{draft_followup, FollowupRequest};
use crate::commands::income::add_income;
use crate::engine::aging::{age_days, can_transition, display_tier};
use crate::engine::money;
use crate::error::Error;
use crate::models::{IncomeEvent, Invoice, InvoiceStatus};
use crate::utils::{
    get_profile, get_setting, http_client, maybe_print_json, next_invoice_ref, parse_date,
    parse_decimal, pretty_table, today,
};
use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("create", sub)) => create(conn, sub)?,
        Some(("send", sub)) => {
            let inv = transition(conn, ref_arg(sub), InvoiceStatus::Sent)?;
            println!("Invoice {} marked SENT", inv.invoice_ref);
        }
        Some(("mark-overdue", sub)) => {
            let inv = transition(conn, ref_arg(sub), InvoiceStatus::Overdue)?;
            println!("Invoice {} marked OVERDUE", inv.invoice_ref);
        }
        Some(("mark-paid", sub)) => {
            let paid_date = match sub.get_one::<String>("date") {
                Some(d) => parse_date(d)?,
                None => today(),
            };
            let (inv, ev) = mark_paid(conn, ref_arg(sub), paid_date)?;
            println!(
                "Invoice {} marked PAID on {}; income event recorded (net {}, tax slice {})",
                inv.invoice_ref, paid_date, ev.net_amount, ev.tax_slice
            );
        }
        Some(("list", sub)) => list(conn, sub)?,
        Some(("followup", sub)) => followup(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn ref_arg(sub: &clap::ArgMatches) -> &str {
    sub.get_one::<String>("ref").unwrap()
}

fn create(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let client = sub.get_one::<String>("client").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let due = parse_date(sub.get_one::<String>("due").unwrap())?;
    let currency = match sub.get_one::<String>("currency") {
        Some(c) => c.to_uppercase(),
        None => get_profile(conn)?.currency,
    };
    let inv = create_invoice(conn, client, amount, &currency, due, today())?;
    println!(
        "Created invoice {} for '{}' ({} {:.2}, due {})",
        inv.invoice_ref, inv.client_name, inv.currency, inv.amount, inv.due_date
    );
    Ok(())
}

pub fn create_invoice(
    conn: &Connection,
    client_name: &str,
    amount: Decimal,
    currency: &str,
    due_date: NaiveDate,
    today: NaiveDate,
) -> Result<Invoice> {
    let amount = money::validate_amount(amount)?;
    let invoice_ref = next_invoice_ref(conn, today.year())?;
    conn.execute(
        "INSERT INTO invoices(client_name, amount, currency, status, due_date, invoice_ref)
         VALUES (?1, ?2, ?3, 'DRAFT', ?4, ?5)",
        params![
            client_name,
            amount.to_string(),
            currency,
            due_date.to_string(),
            invoice_ref
        ],
    )?;
    get_invoice(conn, &invoice_ref)
}

pub fn get_invoice(conn: &Connection, invoice_ref: &str) -> Result<Invoice> {
    let mut stmt = conn.prepare(
        "SELECT id, client_name, amount, currency, status, due_date, paid_date, invoice_ref, created_at
         FROM invoices WHERE invoice_ref=?1",
    )?;
    let inv = stmt
        .query_row(params![invoice_ref], |r| {
            Ok((
                r.get::<_, i64>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, String>(2)?,
                r.get::<_, String>(3)?,
                r.get::<_, String>(4)?,
                r.get::<_, String>(5)?,
                r.get::<_, Option<String>>(6)?,
                r.get::<_, String>(7)?,
                r.get::<_, String>(8)?,
            ))
        })
        .with_context(|| format!("Invoice '{}' not found", invoice_ref))?;
    let (id, client_name, amount_s, currency, status_s, due_s, paid_s, iref, created_at) = inv;
    Ok(Invoice {
        id,
        client_name,
        amount: parse_decimal(&amount_s)?,
        currency,
        status: status_s.parse().map_err(Error::Validation)?,
        due_date: parse_date(&due_s)?,
        paid_date: paid_s.as_deref().map(parse_date).transpose()?,
        invoice_ref: iref,
        created_at,
    })
}

/// Explicit lifecycle transition for SENT and OVERDUE. The due date passing
/// never calls this; stored status only moves when the user says so.
pub fn transition(conn: &Connection, invoice_ref: &str, to: InvoiceStatus) -> Result<Invoice> {
    let inv = get_invoice(conn, invoice_ref)?;
    if !can_transition(inv.status, to) {
        return Err(Error::validation(format!(
            "Invoice {} cannot move {} -> {}",
            invoice_ref, inv.status, to
        ))
        .into());
    }
    conn.execute(
        "UPDATE invoices SET status=?1 WHERE id=?2",
        params![to.as_str(), inv.id],
    )?;
    get_invoice(conn, invoice_ref)
}

/// Settle an invoice. Status update and income-event creation are one SQLite
/// transaction: if recognizing the income fails, the invoice must not read as
/// PAID, so the whole unit rolls back and the caller sees an atomicity error.
/// The income event uses the profile's current default rate, not any
/// per-invoice override.
pub fn mark_paid(
    conn: &mut Connection,
    invoice_ref: &str,
    paid_date: NaiveDate,
) -> Result<(Invoice, IncomeEvent)> {
    let inv = get_invoice(conn, invoice_ref)?;
    if !can_transition(inv.status, InvoiceStatus::Paid) {
        return Err(Error::validation(format!(
            "Invoice {} cannot move {} -> PAID",
            invoice_ref, inv.status
        ))
        .into());
    }
    money::validate_event_date(paid_date, today())?;
    let rate = get_profile(conn)?.tax_rate;

    let tx = conn.transaction()?;
    tx.execute(
        "UPDATE invoices SET status='PAID', paid_date=?1 WHERE id=?2",
        params![paid_date.to_string(), inv.id],
    )?;
    let event = add_income(
        &tx,
        inv.amount,
        rate,
        paid_date,
        today(),
        Some(inv.client_name.clone()),
        Some(format!("Invoice {}", inv.invoice_ref)),
    )
    .map_err(|e| Error::Atomicity(format!("Income event for {} failed: {}", invoice_ref, e)))?;
    tx.commit()
        .map_err(|e| Error::Atomicity(format!("Commit for {} failed: {}", invoice_ref, e)))?;

    let inv = get_invoice(conn, invoice_ref)?;
    Ok((inv, event))
}

pub fn all_invoices(conn: &Connection) -> Result<Vec<Invoice>> {
    let mut stmt = conn
        .prepare("SELECT invoice_ref FROM invoices ORDER BY created_at DESC, id DESC")?;
    let refs = stmt.query_map([], |r| r.get::<_, String>(0))?;
    let mut out = Vec::new();
    for iref in refs {
        out.push(get_invoice(conn, &iref?)?);
    }
    Ok(out)
}

#[derive(Serialize)]
struct InvoiceRow {
    invoice_ref: String,
    client: String,
    amount: String,
    currency: String,
    status: String,
    due_date: String,
    age_days: Option<i64>,
    tier: Option<String>,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let open_only = sub.get_flag("open");
    let now = today();

    let data: Vec<InvoiceRow> = all_invoices(conn)?
        .into_iter()
        .filter(|i| !open_only || i.status != InvoiceStatus::Paid)
        .map(|i| {
            let tier = display_tier(i.status, i.due_date, now);
            InvoiceRow {
                invoice_ref: i.invoice_ref,
                client: i.client_name,
                amount: format!("{:.2}", i.amount),
                currency: i.currency,
                status: i.status.to_string(),
                due_date: i.due_date.to_string(),
                // Age is meaningless once settled
                age_days: (i.status != InvoiceStatus::Paid)
                    .then(|| age_days(i.due_date, now)),
                tier: tier.map(|t| t.as_str().to_string()),
            }
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.invoice_ref.clone(),
                    r.client.clone(),
                    r.amount.clone(),
                    r.currency.clone(),
                    r.due_date.clone(),
                    r.status.clone(),
                    r.age_days.map(|d| format!("{}d", d)).unwrap_or("—".into()),
                    r.tier.clone().unwrap_or("—".into()),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Ref", "Client", "Amount", "CCY", "Due", "Status", "Age", "Tier"],
                rows,
            )
        );
    }
    Ok(())
}

fn followup(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let inv = get_invoice(conn, ref_arg(sub))?;
    if inv.status == InvoiceStatus::Paid {
        return Err(Error::validation(format!(
            "Invoice {} is already paid",
            inv.invoice_ref
        ))
        .into());
    }
    let endpoint = get_setting(conn, "ai_followup_endpoint")?;
    let client = http_client()?;
    let req = FollowupRequest {
        client_name: inv.client_name.clone(),
        invoice_ref: inv.invoice_ref.clone(),
        amount: inv.amount,
        due_date: inv.due_date.to_string(),
        days_past_due: age_days(inv.due_date, today()).max(0),
    };
    let draft = draft_followup(&client, endpoint.as_deref(), &req);
    println!("{}", draft);
    Ok(())
}
