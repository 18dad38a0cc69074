// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::tax;
use crate::utils::{parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    // 1) PAID invoices missing a paid date (or the other way around)
    let mut stmt = conn.prepare(
        "SELECT invoice_ref FROM invoices
         WHERE (status='PAID' AND paid_date IS NULL)
            OR (status!='PAID' AND paid_date IS NOT NULL)",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let iref: String = r.get(0)?;
        rows.push(vec!["paid_status_mismatch".into(), iref]);
    }

    // 2) Income events whose frozen slice/net no longer reconstitute from the
    //    stored amount and rate
    let mut stmt2 = conn
        .prepare("SELECT id, amount, tax_rate, tax_slice, net_amount FROM income_events")?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let id: i64 = r.get(0)?;
        let amount = parse_decimal(&r.get::<_, String>(1)?)?;
        let rate = parse_decimal(&r.get::<_, String>(2)?)?;
        let slice = parse_decimal(&r.get::<_, String>(3)?)?;
        let net = parse_decimal(&r.get::<_, String>(4)?)?;
        match (tax::tax_slice(amount, rate), tax::net_amount(amount, rate)) {
            (Ok(want_slice), Ok(want_net)) => {
                if want_slice != slice || want_net != net {
                    rows.push(vec![
                        "income_derivation_drift".into(),
                        format!("#{} slice {} net {}", id, slice, net),
                    ]);
                }
            }
            _ => rows.push(vec![
                "income_out_of_range".into(),
                format!("#{} amount {} rate {}", id, amount, rate),
            ]),
        }
    }

    // 3) Non-positive stored amounts anywhere
    for (table, col) in [
        ("income_events", "amount"),
        ("invoices", "amount"),
        ("expenses", "amount"),
        ("committed_bills", "amount"),
    ] {
        let sql = format!("SELECT id, {} FROM {}", col, table);
        let mut st = conn.prepare(&sql)?;
        let mut cur = st.query([])?;
        while let Some(r) = cur.next()? {
            let id: i64 = r.get(0)?;
            let amount = parse_decimal(&r.get::<_, String>(1)?)?;
            if amount <= rust_decimal::Decimal::ZERO {
                rows.push(vec![
                    "non_positive_amount".into(),
                    format!("{} #{}", table, id),
                ]);
            }
        }
    }

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
