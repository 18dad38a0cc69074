// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let out = sub.get_one::<String>("out").unwrap();
    if sub.get_flag("expenses") {
        export_expenses(conn, out)?;
    } else {
        export_income(conn, out)?;
    }
    Ok(())
}

fn export_income(conn: &Connection, out: &str) -> Result<()> {
    let mut stmt = conn.prepare(
        "SELECT event_date, client_name, amount, tax_rate, tax_slice, net_amount, description
         FROM income_events ORDER BY event_date, id",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, Option<String>>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, String>(5)?,
            r.get::<_, Option<String>>(6)?,
        ))
    })?;

    let mut wtr = csv::Writer::from_path(out)?;
    wtr.write_record([
        "event_date",
        "client",
        "amount",
        "tax_rate",
        "tax_slice",
        "net_amount",
        "description",
    ])?;
    for row in rows {
        let (d, client, amt, rate, slice, net, desc) = row?;
        wtr.write_record([
            d,
            client.unwrap_or_default(),
            amt,
            rate,
            slice,
            net,
            desc.unwrap_or_default(),
        ])?;
    }
    wtr.flush()?;
    println!("Exported income events to {}", out);
    Ok(())
}

fn export_expenses(conn: &Connection, out: &str) -> Result<()> {
    let mut stmt = conn.prepare(
        "SELECT expense_date, description, amount, category, ai_confidence, is_deductible, reviewed
         FROM expenses ORDER BY expense_date, id",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, Option<String>>(3)?,
            r.get::<_, Option<f64>>(4)?,
            r.get::<_, Option<bool>>(5)?,
            r.get::<_, bool>(6)?,
        ))
    })?;

    let mut wtr = csv::Writer::from_path(out)?;
    wtr.write_record([
        "expense_date",
        "description",
        "amount",
        "category",
        "confidence",
        "deductible",
        "reviewed",
    ])?;
    for row in rows {
        let (d, desc, amt, cat, conf, ded, reviewed) = row?;
        wtr.write_record([
            d,
            desc,
            amt,
            cat.unwrap_or_default(),
            conf.map(|c| format!("{:.2}", c)).unwrap_or_default(),
            ded.map(|b| b.to_string()).unwrap_or_default(),
            reviewed.to_string(),
        ])?;
    }
    wtr.flush()?;
    println!("Exported expenses to {}", out);
    Ok(())
}
