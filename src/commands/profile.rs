// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::tax;
use crate::utils::{
    get_profile, maybe_print_json, parse_bool, parse_decimal, pretty_table, set_setting,
};
use anyhow::Result;
use rusqlite::{params, Connection};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        Some(("set-endpoint", sub)) => set_endpoint(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    if let Some(rate_s) = sub.get_one::<String>("tax-rate") {
        let rate = tax::validate_rate(parse_decimal(rate_s)?)?;
        conn.execute(
            "UPDATE profile SET tax_rate=?1 WHERE id=1",
            params![rate.to_string()],
        )?;
        println!("Default tax rate set to {}%", rate);
    }
    if let Some(gst_s) = sub.get_one::<String>("gst") {
        let gst = parse_bool(gst_s)?;
        conn.execute(
            "UPDATE profile SET gst_enabled=?1 WHERE id=1",
            params![gst],
        )?;
        println!("GST {}", if gst { "enabled" } else { "disabled" });
    }
    if let Some(ccy) = sub.get_one::<String>("currency") {
        let ccy = ccy.to_uppercase();
        conn.execute("UPDATE profile SET currency=?1 WHERE id=1", params![ccy])?;
        println!("Currency set to {}", ccy);
    }
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let p = get_profile(conn)?;
    if !maybe_print_json(json_flag, jsonl_flag, &p)? {
        let rows = vec![
            vec!["Tax rate".into(), format!("{}%", p.tax_rate)],
            vec![
                "GST".into(),
                if p.gst_enabled {
                    "registered".into()
                } else {
                    "not registered".into()
                },
            ],
            vec!["Currency".into(), p.currency],
        ];
        println!("{}", pretty_table(&["Setting", "Value"], rows));
    }
    Ok(())
}

fn set_endpoint(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    if let Some(url) = sub.get_one::<String>("categorize") {
        set_setting(conn, "ai_categorize_endpoint", url)?;
        println!("Categorization endpoint set");
    }
    if let Some(url) = sub.get_one::<String>("followup") {
        set_setting(conn, "ai_followup_endpoint", url)?;
        println!("Follow-up endpoint set");
    }
    Ok(())
}
