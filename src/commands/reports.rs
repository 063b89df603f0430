// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::TxType;
use crate::summary;
use crate::utils::{id_for_user, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("category", sub)) => category(conn, sub)?,
        Some(("dashboard", sub)) => dashboard(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn category(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let month = sub.get_one::<u32>("month").copied();
    let year = sub.get_one::<i32>("year").copied();
    let tx_type = TxType::parse(sub.get_one::<String>("type").unwrap())?;

    let report = summary::category_summary(conn, owner_id, tx_type, month, year)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        let rows: Vec<Vec<String>> = report
            .categories
            .iter()
            .map(|c| {
                vec![
                    c.category.clone(),
                    format!("{:.2}", c.total),
                    c.count.to_string(),
                    format!("{}%", c.percentage),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Total", "Count", "Share"], rows)
        );
        println!(
            "Total {}: {:.2} ({})",
            report.r#type.as_str(),
            report.total_amount,
            report.period
        );
    }
    Ok(())
}

fn dashboard(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let month = sub.get_one::<u32>("month").copied();
    let year = sub.get_one::<i32>("year").copied();

    let report = summary::dashboard_summary(conn, owner_id, month, year)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        let rows = vec![
            vec!["Income".to_string(), format!("{:.2}", report.total_income)],
            vec!["Expense".to_string(), format!("{:.2}", report.total_expense)],
            vec!["Balance".to_string(), format!("{:.2}", report.balance)],
        ];
        println!("{}", pretty_table(&[report.period.as_str(), "Amount"], rows));
        let recent: Vec<Vec<String>> = report
            .recent_transactions
            .iter()
            .map(|t| {
                vec![
                    t.date.to_string(),
                    t.description.clone(),
                    format!("{:.2}", t.amount),
                    t.category.clone(),
                    t.r#type.as_str().to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Description", "Amount", "Category", "Type"],
                recent,
            )
        );
    }
    Ok(())
}
