// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Transaction, TransactionDraft, TxType};
use crate::store::{self, ListQuery, TransactionPage, TxFilter};
use crate::utils::{id_for_user, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("update", sub)) => update(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
struct MessagePayload {
    message: String,
    transaction: Transaction,
}

#[derive(Serialize)]
struct DeletedPayload {
    message: String,
}

fn draft_from_matches(sub: &clap::ArgMatches) -> Result<TransactionDraft> {
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let r#type = TxType::parse(sub.get_one::<String>("type").unwrap())?;
    Ok(TransactionDraft {
        date,
        description: sub.get_one::<String>("description").unwrap().clone(),
        amount,
        category: sub.get_one::<String>("category").unwrap().clone(),
        r#type,
    })
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let draft = draft_from_matches(sub)?;
    let transaction = store::create_transaction(conn, owner_id, draft)?;
    let payload = MessagePayload {
        message: "Transaction created successfully".into(),
        transaction,
    };
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &payload)? {
        let t = &payload.transaction;
        println!(
            "Recorded {} {} on {} '{}' (id: {})",
            t.r#type.as_str(),
            t.amount,
            t.date,
            t.description,
            t.id
        );
    }
    Ok(())
}

/// Builds the page for a `tx list` invocation; shared with the test suite.
pub fn query_page(conn: &Connection, sub: &clap::ArgMatches) -> Result<TransactionPage> {
    let owner_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let mut filter = TxFilter::default();
    if let Some(s) = sub.get_one::<String>("start") {
        filter.start_date = Some(parse_date(s)?);
    }
    if let Some(s) = sub.get_one::<String>("end") {
        filter.end_date = Some(parse_date(s)?);
    }
    filter.category = sub.get_one::<String>("category").cloned();
    filter.description = sub.get_one::<String>("description").cloned();
    let query = ListQuery {
        filter,
        page: sub.get_one::<u32>("page").copied(),
        limit: sub.get_one::<u32>("limit").copied(),
    };
    Ok(store::list_transactions(conn, owner_id, &query)?)
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let page = query_page(conn, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &page)? {
        let rows: Vec<Vec<String>> = page
            .transactions
            .iter()
            .map(|t| {
                vec![
                    t.id.to_string(),
                    t.date.to_string(),
                    t.description.clone(),
                    t.amount.to_string(),
                    t.category.clone(),
                    t.r#type.as_str().to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Description", "Amount", "Category", "Type"],
                rows,
            )
        );
        let p = &page.pagination;
        println!(
            "Page {} of {} ({} transactions)",
            p.current_page, p.total_pages, p.total_transactions
        );
    }
    Ok(())
}

fn update(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let draft = draft_from_matches(sub)?;
    let transaction = store::update_transaction(conn, owner_id, id, draft)?;
    let payload = MessagePayload {
        message: "Transaction updated successfully".into(),
        transaction,
    };
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &payload)? {
        println!("Updated transaction {}", payload.transaction.id);
    }
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let id = *sub.get_one::<i64>("id").unwrap();
    store::delete_transaction(conn, owner_id, id)?;
    let payload = DeletedPayload {
        message: "Transaction deleted successfully".into(),
    };
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &payload)? {
        println!("Deleted transaction {}", id);
    }
    Ok(())
}
