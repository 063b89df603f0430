// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::is_known_category;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Transactions whose owner row is gone
    let mut stmt = conn.prepare(
        "SELECT id FROM transactions WHERE user_id NOT IN (SELECT id FROM users)",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        rows.push(vec!["orphaned_transaction".into(), format!("id {}", id)]);
    }

    // 2) Amounts that fail to parse or are not positive
    let mut stmt2 = conn.prepare("SELECT id, amount FROM transactions ORDER BY id")?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let id: i64 = r.get(0)?;
        let amount_s: String = r.get(1)?;
        match amount_s.parse::<Decimal>() {
            Ok(a) if a >= Decimal::new(1, 2) => {}
            _ => rows.push(vec![
                "bad_amount".into(),
                format!("id {} amount '{}'", id, amount_s),
            ]),
        }
    }

    // 3) Categories outside the known enumeration
    let mut stmt3 = conn.prepare("SELECT DISTINCT category FROM transactions")?;
    let mut cur3 = stmt3.query([])?;
    while let Some(r) = cur3.next()? {
        let c: String = r.get(0)?;
        if !is_known_category(&c) {
            rows.push(vec!["unknown_category".into(), c]);
        }
    }

    // 4) Empty or oversized descriptions
    let mut stmt4 = conn.prepare(
        "SELECT id FROM transactions WHERE length(trim(description))=0 OR length(description)>200",
    )?;
    let mut cur4 = stmt4.query([])?;
    while let Some(r) = cur4.next()? {
        let id: i64 = r.get(0)?;
        rows.push(vec!["bad_description".into(), format!("id {}", id)]);
    }

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
