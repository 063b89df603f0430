// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};
use crate::models::TxType;
use crate::period;
use crate::store::{push_filter_sql, TxFilter};

#[derive(Debug, Serialize)]
pub struct CategoryRow {
    pub category: String,
    pub total: Decimal,
    pub count: i64,
    pub percentage: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub categories: Vec<CategoryRow>,
    pub total_amount: Decimal,
    pub r#type: TxType,
    pub period: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentTransaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    pub r#type: TxType,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub balance: Decimal,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub recent_transactions: Vec<RecentTransaction>,
    pub period: String,
}

/// Per-category totals for one transaction type within the resolved period.
///
/// Groups are ordered by total descending; equal totals keep retrieval
/// order. Each percentage is rounded on its own, so the column need not
/// sum to exactly 100.
pub fn category_summary(
    conn: &Connection,
    owner_id: i64,
    tx_type: TxType,
    month: Option<u32>,
    year: Option<i32>,
) -> LedgerResult<CategorySummary> {
    let filter = TxFilter {
        period: Some(period::resolve(month, year)),
        ..TxFilter::default()
    };
    let mut sql = String::from("SELECT category, amount FROM transactions");
    let mut binds: Vec<String> = Vec::new();
    push_filter_sql(&mut sql, &mut binds, owner_id, &filter);
    sql.push_str(" AND type=?");
    binds.push(tx_type.as_str().to_string());
    // Insertion order makes the equal-total tie-break reproducible.
    sql.push_str(" ORDER BY id");

    let mut groups: Vec<(String, Decimal, i64)> = Vec::new();
    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> =
        binds.iter().map(|s| s as &dyn rusqlite::ToSql).collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(params))?;
    while let Some(r) = rows.next()? {
        let category: String = r.get(0)?;
        let amount_s: String = r.get(1)?;
        let amount = amount_s.parse::<Decimal>().map_err(|e| {
            LedgerError::validation(format!("Invalid stored amount '{}': {}", amount_s, e))
        })?;
        match groups.iter_mut().find(|g| g.0 == category) {
            Some(g) => {
                g.1 += amount;
                g.2 += 1;
            }
            None => groups.push((category, amount, 1)),
        }
    }
    // Stable sort keeps first-seen order for equal totals.
    groups.sort_by(|a, b| b.1.cmp(&a.1));

    let total_amount: Decimal = groups.iter().map(|g| g.1).sum();
    let categories = groups
        .into_iter()
        .map(|(category, total, count)| CategoryRow {
            percentage: percentage_of(total, total_amount),
            category,
            total,
            count,
        })
        .collect();

    Ok(CategorySummary {
        categories,
        total_amount,
        r#type: tx_type,
        period: period::label(month, year),
    })
}

fn percentage_of(part: Decimal, whole: Decimal) -> u32 {
    if whole <= Decimal::ZERO {
        return 0;
    }
    (part * Decimal::from(100) / whole)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0)
}

/// Income/expense totals and balance for the resolved period, plus the
/// owner's five most recently created transactions.
///
/// The recent list is a global latest-activity view: it ignores the period
/// filter on purpose.
pub fn dashboard_summary(
    conn: &Connection,
    owner_id: i64,
    month: Option<u32>,
    year: Option<i32>,
) -> LedgerResult<DashboardSummary> {
    let filter = TxFilter {
        period: Some(period::resolve(month, year)),
        ..TxFilter::default()
    };
    let mut sql = String::from("SELECT type, amount FROM transactions");
    let mut binds: Vec<String> = Vec::new();
    push_filter_sql(&mut sql, &mut binds, owner_id, &filter);

    let mut total_income = Decimal::ZERO;
    let mut total_expense = Decimal::ZERO;
    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> =
        binds.iter().map(|s| s as &dyn rusqlite::ToSql).collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(params))?;
    while let Some(r) = rows.next()? {
        let type_s: String = r.get(0)?;
        let amount_s: String = r.get(1)?;
        let amount = amount_s.parse::<Decimal>().map_err(|e| {
            LedgerError::validation(format!("Invalid stored amount '{}': {}", amount_s, e))
        })?;
        match TxType::parse(&type_s)? {
            TxType::Income => total_income += amount,
            TxType::Expense => total_expense += amount,
        }
    }

    Ok(DashboardSummary {
        balance: total_income - total_expense,
        total_income,
        total_expense,
        recent_transactions: recent_transactions(conn, owner_id, 5)?,
        period: period::label(month, year),
    })
}

fn recent_transactions(
    conn: &Connection,
    owner_id: i64,
    limit: u32,
) -> LedgerResult<Vec<RecentTransaction>> {
    let mut stmt = conn.prepare(
        "SELECT date, description, amount, category, type FROM transactions
         WHERE user_id=?1 ORDER BY created_at DESC, id DESC LIMIT ?2",
    )?;
    let mut rows = stmt.query(rusqlite::params![owner_id, limit])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let date_s: String = r.get(0)?;
        let amount_s: String = r.get(2)?;
        let type_s: String = r.get(4)?;
        let date = NaiveDate::parse_from_str(&date_s, "%Y-%m-%d").map_err(|e| {
            LedgerError::validation(format!("Invalid stored date '{}': {}", date_s, e))
        })?;
        let amount = amount_s.parse::<Decimal>().map_err(|e| {
            LedgerError::validation(format!("Invalid stored amount '{}': {}", amount_s, e))
        })?;
        out.push(RecentTransaction {
            date,
            description: r.get(1)?,
            amount,
            category: r.get(3)?,
            r#type: TxType::parse(&type_s)?,
        });
    }
    Ok(out)
}
