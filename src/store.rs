// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Transaction, TransactionDraft, TxType, User};
use crate::period::Period;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 50;

/// Optional constraints applied on top of the mandatory owner scope.
///
/// Each present field adds one AND clause; `category` and `description`
/// match case-insensitive substrings.
#[derive(Debug, Clone, Default)]
pub struct TxFilter {
    pub period: Option<Period>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub category: Option<String>,
    pub description: Option<String>,
}

/// Appends the WHERE fragment for `owner_id` + `filter` to `sql`, pushing
/// bind values onto `binds` in matching positional order.
pub(crate) fn push_filter_sql(
    sql: &mut String,
    binds: &mut Vec<String>,
    owner_id: i64,
    filter: &TxFilter,
) {
    sql.push_str(" WHERE user_id=?");
    binds.push(owner_id.to_string());
    if let Some(Period::Bounded { start, end }) = filter.period {
        sql.push_str(" AND date>=? AND date<=?");
        binds.push(start.to_string());
        binds.push(end.to_string());
    }
    if let Some(start) = filter.start_date {
        sql.push_str(" AND date>=?");
        binds.push(start.to_string());
    }
    if let Some(end) = filter.end_date {
        sql.push_str(" AND date<=?");
        binds.push(end.to_string());
    }
    if let Some(ref cat) = filter.category {
        sql.push_str(" AND category LIKE ?");
        binds.push(format!("%{}%", cat));
    }
    if let Some(ref desc) = filter.description {
        sql.push_str(" AND description LIKE ?");
        binds.push(format!("%{}%", desc));
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub filter: TxFilter,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_transactions: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

#[derive(Debug, Serialize)]
pub struct TransactionPage {
    pub transactions: Vec<Transaction>,
    pub pagination: Pagination,
}

/// Lists the owner's transactions newest-first with skip/limit pagination.
///
/// A page past the end yields an empty list, not an error.
pub fn list_transactions(
    conn: &Connection,
    owner_id: i64,
    query: &ListQuery,
) -> LedgerResult<TransactionPage> {
    let page = query.page.unwrap_or(DEFAULT_PAGE).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).max(1);

    let mut where_sql = String::new();
    let mut binds: Vec<String> = Vec::new();
    push_filter_sql(&mut where_sql, &mut binds, owner_id, &query.filter);

    let count_sql = format!("SELECT COUNT(*) FROM transactions{}", where_sql);
    let total: i64 = {
        let mut stmt = conn.prepare(&count_sql)?;
        let params: Vec<&dyn rusqlite::ToSql> =
            binds.iter().map(|s| s as &dyn rusqlite::ToSql).collect();
        stmt.query_row(rusqlite::params_from_iter(params), |r| r.get(0))?
    };

    let sql = format!(
        "SELECT id, user_id, date, description, amount, category, type, created_at, updated_at \
         FROM transactions{} ORDER BY date DESC, created_at DESC, id DESC LIMIT ? OFFSET ?",
        where_sql
    );
    binds.push(limit.to_string());
    binds.push(((i64::from(page) - 1) * i64::from(limit)).to_string());
    let transactions = {
        let mut stmt = conn.prepare(&sql)?;
        let params: Vec<&dyn rusqlite::ToSql> =
            binds.iter().map(|s| s as &dyn rusqlite::ToSql).collect();
        let mut rows = stmt.query(rusqlite::params_from_iter(params))?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            out.push(row_to_transaction(r)?);
        }
        out
    };

    let total_pages = ((total + i64::from(limit) - 1) / i64::from(limit)) as u32;
    Ok(TransactionPage {
        transactions,
        pagination: Pagination {
            current_page: page,
            total_pages,
            total_transactions: total,
            has_next: i64::from(page) * i64::from(limit) < total,
            has_prev: page > 1,
        },
    })
}

pub fn create_transaction(
    conn: &Connection,
    owner_id: i64,
    draft: TransactionDraft,
) -> LedgerResult<Transaction> {
    let draft = draft.validated()?;
    conn.execute(
        "INSERT INTO transactions(user_id, date, description, amount, category, type)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            owner_id,
            draft.date.to_string(),
            draft.description,
            draft.amount.to_string(),
            draft.category,
            draft.r#type.as_str()
        ],
    )?;
    let id = conn.last_insert_rowid();
    tracing::debug!(id, owner_id, "recorded transaction");
    get_transaction(conn, owner_id, id)
}

pub fn update_transaction(
    conn: &Connection,
    owner_id: i64,
    id: i64,
    draft: TransactionDraft,
) -> LedgerResult<Transaction> {
    let draft = draft.validated()?;
    let changed = conn.execute(
        "UPDATE transactions
         SET date=?1, description=?2, amount=?3, category=?4, type=?5, updated_at=datetime('now')
         WHERE id=?6 AND user_id=?7",
        params![
            draft.date.to_string(),
            draft.description,
            draft.amount.to_string(),
            draft.category,
            draft.r#type.as_str(),
            id,
            owner_id
        ],
    )?;
    if changed == 0 {
        return Err(LedgerError::NotFound("Transaction"));
    }
    get_transaction(conn, owner_id, id)
}

pub fn delete_transaction(conn: &Connection, owner_id: i64, id: i64) -> LedgerResult<()> {
    let changed = conn.execute(
        "DELETE FROM transactions WHERE id=?1 AND user_id=?2",
        params![id, owner_id],
    )?;
    if changed == 0 {
        return Err(LedgerError::NotFound("Transaction"));
    }
    tracing::debug!(id, owner_id, "deleted transaction");
    Ok(())
}

pub fn get_transaction(conn: &Connection, owner_id: i64, id: i64) -> LedgerResult<Transaction> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, date, description, amount, category, type, created_at, updated_at
         FROM transactions WHERE id=?1 AND user_id=?2",
    )?;
    let mut rows = stmt.query(params![id, owner_id])?;
    match rows.next()? {
        Some(r) => row_to_transaction(r),
        None => Err(LedgerError::NotFound("Transaction")),
    }
}

fn row_to_transaction(r: &rusqlite::Row<'_>) -> LedgerResult<Transaction> {
    let date_s: String = r.get(2)?;
    let amount_s: String = r.get(4)?;
    let type_s: String = r.get(6)?;
    let date = NaiveDate::parse_from_str(&date_s, "%Y-%m-%d")
        .map_err(|e| LedgerError::validation(format!("Invalid stored date '{}': {}", date_s, e)))?;
    let amount = amount_s.parse::<Decimal>().map_err(|e| {
        LedgerError::validation(format!("Invalid stored amount '{}': {}", amount_s, e))
    })?;
    Ok(Transaction {
        id: r.get(0)?,
        user_id: r.get(1)?,
        date,
        description: r.get(3)?,
        amount,
        category: r.get(5)?,
        r#type: TxType::parse(&type_s)?,
        created_at: r.get(7)?,
        updated_at: r.get(8)?,
    })
}

pub fn create_user(conn: &Connection, username: &str, email: &str) -> LedgerResult<User> {
    let username = username.trim();
    if username.chars().count() < 2 || username.chars().count() > 50 {
        return Err(LedgerError::validation(
            "Name must be between 2 and 50 characters",
        ));
    }
    let exists: Option<i64> = conn
        .query_row(
            "SELECT id FROM users WHERE username=?1 OR email=?2",
            params![username, email],
            |r| r.get(0),
        )
        .optional()?;
    if exists.is_some() {
        return Err(LedgerError::validation("User already exists"));
    }
    conn.execute(
        "INSERT INTO users(username, email) VALUES (?1, ?2)",
        params![username, email],
    )?;
    let id = conn.last_insert_rowid();
    Ok(User {
        id,
        username: username.to_string(),
        email: email.to_string(),
    })
}

pub fn list_users(conn: &Connection) -> LedgerResult<Vec<User>> {
    let mut stmt = conn.prepare("SELECT id, username, email FROM users ORDER BY username")?;
    let rows = stmt.query_map([], |r| {
        Ok(User {
            id: r.get(0)?,
            username: r.get(1)?,
            email: r.get(2)?,
        })
    })?;
    let mut users = Vec::new();
    for row in rows {
        users.push(row?);
    }
    Ok(users)
}

/// Removes a user and, via the schema's cascade, every transaction they own.
pub fn delete_user(conn: &Connection, username: &str) -> LedgerResult<()> {
    let changed = conn.execute("DELETE FROM users WHERE username=?1", params![username])?;
    if changed == 0 {
        return Err(LedgerError::NotFound("User"));
    }
    Ok(())
}
