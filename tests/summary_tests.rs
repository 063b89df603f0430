// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use coinkeeper::models::TxType;
use coinkeeper::summary;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE users(
            id INTEGER PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        CREATE TABLE transactions(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            date TEXT NOT NULL,
            description TEXT NOT NULL,
            amount TEXT NOT NULL,
            category TEXT NOT NULL,
            type TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        "#,
    )
    .unwrap();
    conn.execute(
        "INSERT INTO users(id,username,email) VALUES (1,'alice','alice@example.com'),(2,'bob','bob@example.com')",
        [],
    )
    .unwrap();
    conn
}

fn insert_tx(
    conn: &Connection,
    user_id: i64,
    date: &str,
    amount: &str,
    category: &str,
    tx_type: &str,
    created_at: &str,
) {
    conn.execute(
        "INSERT INTO transactions(user_id,date,description,amount,category,type,created_at,updated_at)
         VALUES (?1,?2,'entry',?3,?4,?5,?6,?6)",
        params![user_id, date, amount, category, tx_type, created_at],
    )
    .unwrap();
}

fn dec(s: &str) -> Decimal {
    s.parse::<Decimal>().unwrap()
}

#[test]
fn groups_sum_and_split_shares() {
    let conn = setup();
    insert_tx(&conn, 1, "2025-03-01", "30", "Food", "Expense", "2025-03-01 08:00:00");
    insert_tx(&conn, 1, "2025-03-02", "20", "Food", "Expense", "2025-03-02 08:00:00");
    insert_tx(&conn, 1, "2025-03-03", "50", "Transport", "Expense", "2025-03-03 08:00:00");

    let report = summary::category_summary(&conn, 1, TxType::Expense, None, None).unwrap();
    assert_eq!(report.total_amount, dec("100"));
    assert_eq!(report.period, "All time");
    assert_eq!(report.categories.len(), 2);
    // Equal totals keep retrieval order: Food appears first in the table.
    assert_eq!(report.categories[0].category, "Food");
    assert_eq!(report.categories[0].total, dec("50"));
    assert_eq!(report.categories[0].count, 2);
    assert_eq!(report.categories[0].percentage, 50);
    assert_eq!(report.categories[1].category, "Transport");
    assert_eq!(report.categories[1].total, dec("50"));
    assert_eq!(report.categories[1].count, 1);
    assert_eq!(report.categories[1].percentage, 50);
}

#[test]
fn largest_group_sorts_first() {
    let conn = setup();
    insert_tx(&conn, 1, "2025-03-01", "10", "Food", "Expense", "2025-03-01 08:00:00");
    insert_tx(&conn, 1, "2025-03-02", "90", "Bills", "Expense", "2025-03-02 08:00:00");

    let report = summary::category_summary(&conn, 1, TxType::Expense, None, None).unwrap();
    assert_eq!(report.categories[0].category, "Bills");
    assert_eq!(report.categories[0].percentage, 90);
    assert_eq!(report.categories[1].percentage, 10);
}

#[test]
fn single_group_is_the_whole_total() {
    let conn = setup();
    insert_tx(&conn, 1, "2025-03-01", "42.42", "Food", "Expense", "2025-03-01 08:00:00");
    let report = summary::category_summary(&conn, 1, TxType::Expense, None, None).unwrap();
    assert_eq!(report.categories.len(), 1);
    assert_eq!(report.categories[0].percentage, 100);
    assert_eq!(report.total_amount, dec("42.42"));
}

#[test]
fn empty_result_has_no_rows_and_zero_total() {
    let conn = setup();
    let report = summary::category_summary(&conn, 1, TxType::Expense, Some(2), Some(2030)).unwrap();
    assert!(report.categories.is_empty());
    assert_eq!(report.total_amount, Decimal::ZERO);
    assert_eq!(report.period, "2/2030");
}

#[test]
fn only_the_requested_type_is_aggregated() {
    let conn = setup();
    insert_tx(&conn, 1, "2025-03-01", "2500", "Salary", "Income", "2025-03-01 08:00:00");
    insert_tx(&conn, 1, "2025-03-02", "40", "Food", "Expense", "2025-03-02 08:00:00");
    let report = summary::category_summary(&conn, 1, TxType::Expense, None, None).unwrap();
    assert_eq!(report.categories.len(), 1);
    assert_eq!(report.categories[0].category, "Food");
    assert_eq!(report.total_amount, dec("40"));
}

#[test]
fn period_bounds_scope_the_groups() {
    let conn = setup();
    insert_tx(&conn, 1, "2025-02-28", "10", "Food", "Expense", "2025-02-28 08:00:00");
    insert_tx(&conn, 1, "2025-03-01", "30", "Food", "Expense", "2025-03-01 08:00:00");
    insert_tx(&conn, 1, "2025-03-31", "60", "Food", "Expense", "2025-03-31 08:00:00");
    insert_tx(&conn, 1, "2025-04-01", "99", "Food", "Expense", "2025-04-01 08:00:00");
    let report = summary::category_summary(&conn, 1, TxType::Expense, Some(3), Some(2025)).unwrap();
    assert_eq!(report.total_amount, dec("90"));
    assert_eq!(report.period, "3/2025");
}

#[test]
fn foreign_owners_are_invisible_to_summaries() {
    let conn = setup();
    insert_tx(&conn, 2, "2025-03-01", "500", "Food", "Expense", "2025-03-01 08:00:00");
    let report = summary::category_summary(&conn, 1, TxType::Expense, None, None).unwrap();
    assert!(report.categories.is_empty());
    assert_eq!(report.total_amount, Decimal::ZERO);
}

#[test]
fn half_shares_round_away_from_zero() {
    let conn = setup();
    insert_tx(&conn, 1, "2025-03-01", "87.50", "Bills", "Expense", "2025-03-01 08:00:00");
    insert_tx(&conn, 1, "2025-03-02", "12.50", "Food", "Expense", "2025-03-02 08:00:00");
    let report = summary::category_summary(&conn, 1, TxType::Expense, None, None).unwrap();
    // Per-row rounding: 88 + 13 = 101, by design.
    assert_eq!(report.categories[0].percentage, 88);
    assert_eq!(report.categories[1].percentage, 13);
}

#[test]
fn dashboard_balances_income_against_expense() {
    let conn = setup();
    insert_tx(&conn, 1, "2025-03-01", "2500", "Salary", "Income", "2025-03-01 08:00:00");
    insert_tx(&conn, 1, "2025-03-02", "300", "Bills", "Expense", "2025-03-02 08:00:00");
    let report = summary::dashboard_summary(&conn, 1, None, None).unwrap();
    assert_eq!(report.total_income, dec("2500"));
    assert_eq!(report.total_expense, dec("300"));
    assert_eq!(report.balance, dec("2200"));
}

#[test]
fn missing_type_groups_default_to_zero() {
    let conn = setup();
    insert_tx(&conn, 1, "2025-03-02", "300", "Bills", "Expense", "2025-03-02 08:00:00");
    let report = summary::dashboard_summary(&conn, 1, None, None).unwrap();
    assert_eq!(report.total_income, Decimal::ZERO);
    assert_eq!(report.total_expense, dec("300"));
    assert_eq!(report.balance, dec("-300"));
}

#[test]
fn dashboard_totals_respect_the_period() {
    let conn = setup();
    insert_tx(&conn, 1, "2025-02-28", "100", "Salary", "Income", "2025-02-28 08:00:00");
    insert_tx(&conn, 1, "2025-03-15", "40", "Food", "Expense", "2025-03-15 08:00:00");
    let report = summary::dashboard_summary(&conn, 1, Some(3), Some(2025)).unwrap();
    assert_eq!(report.total_income, Decimal::ZERO);
    assert_eq!(report.total_expense, dec("40"));
    assert_eq!(report.period, "3/2025");
}

#[test]
fn recent_activity_ignores_the_period_filter() {
    let conn = setup();
    for i in 1..=7 {
        insert_tx(
            &conn,
            1,
            &format!("2025-03-0{}", i),
            "10",
            "Food",
            "Expense",
            &format!("2025-03-0{} 08:00:00", i),
        );
    }
    // A window with no matching rows still reports global recent activity.
    let report = summary::dashboard_summary(&conn, 1, Some(1), Some(2020)).unwrap();
    assert_eq!(report.total_expense, Decimal::ZERO);
    assert_eq!(report.recent_transactions.len(), 5);
    assert_eq!(report.recent_transactions[0].date.to_string(), "2025-03-07");
    assert_eq!(report.recent_transactions[4].date.to_string(), "2025-03-03");
}

#[test]
fn recent_activity_is_owner_scoped() {
    let conn = setup();
    insert_tx(&conn, 1, "2025-03-01", "10", "Food", "Expense", "2025-03-01 08:00:00");
    insert_tx(&conn, 2, "2025-03-02", "99", "Bills", "Expense", "2025-03-02 08:00:00");
    let report = summary::dashboard_summary(&conn, 1, None, None).unwrap();
    assert_eq!(report.recent_transactions.len(), 1);
    assert_eq!(report.recent_transactions[0].amount, dec("10"));
}
