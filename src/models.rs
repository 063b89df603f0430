// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};

pub const INCOME_CATEGORIES: [&str; 5] =
    ["Salary", "Business", "Investment", "Freelance", "Other Income"];

pub const EXPENSE_CATEGORIES: [&str; 9] = [
    "Food",
    "Transport",
    "Shopping",
    "Entertainment",
    "Bills",
    "Healthcare",
    "Education",
    "Travel",
    "Other Expense",
];

pub fn is_known_category(name: &str) -> bool {
    INCOME_CATEGORIES.contains(&name) || EXPENSE_CATEGORIES.contains(&name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxType {
    Income,
    Expense,
}

impl TxType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxType::Income => "Income",
            TxType::Expense => "Expense",
        }
    }

    pub fn parse(s: &str) -> LedgerResult<TxType> {
        match s {
            "Income" => Ok(TxType::Income),
            "Expense" => Ok(TxType::Expense),
            other => Err(LedgerError::validation(format!(
                "Type must be Income or Expense, got '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    pub r#type: TxType,
    pub created_at: String,
    pub updated_at: String,
}

/// The mutable fields of a transaction, as accepted on create and update.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    pub r#type: TxType,
}

impl TransactionDraft {
    /// Trims the description and checks field constraints, returning the
    /// draft ready for storage.
    pub fn validated(mut self) -> LedgerResult<TransactionDraft> {
        self.description = self.description.trim().to_string();
        if self.description.is_empty() || self.description.chars().count() > 200 {
            return Err(LedgerError::validation(
                "Description must be 1-200 characters",
            ));
        }
        if self.amount < Decimal::new(1, 2) {
            return Err(LedgerError::validation("Amount must be at least 0.01"));
        }
        if !is_known_category(&self.category) {
            return Err(LedgerError::validation(format!(
                "Unknown category '{}'",
                self.category
            )));
        }
        Ok(self)
    }
}
