// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failures surfaced by the ledger core.
///
/// A record that exists but belongs to a different user reports `NotFound`,
/// same as a record that does not exist at all.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error("storage error")]
    Storage(#[from] rusqlite::Error),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

impl LedgerError {
    pub fn validation(msg: impl Into<String>) -> Self {
        LedgerError::Validation(msg.into())
    }
}
