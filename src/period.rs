// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;

/// Inclusive date range derived from optional month/year parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    AllTime,
    Bounded { start: NaiveDate, end: NaiveDate },
}

impl Period {
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            Period::AllTime => None,
            Period::Bounded { start, end } => Some((*start, *end)),
        }
    }
}

/// Resolves month/year request parameters to a date range.
///
/// month+year spans that calendar month, year alone spans Jan 1 to Dec 31,
/// neither means no date constraint. Total: inputs that do not name a
/// representable date resolve to `AllTime` rather than failing.
pub fn resolve(month: Option<u32>, year: Option<i32>) -> Period {
    match (month, year) {
        (Some(m), Some(y)) => {
            let start = NaiveDate::from_ymd_opt(y, m, 1);
            let end = start.and_then(|_| NaiveDate::from_ymd_opt(y, m, last_day_of_month(y, m)));
            match (start, end) {
                (Some(start), Some(end)) => Period::Bounded { start, end },
                _ => Period::AllTime,
            }
        }
        (_, Some(y)) => {
            let start = NaiveDate::from_ymd_opt(y, 1, 1);
            let end = NaiveDate::from_ymd_opt(y, 12, 31);
            match (start, end) {
                (Some(start), Some(end)) => Period::Bounded { start, end },
                _ => Period::AllTime,
            }
        }
        _ => Period::AllTime,
    }
}

/// Human label for the effective period, mirroring the summary payloads.
pub fn label(month: Option<u32>, year: Option<i32>) -> String {
    match (month, year) {
        (Some(m), Some(y)) => format!("{}/{}", m, y),
        (_, Some(y)) => y.to_string(),
        _ => "All time".to_string(),
    }
}

fn last_day_of_month(y: i32, m: u32) -> u32 {
    match m {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if NaiveDate::from_ymd_opt(y, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}
