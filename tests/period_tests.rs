// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use coinkeeper::period::{self, Period};

fn bounded(y1: i32, m1: u32, d1: u32, y2: i32, m2: u32, d2: u32) -> Period {
    Period::Bounded {
        start: NaiveDate::from_ymd_opt(y1, m1, d1).unwrap(),
        end: NaiveDate::from_ymd_opt(y2, m2, d2).unwrap(),
    }
}

#[test]
fn february_end_tracks_leap_years() {
    assert_eq!(
        period::resolve(Some(2), Some(2024)),
        bounded(2024, 2, 1, 2024, 2, 29)
    );
    assert_eq!(
        period::resolve(Some(2), Some(2023)),
        bounded(2023, 2, 1, 2023, 2, 28)
    );
}

#[test]
fn month_lengths_resolve_without_off_by_one() {
    assert_eq!(
        period::resolve(Some(4), Some(2025)),
        bounded(2025, 4, 1, 2025, 4, 30)
    );
    assert_eq!(
        period::resolve(Some(12), Some(2025)),
        bounded(2025, 12, 1, 2025, 12, 31)
    );
    assert_eq!(
        period::resolve(Some(1), Some(2025)),
        bounded(2025, 1, 1, 2025, 1, 31)
    );
}

#[test]
fn year_only_spans_whole_calendar_year() {
    assert_eq!(
        period::resolve(None, Some(2023)),
        bounded(2023, 1, 1, 2023, 12, 31)
    );
}

#[test]
fn absent_parameters_mean_no_date_bound() {
    assert_eq!(period::resolve(None, None), Period::AllTime);
    // A month without a year cannot name a range.
    assert_eq!(period::resolve(Some(5), None), Period::AllTime);
}

#[test]
fn unrepresentable_input_resolves_all_time() {
    assert_eq!(period::resolve(Some(13), Some(2024)), Period::AllTime);
    assert_eq!(period::resolve(Some(0), Some(2024)), Period::AllTime);
}

#[test]
fn labels_follow_request_shape() {
    assert_eq!(period::label(Some(3), Some(2024)), "3/2024");
    assert_eq!(period::label(None, Some(2024)), "2024");
    assert_eq!(period::label(None, None), "All time");
    assert_eq!(period::label(Some(7), None), "All time");
}
