// Copyright (c) 2025 Monthbook Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use monthbook::period::{month_boundaries, previous_month_first_day, MonthWindow, PeriodError};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn leap_year_february() {
    let w = month_boundaries(Some("2020-02"), d(1999, 1, 1)).unwrap();
    assert_eq!(w.start, d(2020, 2, 1));
    assert_eq!(w.end, d(2020, 2, 29));
}

#[test]
fn regular_february() {
    let w = month_boundaries(Some("2021-02"), d(1999, 1, 1)).unwrap();
    assert_eq!(w.end, d(2021, 2, 28));
}

#[test]
fn century_leap_rules() {
    // 2000 is a leap year (divisible by 400); 1900 is not.
    assert_eq!(
        month_boundaries(Some("2000-02"), d(1999, 1, 1)).unwrap().end,
        d(2000, 2, 29)
    );
    assert_eq!(
        month_boundaries(Some("1900-02"), d(1999, 1, 1)).unwrap().end,
        d(1900, 2, 28)
    );
}

#[test]
fn end_is_last_day_of_start_month() {
    for token in [
        "1999-01", "2020-02", "2021-02", "2023-04", "2023-06", "2023-07", "2023-09", "2023-11",
        "2023-12", "2099-08",
    ] {
        let w = month_boundaries(Some(token), d(2000, 6, 15)).unwrap();
        assert_eq!(w.start.day(), 1, "{}", token);
        assert_eq!(w.end.month(), w.start.month(), "{}", token);
        // The day after the window end is the first of the following month,
        // and stepping back from it lands on this window's start.
        let next = w.end.succ_opt().unwrap();
        assert_eq!(next.day(), 1, "{}", token);
        assert_eq!(previous_month_first_day(next), w.start, "{}", token);
    }
}

#[test]
fn no_token_uses_todays_month() {
    let w = month_boundaries(None, d(2024, 7, 15)).unwrap();
    assert_eq!(w.start, d(2024, 7, 1));
    assert_eq!(w.end, d(2024, 7, 31));
}

#[test]
fn malformed_tokens_rejected() {
    for bad in [
        "2020-13", "2020-00", "20-01", "2020-1", "2150-05", "1899-12", "abcd-ef", "2020/02",
        "2020-02-01", "",
    ] {
        let err = month_boundaries(Some(bad), d(2024, 1, 1)).unwrap_err();
        assert_eq!(err, PeriodError::InvalidDateFormat(bad.to_string()));
    }
}

#[test]
fn previous_month_rolls_over_year() {
    assert_eq!(previous_month_first_day(d(2020, 1, 1)), d(2019, 12, 1));
}

#[test]
fn previous_month_ignores_day_of_month() {
    // Day 31 stepping into a 30-day month must not skip or double a month.
    assert_eq!(previous_month_first_day(d(2021, 7, 31)), d(2021, 6, 1));
    assert_eq!(previous_month_first_day(d(2021, 3, 31)), d(2021, 2, 1));
    assert_eq!(previous_month_first_day(d(2021, 5, 15)), d(2021, 4, 1));
}

#[test]
fn window_previous_is_prior_month() {
    let w = MonthWindow::containing(d(2020, 3, 15));
    let p = w.previous();
    assert_eq!(p.start, d(2020, 2, 1));
    assert_eq!(p.end, d(2020, 2, 29));
    assert_eq!(p.token(), "2020-02");
}

#[test]
fn window_contains_bounds() {
    let w = MonthWindow::containing(d(2023, 11, 20));
    assert!(w.contains(d(2023, 11, 1)));
    assert!(w.contains(d(2023, 11, 30)));
    assert!(!w.contains(d(2023, 10, 31)));
    assert!(!w.contains(d(2023, 12, 1)));
}
