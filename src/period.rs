// Copyright (c) 2025 Monthbook Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Calendar-month windows for report queries.
//!
//! Every report is scoped to one calendar month. The resolver turns an
//! optional `YYYY-MM` token (or "today" when the token is absent) into an
//! inclusive first-day/last-day window. Pure functions of their arguments;
//! the caller supplies "today".

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

static MONTH_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(19|20)\d\d-(0[1-9]|1[0-2])$").expect("month token regex"));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeriodError {
    #[error("Invalid month '{0}', expected YYYY-MM")]
    InvalidDateFormat(String),
}

/// Inclusive date range spanning exactly one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl MonthWindow {
    /// The window of the month `date` falls in.
    pub fn containing(date: NaiveDate) -> MonthWindow {
        // day 1 exists in every month
        let start = date.with_day(1).unwrap();
        MonthWindow {
            start,
            end: last_day_of_month(start.year(), start.month()),
        }
    }

    /// The window of the calendar month immediately before this one.
    pub fn previous(&self) -> MonthWindow {
        MonthWindow::containing(previous_month_first_day(self.start))
    }

    /// `YYYY-MM` token naming this window's month.
    pub fn token(&self) -> String {
        self.start.format("%Y-%m").to_string()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Resolves an optional `YYYY-MM` token into a month window.
///
/// With no token the window is `today`'s month. A token that does not match
/// `(19|20)\d\d-(0[1-9]|1[0-2])` is rejected with
/// [`PeriodError::InvalidDateFormat`].
pub fn month_boundaries(token: Option<&str>, today: NaiveDate) -> Result<MonthWindow, PeriodError> {
    let first = match token {
        None => today.with_day(1).unwrap(),
        Some(t) => parse_month_token(t)?,
    };
    Ok(MonthWindow {
        start: first,
        end: last_day_of_month(first.year(), first.month()),
    })
}

/// Parses a `YYYY-MM` token into the first day of that month.
pub fn parse_month_token(token: &str) -> Result<NaiveDate, PeriodError> {
    if !MONTH_TOKEN.is_match(token) {
        return Err(PeriodError::InvalidDateFormat(token.to_string()));
    }
    NaiveDate::parse_from_str(&format!("{}-01", token), "%Y-%m-%d")
        .map_err(|_| PeriodError::InvalidDateFormat(token.to_string()))
}

/// First day of the month before the one `date` falls in.
///
/// Day-of-month is discarded before stepping back, so day 31 in a 30-day
/// month can neither skip nor double-count a month. January rolls over to
/// the previous December.
pub fn previous_month_first_day(date: NaiveDate) -> NaiveDate {
    let (y, m) = if date.month() == 1 {
        (date.year() - 1, 12)
    } else {
        (date.year(), date.month() - 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1).unwrap()
}

fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let day = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => {
            if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
    };
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}
