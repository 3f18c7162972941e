// Copyright (c) 2025 Monthbook Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Multi-currency balance totals, month-over-month movement, and savings-goal
//! projection.
//!
//! Balances are monthly snapshots per category. A category is either domestic
//! or foreign; foreign amounts are normalized through one fixed integer
//! exchange rate supplied by the caller. Everything here is a pure function,
//! and every division site is guarded.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::Goal;

/// One balance snapshot row for a single user and month.
#[derive(Debug, Clone)]
pub struct BalanceSlice {
    /// Minor units in the category's own currency.
    pub amount: i64,
    pub is_foreign_currency: bool,
}

/// Sums snapshots for one month, normalizing foreign amounts at `rate`.
///
/// Returns `None` for an empty snapshot set; "no data for this month" is a
/// different answer than "balances sum to zero" and callers branch on it.
pub fn total_balance(records: &[BalanceSlice], rate: i64) -> Option<i64> {
    if records.is_empty() {
        return None;
    }
    Some(
        records
            .iter()
            .map(|r| {
                if r.is_foreign_currency {
                    r.amount * rate
                } else {
                    r.amount
                }
            })
            .sum(),
    )
}

/// Movement of the total balance between two consecutive months.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthDelta {
    /// Current month's total, 0 when the month has no snapshots.
    pub total: i64,
    pub diff: i64,
    /// Percent change over the previous month, `None` when there is no
    /// non-zero baseline to divide by.
    pub diff_percent: Option<Decimal>,
}

/// Compares this month's total against last month's.
///
/// Three baselines are distinguished and must stay distinct: no current data
/// at all, a previous month that is missing or exactly zero, and a populated
/// previous month. Only the last one yields a percentage.
pub fn month_over_month_delta(current: Option<i64>, previous: Option<i64>) -> MonthDelta {
    let Some(total) = current else {
        return MonthDelta {
            total: 0,
            diff: 0,
            diff_percent: Some(Decimal::ZERO),
        };
    };
    match previous {
        None | Some(0) => MonthDelta {
            total,
            diff: total,
            diff_percent: None,
        },
        Some(prev) => {
            let pct = (Decimal::from(total) * Decimal::from(100) / Decimal::from(prev)
                - Decimal::from(100))
            .round_dp(2);
            MonthDelta {
                total,
                diff: total - prev,
                diff_percent: Some(pct),
            }
        }
    }
}

/// A goal annotated with its estimated time to completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoalProjection {
    pub goal_id: i64,
    pub name: String,
    /// Target amount, minor units.
    pub amount: i64,
    /// `Some(0)` when already reached, `None` when the recent trend is flat
    /// or negative and no finish date can be projected.
    pub months_to_go: Option<i64>,
}

/// Projects months-to-completion for each active goal from the last
/// month-over-month gain.
///
/// Archived goals are skipped; input order is preserved otherwise. The goal
/// records themselves are never mutated, the projection is a transient
/// annotation.
pub fn goal_projection(goals: &[Goal], current_total: i64, delta: i64) -> Vec<GoalProjection> {
    goals
        .iter()
        .filter(|g| !g.is_archived)
        .map(|g| {
            let months_to_go = if current_total >= g.amount {
                Some(0)
            } else if delta <= 0 {
                None
            } else {
                Some((g.amount - current_total + delta - 1) / delta)
            };
            GoalProjection {
                goal_id: g.id,
                name: g.name.clone(),
                amount: g.amount,
                months_to_go,
            }
        })
        .collect()
}
