// Copyright (c) 2025 Monthbook Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Per-category aggregation for the monthly expense/income report.
//!
//! Callers fetch the records for one user and one month window, then reduce
//! them here. Amounts are integer minor units. Grouping is keyed by category
//! id; the display name rides along as an attribute, so two users' identically
//! named categories can never collide even if a caller forgets to pre-filter.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// One expense or income row, already scoped to a single user and window.
#[derive(Debug, Clone)]
pub struct RecordSlice {
    pub category_id: i64,
    pub category: String,
    pub amount: i64,
}

/// Aggregated position of one category for the reported month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category_id: i64,
    pub category: String,
    /// Sum of positive record amounts, minor units.
    pub total: i64,
    /// Monthly budget for the category, 0 until a budget row is merged in.
    pub budgeted: i64,
    /// First day of the reported month, constant across the result.
    pub date: Option<NaiveDate>,
}

/// Sums records per category, skipping non-positive amounts.
///
/// Zero and negative rows (refunds, corrections) may exist in storage but are
/// kept out of the displayed totals. Output is ordered by category name, then
/// id, so repeated calls over the same input are identical.
pub fn aggregate_by_category(records: &[RecordSlice], date: Option<NaiveDate>) -> Vec<CategoryTotal> {
    let mut by_id: BTreeMap<i64, CategoryTotal> = BTreeMap::new();
    for r in records {
        if r.amount <= 0 {
            continue;
        }
        by_id
            .entry(r.category_id)
            .and_modify(|t| t.total += r.amount)
            .or_insert_with(|| CategoryTotal {
                category_id: r.category_id,
                category: r.category.clone(),
                total: r.amount,
                budgeted: 0,
                date,
            });
    }
    let mut out: Vec<CategoryTotal> = by_id.into_values().collect();
    sort_totals(&mut out);
    out
}

/// One monthly budget row for the reported month.
#[derive(Debug, Clone)]
pub struct BudgetSlice {
    pub category_id: i64,
    pub category: String,
    pub amount: i64,
}

/// Folds budget rows into an expense aggregate.
///
/// A budget whose category already appears replaces its default `budgeted` of
/// 0; a budget for a category with no expenses that month gains an entry with
/// `total: 0`.
pub fn merge_budgets(
    mut totals: Vec<CategoryTotal>,
    budgets: &[BudgetSlice],
    date: Option<NaiveDate>,
) -> Vec<CategoryTotal> {
    for b in budgets {
        match totals.iter_mut().find(|t| t.category_id == b.category_id) {
            Some(t) => t.budgeted = b.amount,
            None => totals.push(CategoryTotal {
                category_id: b.category_id,
                category: b.category.clone(),
                total: 0,
                budgeted: b.amount,
                date,
            }),
        }
    }
    sort_totals(&mut totals);
    totals
}

fn sort_totals(totals: &mut [CategoryTotal]) {
    totals.sort_by(|a, b| {
        a.category
            .cmp(&b.category)
            .then(a.category_id.cmp(&b.category_id))
    });
}
