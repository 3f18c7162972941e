// Copyright (c) 2025 Monthbook Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub is_archived: bool,
    /// Balances in this category are held in the foreign currency.
    pub is_foreign_currency: bool,
}

/// Whether a monetary record is money out or money in. The two share one
/// table and one aggregation path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Expense,
    Income,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Expense => "expense",
            RecordKind::Income => "income",
        }
    }

    pub fn noun(&self) -> &'static str {
        match self {
            RecordKind::Expense => "Expense",
            RecordKind::Income => "Income",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonetaryRecord {
    pub id: i64,
    pub user_id: i64,
    pub category_id: i64,
    pub date: NaiveDate,
    /// Minor currency units.
    pub amount: i64,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub category_id: i64,
    pub month: String, // YYYY-MM
    pub amount: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    pub id: i64,
    pub user_id: i64,
    pub category_id: i64,
    pub month: String, // YYYY-MM
    pub amount: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    /// Target balance, minor units.
    pub amount: i64,
    pub note: String,
    pub is_archived: bool,
}
