// Copyright (c) 2025 Monthbook Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod balances;
pub mod budgets;
pub mod categories;
pub mod config;
pub mod goals;
pub mod records;
pub mod reports;
pub mod users;
