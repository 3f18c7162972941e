// Copyright (c) 2025 Monthbook Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::balance::{goal_projection, month_over_month_delta, total_balance, BalanceSlice};
use crate::models::{Goal, RecordKind};
use crate::period::{month_boundaries, MonthWindow};
use crate::report::{aggregate_by_category, merge_budgets, BudgetSlice, RecordSlice};
use crate::utils::{
    current_user, fmt_amount, get_exchange_rate, get_foreign_label, maybe_print_json, pretty_table,
};
use anyhow::Result;
use rusqlite::{params, Connection};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("expenses", sub)) => expenses(conn, sub)?,
        Some(("incomes", sub)) => incomes(conn, sub)?,
        Some(("balance", sub)) => balance(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// Resolves `--month` (or the current month) into a window. The clock is
/// read here, never inside the aggregation code.
fn resolve_window(sub: &clap::ArgMatches) -> Result<MonthWindow> {
    let token = sub.get_one::<String>("month").map(|s| s.as_str());
    let today = chrono::Utc::now().date_naive();
    Ok(month_boundaries(token, today)?)
}

/// Expense or income rows for one user inside one month window.
pub fn record_rows(
    conn: &Connection,
    user_id: i64,
    kind: RecordKind,
    window: &MonthWindow,
) -> Result<Vec<RecordSlice>> {
    let mut stmt = conn.prepare(
        "SELECT r.category_id, c.name, r.amount
         FROM records r JOIN categories c ON r.category_id=c.id
         WHERE r.user_id=?1 AND r.kind=?2 AND r.date>=?3 AND r.date<=?4",
    )?;
    let rows = stmt.query_map(
        params![
            user_id,
            kind.as_str(),
            window.start.to_string(),
            window.end.to_string()
        ],
        |r| {
            Ok(RecordSlice {
                category_id: r.get(0)?,
                category: r.get(1)?,
                amount: r.get(2)?,
            })
        },
    )?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// Budget rows for one user and month.
pub fn budget_rows(conn: &Connection, user_id: i64, month: &str) -> Result<Vec<BudgetSlice>> {
    let mut stmt = conn.prepare(
        "SELECT b.category_id, c.name, b.amount
         FROM budgets b JOIN categories c ON b.category_id=c.id
         WHERE c.user_id=?1 AND b.month=?2",
    )?;
    let rows = stmt.query_map(params![user_id, month], |r| {
        Ok(BudgetSlice {
            category_id: r.get(0)?,
            category: r.get(1)?,
            amount: r.get(2)?,
        })
    })?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// Balance snapshot rows for one user and month.
pub fn balance_rows(conn: &Connection, user_id: i64, month: &str) -> Result<Vec<BalanceSlice>> {
    let mut stmt = conn.prepare(
        "SELECT b.amount, c.is_foreign_currency
         FROM balances b JOIN categories c ON b.category_id=c.id
         WHERE b.user_id=?1 AND b.month=?2",
    )?;
    let rows = stmt.query_map(params![user_id, month], |r| {
        Ok(BalanceSlice {
            amount: r.get(0)?,
            is_foreign_currency: r.get(1)?,
        })
    })?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn active_goals(conn: &Connection, user_id: i64) -> Result<Vec<Goal>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, name, amount, note, is_archived
         FROM goals WHERE user_id=?1 AND is_archived=0 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![user_id], |r| {
        Ok(Goal {
            id: r.get(0)?,
            user_id: r.get(1)?,
            name: r.get(2)?,
            amount: r.get(3)?,
            note: r.get(4)?,
            is_archived: r.get(5)?,
        })
    })?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

fn expenses(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user_id = current_user(conn, sub)?;
    let window = resolve_window(sub)?;

    let records = record_rows(conn, user_id, RecordKind::Expense, &window)?;
    let totals = aggregate_by_category(&records, Some(window.start));
    let budgets = budget_rows(conn, user_id, &window.token())?;
    let merged = merge_budgets(totals, &budgets, Some(window.start));

    if !maybe_print_json(json_flag, jsonl_flag, &merged)? {
        let spent: i64 = merged.iter().map(|t| t.total).sum();
        let rows: Vec<Vec<String>> = merged
            .iter()
            .map(|t| {
                vec![
                    t.category.clone(),
                    fmt_amount(t.total),
                    fmt_amount(t.budgeted),
                ]
            })
            .collect();
        println!("Expenses for {}", window.token());
        println!("{}", pretty_table(&["Category", "Spent", "Budgeted"], rows));
        println!("Total spent: {}", fmt_amount(spent));
    }
    Ok(())
}

fn incomes(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user_id = current_user(conn, sub)?;
    let window = resolve_window(sub)?;

    let records = record_rows(conn, user_id, RecordKind::Income, &window)?;
    let totals = aggregate_by_category(&records, Some(window.start));

    if !maybe_print_json(json_flag, jsonl_flag, &totals)? {
        let received: i64 = totals.iter().map(|t| t.total).sum();
        let rows: Vec<Vec<String>> = totals
            .iter()
            .map(|t| vec![t.category.clone(), fmt_amount(t.total)])
            .collect();
        println!("Incomes for {}", window.token());
        println!("{}", pretty_table(&["Category", "Amount"], rows));
        println!("Total income: {}", fmt_amount(received));
    }
    Ok(())
}

#[derive(Serialize)]
struct BalanceReport {
    month: String,
    total: String,
    diff: String,
    diff_percent: Option<String>,
    goals: Vec<GoalRow>,
}

#[derive(Serialize)]
struct GoalRow {
    name: String,
    target: String,
    months_to_go: Option<i64>,
}

fn balance(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user_id = current_user(conn, sub)?;
    let window = resolve_window(sub)?;
    let previous = window.previous();
    let rate = get_exchange_rate(conn)?;

    let current_rows = balance_rows(conn, user_id, &window.token())?;
    let previous_rows = balance_rows(conn, user_id, &previous.token())?;
    let delta = month_over_month_delta(
        total_balance(&current_rows, rate),
        total_balance(&previous_rows, rate),
    );
    let goals = active_goals(conn, user_id)?;
    let projections = goal_projection(&goals, delta.total, delta.diff);

    let report = BalanceReport {
        month: window.token(),
        total: fmt_amount(delta.total),
        diff: fmt_amount(delta.diff),
        diff_percent: delta.diff_percent.map(|p| format!("{:.2}", p)),
        goals: projections
            .iter()
            .map(|p| GoalRow {
                name: p.name.clone(),
                target: fmt_amount(p.amount),
                months_to_go: p.months_to_go,
            })
            .collect(),
    };

    if !maybe_print_json(json_flag, jsonl_flag, &report)? {
        let label = get_foreign_label(conn)?;
        println!("Balance for {}", report.month);
        println!(
            "  Total: {} (foreign '{}' at rate {})",
            report.total, label, rate
        );
        match &report.diff_percent {
            Some(p) => println!("  Change vs {}: {} ({}%)", previous.token(), report.diff, p),
            None => println!("  Change vs {}: {}", previous.token(), report.diff),
        }
        if !report.goals.is_empty() {
            let rows: Vec<Vec<String>> = report
                .goals
                .iter()
                .map(|g| {
                    let left = match g.months_to_go {
                        Some(0) => "reached".to_string(),
                        Some(n) => format!("{} months", n),
                        None => "-".to_string(),
                    };
                    vec![g.name.clone(), g.target.clone(), left]
                })
                .collect();
            println!("{}", pretty_table(&["Goal", "Target", "To go"], rows));
        }
    }
    Ok(())
}
