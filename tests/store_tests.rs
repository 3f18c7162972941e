// Copyright (c) 2025 Monthbook Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use monthbook::balance::{month_over_month_delta, total_balance};
use monthbook::commands::reports::{active_goals, balance_rows, budget_rows, record_rows};
use monthbook::models::RecordKind;
use monthbook::period::month_boundaries;
use monthbook::{db, report};
use rusqlite::{params, Connection};

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn.execute("INSERT INTO users(name) VALUES('alice')", []).unwrap();
    conn.execute("INSERT INTO users(name) VALUES('bob')", []).unwrap();
    conn
}

fn user_id(conn: &Connection, name: &str) -> i64 {
    conn.query_row("SELECT id FROM users WHERE name=?1", params![name], |r| {
        r.get(0)
    })
    .unwrap()
}

fn add_category(conn: &Connection, user: i64, name: &str, foreign: bool) -> i64 {
    conn.execute(
        "INSERT INTO categories(user_id, name, is_foreign_currency) VALUES(?1,?2,?3)",
        params![user, name, foreign as i64],
    )
    .unwrap();
    conn.last_insert_rowid()
}

#[test]
fn duplicate_category_per_user_rejected() {
    let conn = setup();
    let alice = user_id(&conn, "alice");
    let bob = user_id(&conn, "bob");
    add_category(&conn, alice, "Food", false);

    let dup = conn.execute(
        "INSERT INTO categories(user_id, name) VALUES(?1,'Food')",
        params![alice],
    );
    assert!(dup.is_err());

    // The failed insert corrupted nothing, and the same name is free for
    // another user.
    let n: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM categories WHERE user_id=?1 AND name='Food'",
            params![alice],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(n, 1);
    add_category(&conn, bob, "Food", false);
}

#[test]
fn category_name_capped_at_40_chars() {
    let conn = setup();
    let alice = user_id(&conn, "alice");
    let long = "x".repeat(41);
    let res = conn.execute(
        "INSERT INTO categories(user_id, name) VALUES(?1,?2)",
        params![alice, long],
    );
    assert!(res.is_err());
}

#[test]
fn budget_unique_per_category_and_month() {
    let conn = setup();
    let alice = user_id(&conn, "alice");
    let food = add_category(&conn, alice, "Food", false);
    for amount in [500, 700] {
        conn.execute(
            "INSERT INTO budgets(category_id, month, amount) VALUES(?1,'2025-03',?2)
             ON CONFLICT(category_id, month) DO UPDATE SET amount=excluded.amount",
            params![food, amount],
        )
        .unwrap();
    }
    let (n, amount): (i64, i64) = conn
        .query_row(
            "SELECT COUNT(*), MAX(amount) FROM budgets WHERE category_id=?1",
            params![food],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .unwrap();
    assert_eq!(n, 1);
    assert_eq!(amount, 700);
}

#[test]
fn record_rows_scoped_to_owner_and_window() {
    let conn = setup();
    let alice = user_id(&conn, "alice");
    let bob = user_id(&conn, "bob");
    let a_food = add_category(&conn, alice, "Food", false);
    let b_food = add_category(&conn, bob, "Food", false);

    let insert = |user: i64, cat: i64, date: &str, amount: i64| {
        conn.execute(
            "INSERT INTO records(user_id, category_id, kind, date, amount)
             VALUES(?1,?2,'expense',?3,?4)",
            params![user, cat, date, amount],
        )
        .unwrap();
    };
    insert(alice, a_food, "2025-03-10", 100);
    insert(alice, a_food, "2025-02-28", 40); // outside the window
    insert(bob, b_food, "2025-03-11", 999); // other owner, same category name

    let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    let window = month_boundaries(Some("2025-03"), today).unwrap();
    let rows = record_rows(&conn, alice, RecordKind::Expense, &window).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].amount, 100);
    assert_eq!(rows[0].category_id, a_food);
}

#[test]
fn expense_report_merges_budgets_from_storage() {
    let conn = setup();
    let alice = user_id(&conn, "alice");
    let food = add_category(&conn, alice, "Food", false);
    let gym = add_category(&conn, alice, "Gym", false);

    conn.execute(
        "INSERT INTO records(user_id, category_id, kind, date, amount)
         VALUES(?1,?2,'expense','2025-03-05',1234)",
        params![alice, food],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO budgets(category_id, month, amount) VALUES(?1,'2025-03',5000)",
        params![gym],
    )
    .unwrap();

    let today = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
    let window = month_boundaries(Some("2025-03"), today).unwrap();
    let records = record_rows(&conn, alice, RecordKind::Expense, &window).unwrap();
    let totals = report::aggregate_by_category(&records, Some(window.start));
    let budgets = budget_rows(&conn, alice, &window.token()).unwrap();
    let merged = report::merge_budgets(totals, &budgets, Some(window.start));

    assert_eq!(merged.len(), 2);
    let food_row = merged.iter().find(|t| t.category == "Food").unwrap();
    assert_eq!((food_row.total, food_row.budgeted), (1234, 0));
    let gym_row = merged.iter().find(|t| t.category == "Gym").unwrap();
    assert_eq!((gym_row.total, gym_row.budgeted), (0, 5000));
}

#[test]
fn balance_report_flow_with_foreign_category() {
    let conn = setup();
    let alice = user_id(&conn, "alice");
    let checking = add_category(&conn, alice, "Checking", false);
    let offshore = add_category(&conn, alice, "Offshore", true);

    let set = |cat: i64, month: &str, amount: i64| {
        conn.execute(
            "INSERT INTO balances(user_id, category_id, month, amount) VALUES(?1,?2,?3,?4)",
            params![alice, cat, month, amount],
        )
        .unwrap();
    };
    set(checking, "2025-02", 400);
    set(checking, "2025-03", 100);
    set(offshore, "2025-03", 50);

    let rate = 3;
    let current = balance_rows(&conn, alice, "2025-03").unwrap();
    let previous = balance_rows(&conn, alice, "2025-02").unwrap();
    let delta = month_over_month_delta(
        total_balance(&current, rate),
        total_balance(&previous, rate),
    );
    // 100 + 50*3 = 250 now, 400 before.
    assert_eq!(delta.total, 250);
    assert_eq!(delta.diff, -150);
    assert_eq!(
        delta.diff_percent,
        Some(rust_decimal::Decimal::new(-3750, 2)) // -37.50
    );
}

#[test]
fn active_goals_excludes_archived() {
    let conn = setup();
    let alice = user_id(&conn, "alice");
    conn.execute(
        "INSERT INTO goals(user_id, name, amount) VALUES(?1,'Bike',1000)",
        params![alice],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO goals(user_id, name, amount, is_archived) VALUES(?1,'Old',500,1)",
        params![alice],
    )
    .unwrap();
    let goals = active_goals(&conn, alice).unwrap();
    assert_eq!(goals.len(), 1);
    assert_eq!(goals[0].name, "Bike");
}

#[test]
fn schema_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("monthbook.sqlite");
    {
        let mut conn = Connection::open(&path).unwrap();
        db::init_schema(&mut conn).unwrap();
        conn.execute("INSERT INTO users(name) VALUES('alice')", []).unwrap();
    }
    let conn = Connection::open(&path).unwrap();
    let n: i64 = conn
        .query_row("SELECT COUNT(*) FROM users WHERE name='alice'", [], |r| {
            r.get(0)
        })
        .unwrap();
    assert_eq!(n, 1);
}
