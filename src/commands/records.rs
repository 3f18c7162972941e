// Copyright (c) 2025 Monthbook Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::RecordKind;
use crate::period::month_boundaries;
use crate::utils::{
    current_user, fmt_amount, id_for_category, maybe_print_json, parse_amount, parse_date,
    pretty_table,
};
use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use serde::Serialize;

pub fn handle(conn: &Connection, kind: RecordKind, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, kind, sub)?,
        Some(("list", sub)) => list(conn, kind, sub)?,
        Some(("rm", sub)) => rm(conn, kind, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, kind: RecordKind, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    if amount <= 0 {
        anyhow::bail!("Amount must be positive");
    }
    let note = sub.get_one::<String>("note").map(|s| s.to_string());
    let user_id = current_user(conn, sub)?;
    let category_id = id_for_category(conn, user_id, category)?;

    conn.execute(
        "INSERT INTO records(user_id, category_id, kind, date, amount, note)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            user_id,
            category_id,
            kind.as_str(),
            date.to_string(),
            amount,
            note
        ],
    )?;
    println!(
        "{} {} recorded on {} in '{}'",
        kind.noun(),
        fmt_amount(amount),
        date,
        category
    );
    Ok(())
}

#[derive(Serialize)]
pub struct RecordRow {
    pub id: i64,
    pub date: String,
    pub category: String,
    pub amount: String,
    pub note: String,
}

fn list(conn: &Connection, kind: RecordKind, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user_id = current_user(conn, sub)?;

    let mut sql = String::from(
        "SELECT r.id, r.date, c.name, r.amount, r.note
         FROM records r JOIN categories c ON r.category_id=c.id
         WHERE r.user_id=?1 AND r.kind=?2",
    );
    let mut bind: Vec<String> = vec![user_id.to_string(), kind.as_str().to_string()];
    if let Some(month) = sub.get_one::<String>("month") {
        let today = chrono::Utc::now().date_naive();
        let window = month_boundaries(Some(month), today)?;
        sql.push_str(" AND r.date>=? AND r.date<=?");
        bind.push(window.start.to_string());
        bind.push(window.end.to_string());
    }
    sql.push_str(" ORDER BY r.date DESC, r.id DESC");

    let mut stmt = conn.prepare(&sql)?;
    let binds: Vec<&dyn rusqlite::ToSql> = bind.iter().map(|s| s as &dyn rusqlite::ToSql).collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(binds))?;

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let note: Option<String> = r.get(4)?;
        data.push(RecordRow {
            id: r.get(0)?,
            date: r.get(1)?,
            category: r.get(2)?,
            amount: fmt_amount(r.get(3)?),
            note: note.unwrap_or_default(),
        });
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.note.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Date", "Category", "Amount", "Note"], rows)
        );
    }
    Ok(())
}

fn rm(conn: &Connection, kind: RecordKind, sub: &clap::ArgMatches) -> Result<()> {
    let id: i64 = sub
        .get_one::<String>("id")
        .unwrap()
        .parse()
        .context("Invalid record id")?;
    let user_id = current_user(conn, sub)?;
    // Owner scoping in the WHERE clause: a user cannot delete another
    // user's record even by guessing its id.
    let n = conn.execute(
        "DELETE FROM records WHERE id=?1 AND user_id=?2 AND kind=?3",
        params![id, user_id, kind.as_str()],
    )?;
    if n == 0 {
        anyhow::bail!("{} {} not found", kind.noun(), id);
    }
    println!("Deleted {} {}", kind.as_str(), id);
    Ok(())
}
