// Copyright (c) 2025 Monthbook Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{current_user, fmt_amount, parse_amount, pretty_table};
use anyhow::{Context, Result};
use rusqlite::{params, Connection};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("archive", sub)) => archive(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    if amount <= 0 {
        anyhow::bail!("Goal amount must be positive");
    }
    let note = sub.get_one::<String>("note").map(|s| s.as_str()).unwrap_or("");
    let user_id = current_user(conn, sub)?;
    conn.execute(
        "INSERT INTO goals(user_id, name, amount, note) VALUES (?1,?2,?3,?4)",
        params![user_id, name, amount, note],
    )?;
    println!("Added goal '{}' targeting {}", name, fmt_amount(amount));
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = current_user(conn, sub)?;
    let include_archived = sub.get_flag("all");
    let mut sql =
        String::from("SELECT name, amount, note, is_archived FROM goals WHERE user_id=?1");
    if !include_archived {
        sql.push_str(" AND is_archived=0");
    }
    sql.push_str(" ORDER BY id");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![user_id], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, i64>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, bool>(3)?,
        ))
    })?;
    let mut data = Vec::new();
    for row in rows {
        let (name, amount, note, archived) = row?;
        data.push(vec![
            name,
            fmt_amount(amount),
            note,
            if archived { "yes" } else { "" }.to_string(),
        ]);
    }
    println!("{}", pretty_table(&["Goal", "Target", "Note", "Archived"], data));
    Ok(())
}

fn archive(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let user_id = current_user(conn, sub)?;
    let n = conn
        .execute(
            "UPDATE goals SET is_archived=1 WHERE user_id=?1 AND name=?2",
            params![user_id, name],
        )
        .with_context(|| format!("Goal '{}' not found", name))?;
    if n == 0 {
        anyhow::bail!("Goal '{}' not found", name);
    }
    println!("Archived goal '{}'", name);
    Ok(())
}
