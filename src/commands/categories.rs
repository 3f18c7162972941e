// Copyright (c) 2025 Monthbook Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{current_user, id_for_category, pretty_table};
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
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    if name.is_empty() || name.len() > 40 {
        anyhow::bail!("Category name must be 1-40 characters");
    }
    let foreign = sub.get_flag("foreign");
    let user_id = current_user(conn, sub)?;
    // UNIQUE(user_id, name) rejects the duplicate and leaves the existing
    // row untouched.
    conn.execute(
        "INSERT INTO categories(user_id, name, is_foreign_currency) VALUES (?1, ?2, ?3)",
        params![user_id, name, foreign as i64],
    )
    .with_context(|| format!("Category '{}' already exists for this user", name))?;
    println!("Added category '{}'", name);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = current_user(conn, sub)?;
    let include_archived = sub.get_flag("all");
    let mut sql = String::from(
        "SELECT name, is_foreign_currency, is_archived FROM categories WHERE user_id=?1",
    );
    if !include_archived {
        sql.push_str(" AND is_archived=0");
    }
    sql.push_str(" ORDER BY name");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![user_id], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, bool>(1)?,
            r.get::<_, bool>(2)?,
        ))
    })?;
    let mut data = Vec::new();
    for row in rows {
        let (name, foreign, archived) = row?;
        data.push(vec![
            name,
            if foreign { "foreign" } else { "domestic" }.to_string(),
            if archived { "yes" } else { "" }.to_string(),
        ]);
    }
    println!("{}", pretty_table(&["Category", "Currency", "Archived"], data));
    Ok(())
}

fn archive(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let user_id = current_user(conn, sub)?;
    let cat_id = id_for_category(conn, user_id, name)?;
    conn.execute(
        "UPDATE categories SET is_archived=1 WHERE id=?1",
        params![cat_id],
    )?;
    println!("Archived category '{}'", name);
    Ok(())
}
