// Copyright (c) 2025 Monthbook Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{
    current_user, fmt_amount, id_for_category, parse_amount, parse_month, pretty_table,
};
use anyhow::Result;
use rusqlite::{params, Connection};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let month = parse_month(sub.get_one::<String>("month").unwrap().trim())?;
    let cat = sub.get_one::<String>("category").unwrap();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let user_id = current_user(conn, sub)?;
    let cat_id = id_for_category(conn, user_id, cat)?;
    // One snapshot per (category, month); setting again is an update.
    conn.execute(
        "INSERT INTO balances(user_id, category_id, month, amount) VALUES (?1,?2,?3,?4)
         ON CONFLICT(category_id, month) DO UPDATE SET amount=excluded.amount",
        params![user_id, cat_id, month, amount],
    )?;
    println!("Balance for {} / {} = {}", month, cat, fmt_amount(amount));
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = current_user(conn, sub)?;
    let mut sql = String::from(
        "SELECT b.month, c.name, c.is_foreign_currency, b.amount FROM balances b
         JOIN categories c ON b.category_id=c.id WHERE b.user_id=?1",
    );
    let mut bind: Vec<String> = vec![user_id.to_string()];
    if let Some(month) = sub.get_one::<String>("month") {
        sql.push_str(" AND b.month=?");
        bind.push(parse_month(month)?);
    }
    sql.push_str(" ORDER BY b.month DESC, c.name");
    let mut stmt = conn.prepare(&sql)?;
    let binds: Vec<&dyn rusqlite::ToSql> = bind.iter().map(|s| s as &dyn rusqlite::ToSql).collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(binds))?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let foreign: bool = r.get(2)?;
        data.push(vec![
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            if foreign { "foreign" } else { "domestic" }.to_string(),
            fmt_amount(r.get(3)?),
        ]);
    }
    println!(
        "{}",
        pretty_table(&["Month", "Category", "Currency", "Amount"], data)
    );
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let month = parse_month(sub.get_one::<String>("month").unwrap().trim())?;
    let cat = sub.get_one::<String>("category").unwrap();
    let user_id = current_user(conn, sub)?;
    let cat_id = id_for_category(conn, user_id, cat)?;
    let n = conn.execute(
        "DELETE FROM balances WHERE category_id=?1 AND month=?2 AND user_id=?3",
        params![cat_id, month, user_id],
    )?;
    if n == 0 {
        anyhow::bail!("No balance for {} / {}", month, cat);
    }
    println!("Removed balance for {} / {}", month, cat);
    Ok(())
}
