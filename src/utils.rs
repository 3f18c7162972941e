// Copyright (c) 2025 Monthbook Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::period;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Validates a `YYYY-MM` month token and returns it unchanged.
pub fn parse_month(s: &str) -> Result<String> {
    period::parse_month_token(s)?;
    Ok(s.to_string())
}

/// Parses a decimal amount string into integer minor units ("12.34" -> 1234).
pub fn parse_amount(s: &str) -> Result<i64> {
    let d = s
        .parse::<Decimal>()
        .with_context(|| format!("Invalid amount '{}'", s))?;
    let minor = d * Decimal::from(100);
    if minor.fract() != Decimal::ZERO {
        anyhow::bail!("Invalid amount '{}': more than two decimal places", s);
    }
    minor
        .to_i64()
        .with_context(|| format!("Amount '{}' out of range", s))
}

pub fn fmt_amount(minor: i64) -> String {
    format!("{:.2}", Decimal::new(minor, 2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

pub fn id_for_user(conn: &Connection, name: &str) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT id FROM users WHERE name=?1")?;
    let id: i64 = stmt
        .query_row(params![name], |r| r.get(0))
        .with_context(|| format!("User '{}' not found", name))?;
    Ok(id)
}

pub fn id_for_category(conn: &Connection, user_id: i64, name: &str) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT id FROM categories WHERE user_id=?1 AND name=?2")?;
    let id: i64 = stmt
        .query_row(params![user_id, name], |r| r.get(0))
        .with_context(|| format!("Category '{}' not found", name))?;
    Ok(id)
}

/// Resolves the acting user from `--user`, falling back to the configured
/// default.
pub fn current_user(conn: &Connection, m: &clap::ArgMatches) -> Result<i64> {
    if let Some(name) = m.get_one::<String>("user") {
        return id_for_user(conn, name);
    }
    let name = get_default_user(conn)?
        .context("No --user given and no default user configured (try 'config set-user')")?;
    id_for_user(conn, &name)
}

fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

// Exchange rate and currency settings. One fixed integer rate converts
// foreign-currency balances to the domestic currency.
pub fn get_exchange_rate(conn: &Connection) -> Result<i64> {
    match get_setting(conn, "exchange_rate")? {
        Some(s) => s
            .parse::<i64>()
            .with_context(|| format!("Invalid stored exchange rate '{}'", s)),
        None => Ok(1),
    }
}

pub fn set_exchange_rate(conn: &Connection, rate: i64) -> Result<()> {
    set_setting(conn, "exchange_rate", &rate.to_string())
}

pub fn get_foreign_label(conn: &Connection) -> Result<String> {
    Ok(get_setting(conn, "foreign_currency")?.unwrap_or_else(|| "FX".to_string()))
}

pub fn set_foreign_label(conn: &Connection, label: &str) -> Result<()> {
    set_setting(conn, "foreign_currency", label)
}

pub fn get_default_user(conn: &Connection) -> Result<Option<String>> {
    get_setting(conn, "default_user")
}

pub fn set_default_user(conn: &Connection, name: &str) -> Result<()> {
    set_setting(conn, "default_user", name)
}
