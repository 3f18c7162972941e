// Copyright (c) 2025 Monthbook Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{
    get_default_user, get_exchange_rate, get_foreign_label, id_for_user, pretty_table,
    set_default_user, set_exchange_rate, set_foreign_label,
};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-rate", sub)) => {
            let rate: i64 = sub
                .get_one::<String>("rate")
                .unwrap()
                .parse()
                .context("Exchange rate must be an integer")?;
            if rate <= 0 {
                anyhow::bail!("Exchange rate must be positive");
            }
            set_exchange_rate(conn, rate)?;
            println!("Exchange rate set to {}", rate);
        }
        Some(("set-currency", sub)) => {
            let label = sub.get_one::<String>("label").unwrap();
            set_foreign_label(conn, label)?;
            println!("Foreign currency label set to '{}'", label);
        }
        Some(("set-user", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            id_for_user(conn, name)?;
            set_default_user(conn, name)?;
            println!("Default user set to '{}'", name);
        }
        Some(("show", _)) => {
            let rows = vec![
                vec![
                    "exchange_rate".to_string(),
                    get_exchange_rate(conn)?.to_string(),
                ],
                vec!["foreign_currency".to_string(), get_foreign_label(conn)?],
                vec![
                    "default_user".to_string(),
                    get_default_user(conn)?.unwrap_or_default(),
                ],
            ];
            println!("{}", pretty_table(&["Setting", "Value"], rows));
        }
        _ => {}
    }
    Ok(())
}
