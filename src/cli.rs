// Copyright (c) 2025 Monthbook Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command};

fn user_arg() -> Arg {
    Arg::new("user")
        .long("user")
        .value_name("NAME")
        .help("Act as this user (defaults to the configured default user)")
}

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .value_name("YYYY-MM")
        .help("Month to report on (defaults to the current month)")
}

fn with_json(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print result as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print result as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("monthbook")
        .about("Monthly expense, budget, balance, and savings-goal tracker")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Create the database and schema"))
        .subcommand(
            Command::new("user")
                .about("Manage users")
                .subcommand(
                    Command::new("add")
                        .about("Add a user")
                        .arg(Arg::new("name").required(true)),
                )
                .subcommand(Command::new("list").about("List users")),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(
                    Command::new("add")
                        .about("Add a category")
                        .arg(Arg::new("name").required(true))
                        .arg(
                            Arg::new("foreign")
                                .long("foreign")
                                .action(ArgAction::SetTrue)
                                .help("Balances in this category are foreign-currency"),
                        )
                        .arg(user_arg()),
                )
                .subcommand(
                    Command::new("list")
                        .about("List categories")
                        .arg(
                            Arg::new("all")
                                .long("all")
                                .action(ArgAction::SetTrue)
                                .help("Include archived categories"),
                        )
                        .arg(user_arg()),
                )
                .subcommand(
                    Command::new("archive")
                        .about("Archive a category")
                        .arg(Arg::new("name").required(true))
                        .arg(user_arg()),
                ),
        )
        .subcommand(record_cmd("expense", "Record and list expenses"))
        .subcommand(record_cmd("income", "Record and list incomes"))
        .subcommand(
            Command::new("budget")
                .about("Manage monthly budgets")
                .subcommand(
                    Command::new("set")
                        .about("Set a category's budget for a month")
                        .arg(Arg::new("month").required(true).value_name("YYYY-MM"))
                        .arg(Arg::new("category").required(true))
                        .arg(Arg::new("amount").required(true))
                        .arg(user_arg()),
                )
                .subcommand(
                    Command::new("list")
                        .about("List budgets")
                        .arg(month_arg())
                        .arg(user_arg()),
                ),
        )
        .subcommand(
            Command::new("balance")
                .about("Manage monthly balance snapshots")
                .subcommand(
                    Command::new("set")
                        .about("Set a category's balance for a month")
                        .arg(Arg::new("month").required(true).value_name("YYYY-MM"))
                        .arg(Arg::new("category").required(true))
                        .arg(Arg::new("amount").required(true))
                        .arg(user_arg()),
                )
                .subcommand(
                    Command::new("list")
                        .about("List balance snapshots")
                        .arg(month_arg())
                        .arg(user_arg()),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Remove a category's balance for a month")
                        .arg(Arg::new("month").required(true).value_name("YYYY-MM"))
                        .arg(Arg::new("category").required(true))
                        .arg(user_arg()),
                ),
        )
        .subcommand(
            Command::new("goal")
                .about("Manage savings goals")
                .subcommand(
                    Command::new("add")
                        .about("Add a goal")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("amount").required(true))
                        .arg(Arg::new("note").long("note").value_name("TEXT"))
                        .arg(user_arg()),
                )
                .subcommand(
                    Command::new("list")
                        .about("List goals")
                        .arg(
                            Arg::new("all")
                                .long("all")
                                .action(ArgAction::SetTrue)
                                .help("Include archived goals"),
                        )
                        .arg(user_arg()),
                )
                .subcommand(
                    Command::new("archive")
                        .about("Archive a goal")
                        .arg(Arg::new("name").required(true))
                        .arg(user_arg()),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Monthly reports")
                .subcommand(with_json(
                    Command::new("expenses")
                        .about("Spending per category vs. budget for a month")
                        .arg(month_arg())
                        .arg(user_arg()),
                ))
                .subcommand(with_json(
                    Command::new("incomes")
                        .about("Income per category for a month")
                        .arg(month_arg())
                        .arg(user_arg()),
                ))
                .subcommand(with_json(
                    Command::new("balance")
                        .about("Total balance, month-over-month change, and goal progress")
                        .arg(month_arg())
                        .arg(user_arg()),
                )),
        )
        .subcommand(
            Command::new("config")
                .about("Process-wide settings")
                .subcommand(
                    Command::new("set-rate")
                        .about("Set the foreign-to-domestic exchange rate")
                        .arg(Arg::new("rate").required(true)),
                )
                .subcommand(
                    Command::new("set-currency")
                        .about("Set the foreign currency label")
                        .arg(Arg::new("label").required(true)),
                )
                .subcommand(
                    Command::new("set-user")
                        .about("Set the default user")
                        .arg(Arg::new("name").required(true)),
                )
                .subcommand(Command::new("show").about("Show current settings")),
        )
}

fn record_cmd(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .subcommand(
            Command::new("add")
                .about("Add a record")
                .arg(
                    Arg::new("date")
                        .long("date")
                        .required(true)
                        .value_name("YYYY-MM-DD"),
                )
                .arg(
                    Arg::new("category")
                        .long("category")
                        .required(true)
                        .value_name("NAME"),
                )
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("note").long("note").value_name("TEXT"))
                .arg(user_arg()),
        )
        .subcommand(with_json(
            Command::new("list")
                .about("List records")
                .arg(month_arg())
                .arg(user_arg()),
        ))
        .subcommand(
            Command::new("rm")
                .about("Delete a record by id")
                .arg(Arg::new("id").required(true))
                .arg(user_arg()),
        )
}
