// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print the response payload as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print the response payload as JSON lines"),
    )
}

fn user_arg() -> Arg {
    Arg::new("user")
        .long("user")
        .required(true)
        .help("Username the operation is scoped to")
}

fn tx_body_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD"))
        .arg(
            Arg::new("description")
                .long("description")
                .required(true)
                .help("1-200 characters"),
        )
        .arg(
            Arg::new("amount")
                .long("amount")
                .required(true)
                .help("Positive amount, at least 0.01"),
        )
        .arg(Arg::new("category").long("category").required(true))
        .arg(
            Arg::new("type")
                .long("type")
                .required(true)
                .value_parser(["Income", "Expense"]),
        )
}

pub fn build_cli() -> Command {
    Command::new("coinkeeper")
        .about("Per-user income/expense ledger with category analytics")
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("user")
                .about("Manage ledger users")
                .subcommand(
                    Command::new("add")
                        .about("Register a user")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("email").long("email").required(true)),
                )
                .subcommand(json_flags(Command::new("list").about("List users")))
                .subcommand(
                    Command::new("rm")
                        .about("Remove a user and their transactions")
                        .arg(Arg::new("name").long("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and query transactions")
                .subcommand(json_flags(tx_body_args(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(user_arg()),
                )))
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(user_arg())
                        .arg(Arg::new("start").long("start").help("Earliest date, YYYY-MM-DD"))
                        .arg(Arg::new("end").long("end").help("Latest date, YYYY-MM-DD"))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .help("Category substring, case-insensitive"),
                        )
                        .arg(
                            Arg::new("description")
                                .long("description")
                                .help("Description substring, case-insensitive"),
                        )
                        .arg(
                            Arg::new("page")
                                .long("page")
                                .value_parser(value_parser!(u32).range(1..)),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(u32).range(1..)),
                        ),
                ))
                .subcommand(json_flags(tx_body_args(
                    Command::new("update")
                        .about("Replace a transaction's fields")
                        .arg(user_arg())
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        ),
                )))
                .subcommand(json_flags(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(user_arg())
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        ),
                )),
        )
        .subcommand(
            Command::new("report")
                .about("Aggregated summaries")
                .subcommand(json_flags(
                    Command::new("category")
                        .about("Totals per category for one transaction type")
                        .arg(user_arg())
                        .arg(
                            Arg::new("month")
                                .long("month")
                                .value_parser(value_parser!(u32).range(1..=12)),
                        )
                        .arg(
                            Arg::new("year")
                                .long("year")
                                .value_parser(value_parser!(i32)),
                        )
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(["Income", "Expense"])
                                .default_value("Expense"),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("dashboard")
                        .about("Balance, totals, and recent activity")
                        .arg(user_arg())
                        .arg(
                            Arg::new("month")
                                .long("month")
                                .value_parser(value_parser!(u32).range(1..=12)),
                        )
                        .arg(
                            Arg::new("year")
                                .long("year")
                                .value_parser(value_parser!(i32)),
                        ),
                )),
        )
        .subcommand(Command::new("doctor").about("Check ledger data integrity"))
}
