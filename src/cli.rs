// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{crate_version, value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn month_arg(help: &'static str) -> Arg {
    Arg::new("month").long("month").value_name("YYYY-MM").help(help)
}

pub fn build_cli() -> Command {
    Command::new("fintrack")
        .version(crate_version!())
        .about("Per-user spending ledger with monthly budget tracking and a next-month forecast")
        .arg(
            Arg::new("user")
                .long("user")
                .short('u')
                .env("FINTRACK_USER")
                .value_name("NAME")
                .help("Whose ledger to work on"),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .env("FINTRACK_DATA_DIR")
                .value_name("DIR")
                .value_parser(value_parser!(PathBuf))
                .help("Directory holding the per-user files (default: platform data dir)"),
        )
        .subcommand(Command::new("init").about("Create the user's settings file and show where data lives"))
        .subcommand(
            Command::new("tx")
                .about("Record and list spending")
                .subcommand(
                    Command::new("add")
                        .about("Record one spending")
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .value_name("YYYY-MM-DD")
                                .help("Defaults to today"),
                        )
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("description").long("description").short('d').required(true))
                        .arg(Arg::new("category").long("category").short('c').required(true)),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("Show the spending history")
                        .arg(month_arg("Only this month"))
                        .arg(Arg::new("category").long("category").help("Only this category"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize))
                                .help("Show at most this many rows, newest first"),
                        ),
                ))
                .subcommand(
                    Command::new("clear").about("Delete all history").arg(
                        Arg::new("yes")
                            .long("yes")
                            .action(ArgAction::SetTrue)
                            .help("Confirm deletion"),
                    ),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Manage spending categories")
                .subcommand(Command::new("add").arg(Arg::new("name").required(true)))
                .subcommand(json_flags(Command::new("list"))),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly budget")
                .subcommand(
                    Command::new("set")
                        .about("Set the monthly budget; 0 turns budget tracking off")
                        .arg(Arg::new("amount").required(true)),
                )
                .subcommand(json_flags(
                    Command::new("show")
                        .about("Progress against the budget")
                        .arg(month_arg("Month to check (default: current month)")),
                )),
        )
        .subcommand(
            Command::new("import").subcommand(
                Command::new("transactions")
                    .about("Merge a CSV with Date, Description, Amount, Category columns")
                    .arg(Arg::new("path").long("path").required(true)),
            ),
        )
        .subcommand(
            Command::new("export").subcommand(
                Command::new("transactions")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv")
                            .help("csv|json"),
                    )
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
        .subcommand(
            Command::new("report")
                .about("Spending statistics")
                .subcommand(json_flags(
                    Command::new("stats").about("Monthly totals, average and top category"),
                ))
                .subcommand(json_flags(
                    Command::new("month")
                        .about("Category breakdown of one month, compared with another")
                        .arg(month_arg("Month to analyse (default: latest month with data)"))
                        .arg(
                            Arg::new("compare")
                                .long("compare")
                                .value_name("YYYY-MM")
                                .help("Month to compare with (default: the one before it)"),
                        ),
                )),
        )
        .subcommand(json_flags(
            Command::new("forecast").about("Predict next month's spending"),
        ))
        .subcommand(Command::new("doctor").about("Check the ledger against the settings"))
}
