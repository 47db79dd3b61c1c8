// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version};

fn json_flag() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print the JSON response envelope")
}

fn amount_arg(name: &'static str, long: &'static str) -> Arg {
    Arg::new(name)
        .long(long)
        .allow_hyphen_values(true)
        .help("Decimal amount; '.' or ',' as separator")
}

fn tx_fields(cmd: Command) -> Command {
    cmd.arg(Arg::new("account").long("account").required(true).help("Account ID"))
        .arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD"))
        .arg(Arg::new("desc").long("desc").required(true))
        .arg(amount_arg("amount", "amount").required(true).help("Signed amount, negative for expenses"))
        .arg(Arg::new("category").long("category").help("Category ID"))
        .arg(json_flag())
}

pub fn build_cli() -> Command {
    Command::new("pocketledger")
        .version(crate_version!())
        .about("Personal finance record keeper: accounts, transactions, budgets, reports")
        .arg(
            Arg::new("db")
                .long("db")
                .env("POCKETLEDGER_DB")
                .global(true)
                .help("Path to the SQLite database"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .env("POCKETLEDGER_LOG")
                .global(true)
                .default_value("info"),
        )
        .subcommand(Command::new("init").about("Create or migrate the database"))
        .subcommand(
            Command::new("account")
                .about("Manage accounts")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").required(true))
                        .arg(amount_arg("balance", "balance").default_value("0"))
                        .arg(json_flag()),
                )
                .subcommand(Command::new("list").arg(json_flag()))
                .subcommand(
                    Command::new("edit")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("name").required(true))
                        .arg(amount_arg("balance", "balance").default_value("0"))
                        .arg(json_flag()),
                )
                .subcommand(Command::new("rm").arg(Arg::new("id").required(true)).arg(json_flag())),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("type").long("type").default_value("expense"))
                        .arg(json_flag()),
                )
                .subcommand(
                    Command::new("list")
                        .arg(Arg::new("type").long("type").help("expense or income"))
                        .arg(json_flag()),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("type").long("type").default_value("expense"))
                        .arg(json_flag()),
                )
                .subcommand(Command::new("rm").arg(Arg::new("id").required(true)).arg(json_flag())),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and browse transactions")
                .subcommand(tx_fields(Command::new("add")))
                .subcommand(
                    Command::new("list")
                        .arg(Arg::new("account").long("account").help("Account ID"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(clap::value_parser!(usize)),
                        )
                        .arg(json_flag()),
                )
                .subcommand(
                    Command::new("show")
                        .arg(Arg::new("id").required(true))
                        .arg(json_flag()),
                )
                .subcommand(tx_fields(Command::new("edit").arg(Arg::new("id").required(true))))
                .subcommand(Command::new("rm").arg(Arg::new("id").required(true)).arg(json_flag())),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly budgets for expense categories")
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("category").long("category").required(true).help("Category ID"))
                        .arg(Arg::new("month").long("month").required(true).help("YYYY-MM"))
                        .arg(amount_arg("amount", "amount").required(true))
                        .arg(json_flag()),
                )
                .subcommand(
                    Command::new("list")
                        .arg(Arg::new("month").long("month").help("YYYY-MM, defaults to current"))
                        .arg(json_flag()),
                )
                .subcommand(
                    Command::new("overview")
                        .arg(Arg::new("month").long("month").help("YYYY-MM, defaults to current"))
                        .arg(json_flag()),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Balances and spending reports")
                .subcommand(Command::new("balances").arg(json_flag()))
                .subcommand(
                    Command::new("summary")
                        .arg(Arg::new("month").long("month").help("YYYY-MM, defaults to current"))
                        .arg(json_flag()),
                )
                .subcommand(
                    Command::new("spend-by-category")
                        .arg(Arg::new("from").long("from").required(true).help("YYYY-MM-DD"))
                        .arg(Arg::new("to").long("to").required(true).help("YYYY-MM-DD"))
                        .arg(json_flag()),
                )
                .subcommand(
                    Command::new("dashboard")
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(clap::value_parser!(usize))
                                .default_value("15"),
                        )
                        .arg(json_flag()),
                ),
        )
        .subcommand(
            Command::new("setting")
                .about("Read and write persisted preferences")
                .subcommand(
                    Command::new("get")
                        .arg(Arg::new("key").required(true))
                        .arg(Arg::new("default").long("default").default_value("")),
                )
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").required(true))
                        .arg(Arg::new("value").required(true)),
                ),
        )
        .subcommand(
            Command::new("theme")
                .about("UI theme preference")
                .subcommand(Command::new("get"))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("value").required(true))
                        .arg(json_flag()),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export accounts, categories and transactions as CSV")
                .arg(Arg::new("out").long("out").required(true).help("Output directory")),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        build_cli().debug_assert();
    }

    #[test]
    fn negative_amounts_are_values() {
        let m = build_cli().get_matches_from([
            "pocketledger", "tx", "add", "--account", "1", "--date", "2024-01-05", "--desc",
            "Groceries", "--amount", "-25,50",
        ]);
        let (_, tx) = m.subcommand().unwrap();
        let (_, add) = tx.subcommand().unwrap();
        assert_eq!(add.get_one::<String>("amount").unwrap(), "-25,50");
    }
}
