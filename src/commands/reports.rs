// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::required;
use crate::api::Response;
use crate::balances;
use crate::db::Store;
use crate::models::{AccountBalance, IncomeExpenseSummary};
use crate::money::Money;
use crate::reports;
use crate::utils::{current_month, maybe_print_json, parse_month, parse_range, pretty_table};
use anyhow::Result;
use serde::Serialize;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("balances", sub)) => balances(store, sub)?,
        Some(("summary", sub)) => summary(store, sub)?,
        Some(("spend-by-category", sub)) => spend_by_category(store, sub)?,
        Some(("dashboard", sub)) => dashboard(store, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
struct BalancesView {
    accounts: Vec<AccountBalance>,
    total_balance: Money,
}

fn balances(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    // A storage fault still renders, with empty accounts and a zero total.
    let view = balances::accounts_with_balances(store).and_then(|accounts| {
        Ok(BalancesView {
            total_balance: balances::net_of(&accounts)?,
            accounts,
        })
    });
    let resp = Response::from_read(
        view,
        BalancesView {
            accounts: Vec::new(),
            total_balance: Money::ZERO,
        },
    );
    if !maybe_print_json(sub.get_flag("json"), &resp)? {
        if let Some(err) = &resp.error {
            eprintln!("warning: {}", err);
        }
        if let Some(view) = &resp.data {
            let mut rows: Vec<Vec<String>> = view
                .accounts
                .iter()
                .map(|a| {
                    vec![
                        a.name.clone(),
                        a.initial_balance.to_string(),
                        a.current_balance.to_string(),
                    ]
                })
                .collect();
            rows.push(vec!["Total".into(), String::new(), view.total_balance.to_string()]);
            println!(
                "{}",
                pretty_table(&["Account", "Initial", "Balance"], rows)
            );
        }
    }
    Ok(())
}

fn summary(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let month = match sub.get_one::<String>("month") {
        Some(m) => parse_month(m)?,
        None => current_month(),
    };
    let resp = Response::from_read(
        balances::income_expense_summary(store, &month),
        IncomeExpenseSummary {
            total_income: Money::ZERO,
            total_expense: Money::ZERO,
        },
    );
    if !maybe_print_json(sub.get_flag("json"), &resp)? {
        if let Some(err) = &resp.error {
            eprintln!("warning: {}", err);
        }
        if let Some(s) = &resp.data {
            println!(
                "{}",
                pretty_table(
                    &["Month", "Income", "Expense", "Net"],
                    vec![vec![
                        month.clone(),
                        s.total_income.to_string(),
                        s.total_expense.to_string(),
                        s.net().map(|n| n.to_string()).unwrap_or_default(),
                    ]],
                )
            );
        }
    }
    Ok(())
}

fn spend_by_category(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let (from, to) = parse_range(required(sub, "from")?, required(sub, "to")?)?;
    let resp = Response::from_read(reports::spending_by_category(store, &from, &to), Vec::new());
    if !maybe_print_json(sub.get_flag("json"), &resp)? {
        if let Some(err) = &resp.error {
            eprintln!("warning: {}", err);
        }
        let rows = resp
            .data
            .iter()
            .flatten()
            .map(|s| vec![s.category_name.clone(), s.spent_amount.to_string()])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], rows));
    }
    Ok(())
}

fn dashboard(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(15);
    let month = current_month();
    let data = reports::dashboard(store, &month, limit)?;
    if !maybe_print_json(sub.get_flag("json"), &Response::ok(&data))? {
        println!(
            "{} accounts, net balance {}, flow for {}: {}",
            data.account_count, data.total_balance, data.current_month, data.monthly_flow
        );
        println!(
            "{}",
            super::transactions::table(&data.recent_transactions)
        );
    }
    Ok(())
}
