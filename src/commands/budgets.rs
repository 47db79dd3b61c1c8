// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{finish, required};
use crate::api::Response;
use crate::db::Store;
use crate::money::Money;
use crate::repo::budgets;
use crate::reports::budget_overview;
use crate::utils::{current_month, maybe_print_json, parse_id, parse_month, pretty_table};
use anyhow::Result;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("overview", sub)) => overview(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn month_or_current(sub: &clap::ArgMatches) -> Result<String> {
    match sub.get_one::<String>("month") {
        Some(m) => parse_month(m),
        None => Ok(current_month()),
    }
}

fn set(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let cat_id = parse_id(required(sub, "category")?, "category")?;
    let month = parse_month(required(sub, "month")?)?;
    let amount = Money::parse_or_zero(required(sub, "amount")?);
    finish(sub, budgets::set(store, cat_id, &month, amount), |_| {
        format!(
            "Budget set for {} / category {} = {}",
            month,
            cat_id,
            amount.max(Money::ZERO)
        )
    })
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_or_current(sub)?;
    let data = budgets::for_month(store, &month)?;
    if !maybe_print_json(sub.get_flag("json"), &Response::ok(&data))? {
        let rows = data
            .iter()
            .map(|b| vec![b.month.clone(), b.category_name.clone(), b.amount.to_string()])
            .collect();
        println!("{}", pretty_table(&["Month", "Category", "Budget"], rows));
    }
    Ok(())
}

fn overview(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_or_current(sub)?;
    let data = budget_overview(store, &month)?;
    if !maybe_print_json(sub.get_flag("json"), &Response::ok(&data))? {
        let rows = data
            .iter()
            .map(|l| {
                vec![
                    l.category_name.clone(),
                    l.budgeted_amount.to_string(),
                    l.spent_amount.to_string(),
                    l.remaining_amount.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Budget", "Spent", "Remaining"], rows)
        );
    }
    Ok(())
}
