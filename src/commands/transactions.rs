// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{finish, required};
use crate::api::Response;
use crate::db::Store;
use crate::models::{NewTransaction, TransactionRow};
use crate::money::Money;
use crate::repo::transactions;
use crate::utils::{maybe_print_json, parse_date, parse_id, pretty_table};
use anyhow::{Result, bail};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("show", sub)) => show(store, sub)?,
        Some(("edit", sub)) => edit(store, sub)?,
        Some(("rm", sub)) => {
            let id = parse_id(required(sub, "id")?, "transaction")?;
            finish(sub, transactions::delete(store, id), |_| format!("Removed transaction {}", id))?;
        }
        _ => {}
    }
    Ok(())
}

/// Reads and validates the shared add/edit fields. Dates are checked here;
/// the store keeps them as given.
pub fn fields(sub: &clap::ArgMatches) -> Result<NewTransaction> {
    let account_id = parse_id(required(sub, "account")?, "account")?;
    let date = parse_date(required(sub, "date")?)?;
    let category_id = sub
        .get_one::<String>("category")
        .map(|s| parse_id(s, "category"))
        .transpose()?;
    Ok(NewTransaction {
        account_id,
        date: date.to_string(),
        description: required(sub, "desc")?.to_string(),
        amount: Money::parse_or_zero(required(sub, "amount")?),
        category_id,
    })
}

fn add(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let new = fields(sub)?;
    finish(sub, transactions::add(store, &new), |id| {
        format!(
            "Recorded {} on {} '{}' (id {})",
            new.amount,
            new.date,
            new.description.trim(),
            id
        )
    })
}

fn edit(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(required(sub, "id")?, "transaction")?;
    let new = fields(sub)?;
    finish(sub, transactions::update(store, id, &new), |_| {
        format!("Updated transaction {}", id)
    })
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let account_id = sub
        .get_one::<String>("account")
        .map(|s| parse_id(s, "account"))
        .transpose()?;
    let limit = sub.get_one::<usize>("limit").copied();
    let data = transactions::list(store, account_id, limit)?;
    if !maybe_print_json(sub.get_flag("json"), &Response::ok(&data))? {
        println!("{}", table(&data));
    }
    Ok(())
}

fn show(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(required(sub, "id")?, "transaction")?;
    let Some(row) = transactions::get_row(store, id)? else {
        bail!("Transaction {} not found", id);
    };
    if !maybe_print_json(sub.get_flag("json"), &Response::ok(&row))? {
        println!("{}", table(std::slice::from_ref(&row)));
    }
    Ok(())
}

pub fn table(data: &[TransactionRow]) -> comfy_table::Table {
    let rows = data
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.date.clone(),
                r.account_name.clone(),
                r.description.clone(),
                r.amount.to_string(),
                r.category_name.clone(),
            ]
        })
        .collect();
    pretty_table(
        &["ID", "Date", "Account", "Description", "Amount", "Category"],
        rows,
    )
}
