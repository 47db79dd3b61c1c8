// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{finish, required};
use crate::api::Response;
use crate::db::Store;
use crate::money::Money;
use crate::repo::accounts;
use crate::utils::{maybe_print_json, parse_id, pretty_table};
use anyhow::Result;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = required(sub, "name")?;
            let balance = Money::parse_or_zero(required(sub, "balance")?);
            finish(sub, accounts::add(store, name, balance), |id| {
                format!("Added account '{}' (id {}, opening {})", name.trim(), id, balance)
            })?;
        }
        Some(("list", sub)) => {
            let data = accounts::list(store)?;
            if !maybe_print_json(sub.get_flag("json"), &Response::ok(&data))? {
                let rows = data
                    .iter()
                    .map(|a| {
                        vec![
                            a.id.to_string(),
                            a.name.clone(),
                            a.initial_balance.to_string(),
                            a.created_at.map(|c| c.to_string()).unwrap_or_default(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["ID", "Name", "Initial balance", "Created"], rows)
                );
            }
        }
        Some(("edit", sub)) => {
            let id = parse_id(required(sub, "id")?, "account")?;
            let name = required(sub, "name")?;
            let balance = Money::parse_or_zero(required(sub, "balance")?);
            finish(sub, accounts::update(store, id, name, balance), |_| {
                format!("Updated account {}", id)
            })?;
        }
        Some(("rm", sub)) => {
            let id = parse_id(required(sub, "id")?, "account")?;
            finish(sub, accounts::delete(store, id), |_| {
                format!("Removed account {} and its transactions", id)
            })?;
        }
        _ => {}
    }
    Ok(())
}
