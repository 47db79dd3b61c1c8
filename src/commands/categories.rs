// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{finish, required};
use crate::api::Response;
use crate::db::Store;
use crate::models::CategoryKind;
use crate::repo::categories;
use crate::utils::{maybe_print_json, parse_id, pretty_table};
use anyhow::{Result, anyhow};

fn parse_kind(s: &str) -> Result<CategoryKind> {
    s.parse::<CategoryKind>().map_err(|e| anyhow!("{}: '{}'", e, s))
}

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = required(sub, "name")?;
            let kind = parse_kind(required(sub, "type")?)?;
            finish(sub, categories::add(store, name, kind), |id| {
                format!("Added {} category '{}' (id {})", kind, name.trim(), id)
            })?;
        }
        Some(("list", sub)) => {
            let kind = sub.get_one::<String>("type").map(|s| parse_kind(s)).transpose()?;
            let data = categories::list(store, kind)?;
            if !maybe_print_json(sub.get_flag("json"), &Response::ok(&data))? {
                let rows = data
                    .iter()
                    .map(|c| vec![c.id.to_string(), c.name.clone(), c.kind.to_string()])
                    .collect();
                println!("{}", pretty_table(&["ID", "Category", "Type"], rows));
            }
        }
        Some(("edit", sub)) => {
            let id = parse_id(required(sub, "id")?, "category")?;
            let name = required(sub, "name")?;
            let kind = parse_kind(required(sub, "type")?)?;
            finish(sub, categories::update(store, id, name, kind), |_| {
                format!("Updated category {}", id)
            })?;
        }
        Some(("rm", sub)) => {
            let id = parse_id(required(sub, "id")?, "category")?;
            finish(sub, categories::delete(store, id), |_| format!("Removed category {}", id))?;
        }
        _ => {}
    }
    Ok(())
}
