// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{finish, required};
use crate::db::Store;
use crate::repo::settings;
use anyhow::Result;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("get", sub)) => {
            let key = required(sub, "key")?;
            let default = required(sub, "default")?;
            println!("{}", settings::get(store, key, default));
        }
        Some(("set", sub)) => {
            let key = required(sub, "key")?;
            let value = required(sub, "value")?;
            settings::set(store, key, value)?;
            println!("Set '{}' = '{}'", key, value);
        }
        _ => {}
    }
    Ok(())
}

pub fn handle_theme(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("get", _)) => println!("{}", settings::theme(store)),
        Some(("set", sub)) => {
            let value = required(sub, "value")?;
            finish(sub, settings::set_theme(store, value), |_| {
                format!("Theme set to '{}'", value.trim().to_lowercase())
            })?;
        }
        _ => {}
    }
    Ok(())
}
