// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fs;
use std::path::{Path, PathBuf};

use crate::db::Store;
use crate::error::Result;
use crate::repo::{accounts, categories, transactions};

/// Writes `transactions.csv`, `accounts.csv` and `categories.csv` into `dir`
/// and returns the paths written.
pub fn write_csv(store: &Store, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::new();

    let path = dir.join("transactions.csv");
    let mut wtr = csv::Writer::from_path(&path)?;
    wtr.write_record(["id", "date", "account_name", "description", "category_name", "amount"])?;
    for t in transactions::list(store, None, None)? {
        wtr.write_record([
            t.id.to_string(),
            t.date,
            t.account_name,
            t.description,
            t.category_name,
            t.amount.to_string(),
        ])?;
    }
    wtr.flush()?;
    written.push(path);

    let path = dir.join("accounts.csv");
    let mut wtr = csv::Writer::from_path(&path)?;
    wtr.write_record(["id", "name", "initial_balance"])?;
    for a in accounts::list(store)? {
        wtr.write_record([a.id.to_string(), a.name, a.initial_balance.to_string()])?;
    }
    wtr.flush()?;
    written.push(path);

    let path = dir.join("categories.csv");
    let mut wtr = csv::Writer::from_path(&path)?;
    wtr.write_record(["id", "name", "type"])?;
    for c in categories::list(store, None)? {
        wtr.write_record([c.id.to_string(), c.name, c.kind.to_string()])?;
    }
    wtr.flush()?;
    written.push(path);

    tracing::info!(dir = %dir.display(), "exported ledger to csv");
    Ok(written)
}
