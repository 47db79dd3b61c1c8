// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::required;
use crate::db::Store;
use crate::export::write_csv;
use anyhow::Result;
use std::path::Path;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    let out = required(m, "out")?;
    for path in write_csv(store, Path::new(out))? {
        println!("Exported {}", path.display());
    }
    Ok(())
}
