// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod accounts;
pub mod categories;
pub mod transactions;
pub mod budgets;
pub mod reports;
pub mod settings;
pub mod exporter;

use anyhow::{Context, Result, anyhow, bail};
use serde::Serialize;

use crate::api::Response;
use crate::error::{self, Outcome};

pub(crate) fn required<'a>(m: &'a clap::ArgMatches, id: &str) -> Result<&'a str> {
    m.get_one::<String>(id)
        .map(String::as_str)
        .with_context(|| format!("missing argument '{}'", id))
}

/// Reports a write: the success message, or with `--json` the response
/// envelope. Declines and faults always end as an error for the shell.
pub(crate) fn finish<T: Serialize>(
    sub: &clap::ArgMatches,
    result: error::Result<Outcome<T>>,
    done: impl FnOnce(&T) -> String,
) -> Result<()> {
    if sub.get_flag("json") {
        let failure = match &result {
            Ok(Outcome::Done(_)) => None,
            Ok(Outcome::Declined(reason)) => Some(format!("Declined: {}", reason)),
            Err(err) => Some(err.to_string()),
        };
        println!("{}", Response::from_write(result).to_json()?);
        return match failure {
            Some(msg) => Err(anyhow!(msg)),
            None => Ok(()),
        };
    }
    match result? {
        Outcome::Done(v) => {
            println!("{}", done(&v));
            Ok(())
        }
        Outcome::Declined(reason) => bail!("Declined: {}", reason),
    }
}
