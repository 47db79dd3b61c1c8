// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod api;
pub mod balances;
pub mod cli;
pub mod commands;
pub mod db;
pub mod error;
pub mod export;
pub mod models;
pub mod money;
pub mod reports;
pub mod repo;
pub mod schema;
pub mod utils;

pub use db::Store;
pub use error::{Decline, LedgerError, Outcome};
pub use money::Money;
