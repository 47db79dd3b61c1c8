// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Domain repository: the only reader and writer of persisted entities.
//!
//! Storage rows are mapped to the typed records in [`crate::models`] here and
//! nowhere else.

pub mod accounts;
pub mod budgets;
pub mod categories;
pub mod settings;
pub mod transactions;

use crate::error::{Decline, Outcome};

/// Logs a decline in the caller's span and wraps it.
pub(crate) fn decline<T>(op: &'static str, reason: Decline) -> Outcome<T> {
    tracing::warn!(op, %reason, "declined");
    Outcome::Declined(reason)
}
