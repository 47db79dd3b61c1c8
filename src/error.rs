// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Faults and declines.
//!
//! Every write returns `Result<Outcome<T>>`:
//!
//! - `Ok(Outcome::Done(..))` the operation took effect,
//! - `Ok(Outcome::Declined(..))` a business rule refused it and nothing changed,
//! - `Err(LedgerError)` the store itself failed and the transaction was rolled back.

use serde::Serialize;
use thiserror::Error;

pub type Result<T, E = LedgerError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("schema migration '{step}' failed: {source}")]
    Migration {
        step: &'static str,
        #[source]
        source: rusqlite::Error,
    },
    #[error("amount overflow while computing {0}")]
    Overflow(&'static str),
    #[error("could not determine platform-specific data dir")]
    DataDir,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Why a business rule refused an operation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decline {
    #[error("name already exists")]
    DuplicateName,
    #[error("'Uncategorized' cannot be modified or deleted")]
    ProtectedCategory,
    #[error("'Uncategorized' is reserved")]
    ReservedName,
    #[error("not found")]
    NotFound,
    #[error("account does not exist")]
    UnknownAccount,
    #[error("category does not exist")]
    UnknownCategory,
    #[error("category is not an expense category")]
    NotExpenseCategory,
    #[error("invalid month, expected YYYY-MM")]
    InvalidMonth,
    #[error("name cannot be empty")]
    EmptyName,
    #[error("name longer than {} characters", crate::models::MAX_NAME_LENGTH)]
    NameTooLong,
    #[error("description cannot be empty")]
    EmptyDescription,
    #[error("description longer than {} characters", crate::models::MAX_DESC_LENGTH)]
    DescriptionTooLong,
    #[error("invalid category type, expected expense or income")]
    InvalidCategoryType,
    #[error("invalid theme, expected light or dark")]
    InvalidTheme,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Done(T),
    Declined(Decline),
}

impl<T> Outcome<T> {
    pub fn is_done(&self) -> bool {
        matches!(self, Outcome::Done(_))
    }

    pub fn done(self) -> Option<T> {
        match self {
            Outcome::Done(v) => Some(v),
            Outcome::Declined(_) => None,
        }
    }

    pub fn declined(&self) -> Option<Decline> {
        match self {
            Outcome::Done(_) => None,
            Outcome::Declined(d) => Some(*d),
        }
    }
}

/// `true` when the error is a UNIQUE constraint violation.
pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

/// `true` when the error is a FOREIGN KEY constraint violation.
pub(crate) fn is_foreign_key_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY
    )
}
