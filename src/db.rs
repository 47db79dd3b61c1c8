// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, Transaction};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::Span;

use crate::error::{LedgerError, Result};
use crate::schema;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Pocketledger", "pocketledger"));

pub fn default_db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2).ok_or(LedgerError::DataDir)?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir)?;
    Ok(data_dir.join("pocketledger.sqlite"))
}

/// Handle to the ledger database.
///
/// The store holds no open connection. Each operation opens one, enables
/// foreign keys, runs inside a single transaction and closes it again.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
    span: Span,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let span = tracing::info_span!("store", path = %path.display());
        Store { path, span }
    }

    /// Uses a caller supplied span as the logging context for every operation.
    pub fn with_span(path: impl Into<PathBuf>, span: Span) -> Self {
        Store {
            path: path.into(),
            span,
        }
    }

    /// Opens the store at `path` and brings its schema up to date.
    pub fn open_or_init(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Store::new(path);
        store.initialize()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Idempotent schema creation and migration. Safe on every startup.
    pub fn initialize(&self) -> Result<()> {
        let _enter = self.span.enter();
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        // Foreign keys stay off here: table rebuilds must not cascade.
        let mut conn = Connection::open(&self.path)?;
        schema::initialize(&mut conn)
    }

    pub(crate) fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(conn)
    }

    /// Runs `f` inside one transaction: commit on `Ok`, roll back on `Err`.
    pub(crate) fn with_tx<T>(&self, f: impl FnOnce(&Transaction<'_>) -> Result<T>) -> Result<T> {
        let _enter = self.span.enter();
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        match f(&tx) {
            Ok(value) => {
                tx.commit()?;
                Ok(value)
            }
            Err(err) => {
                tracing::error!(%err, "operation failed, rolling back");
                if let Err(rb) = tx.rollback() {
                    tracing::error!(err = %rb, "rollback failed");
                }
                Err(err)
            }
        }
    }

    /// Read-only variant of [`Store::with_tx`].
    pub(crate) fn read<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let _enter = self.span.enter();
        let conn = self.connect()?;
        f(&conn).inspect_err(|err| tracing::error!(%err, "query failed"))
    }
}
