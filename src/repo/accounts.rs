// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{OptionalExtension, Row, params};

use super::decline;
use crate::db::Store;
use crate::error::{Decline, Outcome, Result, is_unique_violation};
use crate::models::{Account, clean_name};
use crate::money::Money;

const SELECT: &str = "SELECT id, name, initial_balance, created_at FROM accounts";

fn from_row(r: &Row<'_>) -> rusqlite::Result<Account> {
    Ok(Account {
        id: r.get(0)?,
        name: r.get(1)?,
        initial_balance: r.get(2)?,
        created_at: r.get(3)?,
    })
}

/// Creates an account. Declined when the name is taken (case-insensitive).
pub fn add(store: &Store, name: &str, initial_balance: Money) -> Result<Outcome<i64>> {
    let name = match clean_name(name) {
        Ok(n) => n,
        Err(reason) => return Ok(decline("add_account", reason)),
    };
    store.with_tx(|tx| {
        match tx.execute(
            "INSERT INTO accounts(name, initial_balance) VALUES (?1, ?2)",
            params![name, initial_balance.quantize()],
        ) {
            Ok(_) => {
                let id = tx.last_insert_rowid();
                tracing::info!(id, %name, "added account");
                Ok(Outcome::Done(id))
            }
            Err(e) if is_unique_violation(&e) => Ok(decline("add_account", Decline::DuplicateName)),
            Err(e) => Err(e.into()),
        }
    })
}

pub fn list(store: &Store) -> Result<Vec<Account>> {
    store.read(|conn| {
        let mut stmt = conn.prepare(&format!("{SELECT} ORDER BY name COLLATE NOCASE"))?;
        let rows = stmt.query_map([], from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    })
}

pub fn get(store: &Store, id: i64) -> Result<Option<Account>> {
    store.read(|conn| {
        Ok(conn
            .query_row(&format!("{SELECT} WHERE id=?1"), params![id], from_row)
            .optional()?)
    })
}

/// Renames an account and resets its initial balance.
pub fn update(store: &Store, id: i64, name: &str, initial_balance: Money) -> Result<Outcome<()>> {
    let name = match clean_name(name) {
        Ok(n) => n,
        Err(reason) => return Ok(decline("update_account", reason)),
    };
    store.with_tx(|tx| {
        match tx.execute(
            "UPDATE accounts SET name=?1, initial_balance=?2 WHERE id=?3",
            params![name, initial_balance.quantize(), id],
        ) {
            Ok(0) => Ok(decline("update_account", Decline::NotFound)),
            Ok(_) => {
                tracing::info!(id, "updated account");
                Ok(Outcome::Done(()))
            }
            Err(e) if is_unique_violation(&e) => {
                Ok(decline("update_account", Decline::DuplicateName))
            }
            Err(e) => Err(e.into()),
        }
    })
}

/// Deletes an account together with all of its transactions.
pub fn delete(store: &Store, id: i64) -> Result<Outcome<()>> {
    store.with_tx(|tx| {
        let n = tx.execute("DELETE FROM accounts WHERE id=?1", params![id])?;
        if n == 0 {
            return Ok(decline("delete_account", Decline::NotFound));
        }
        tracing::info!(id, "deleted account and its transactions");
        Ok(Outcome::Done(()))
    })
}

pub(crate) fn exists(conn: &rusqlite::Connection, id: i64) -> rusqlite::Result<bool> {
    conn.query_row("SELECT 1 FROM accounts WHERE id=?1", params![id], |_| Ok(()))
        .optional()
        .map(|r| r.is_some())
}
