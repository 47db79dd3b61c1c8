// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{Connection, OptionalExtension, Row, params};

use super::decline;
use crate::db::Store;
use crate::error::{Decline, Outcome, Result, is_unique_violation};
use crate::models::{Category, CategoryKind, clean_name, is_uncategorized};

const SELECT: &str = "SELECT id, name, type, created_at FROM categories";

fn from_row(r: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: r.get(0)?,
        name: r.get(1)?,
        kind: r.get(2)?,
        created_at: r.get(3)?,
    })
}

pub fn add(store: &Store, name: &str, kind: CategoryKind) -> Result<Outcome<i64>> {
    let name = match clean_name(name) {
        Ok(n) => n,
        Err(reason) => return Ok(decline("add_category", reason)),
    };
    if is_uncategorized(&name) {
        return Ok(decline("add_category", Decline::ReservedName));
    }
    store.with_tx(|tx| {
        match tx.execute(
            "INSERT INTO categories(name, type) VALUES (?1, ?2)",
            params![name, kind],
        ) {
            Ok(_) => {
                let id = tx.last_insert_rowid();
                tracing::info!(id, %name, %kind, "added category");
                Ok(Outcome::Done(id))
            }
            Err(e) if is_unique_violation(&e) => {
                Ok(decline("add_category", Decline::DuplicateName))
            }
            Err(e) => Err(e.into()),
        }
    })
}

/// Categories ordered by name, optionally restricted to one kind.
pub fn list(store: &Store, kind: Option<CategoryKind>) -> Result<Vec<Category>> {
    store.read(|conn| {
        let rows = match kind {
            Some(k) => {
                let mut stmt = conn.prepare(&format!(
                    "{SELECT} WHERE type=?1 ORDER BY name COLLATE NOCASE"
                ))?;
                let mapped = stmt.query_map(params![k], from_row)?;
                mapped.collect::<rusqlite::Result<Vec<_>>>()?
            }
            None => {
                let mut stmt = conn.prepare(&format!("{SELECT} ORDER BY name COLLATE NOCASE"))?;
                let mapped = stmt.query_map([], from_row)?;
                mapped.collect::<rusqlite::Result<Vec<_>>>()?
            }
        };
        Ok(rows)
    })
}

pub fn get(store: &Store, id: i64) -> Result<Option<Category>> {
    store.read(|conn| Ok(find(conn, id)?))
}

/// Renames and retypes a category. `Uncategorized` can never be the target
/// nor the new name. Text input for the kind goes through
/// `CategoryKind::from_str`.
pub fn update(store: &Store, id: i64, name: &str, kind: CategoryKind) -> Result<Outcome<()>> {
    let name = match clean_name(name) {
        Ok(n) => n,
        Err(reason) => return Ok(decline("update_category", reason)),
    };
    if is_uncategorized(&name) {
        return Ok(decline("update_category", Decline::ReservedName));
    }
    store.with_tx(|tx| {
        match find(tx, id)? {
            None => return Ok(decline("update_category", Decline::NotFound)),
            Some(c) if c.is_protected() => {
                return Ok(decline("update_category", Decline::ProtectedCategory));
            }
            Some(_) => {}
        }
        match tx.execute(
            "UPDATE categories SET name=?1, type=?2 WHERE id=?3",
            params![name, kind, id],
        ) {
            Ok(0) => Ok(decline("update_category", Decline::NotFound)),
            Ok(_) => {
                tracing::info!(id, %name, %kind, "updated category");
                Ok(Outcome::Done(()))
            }
            Err(e) if is_unique_violation(&e) => {
                Ok(decline("update_category", Decline::DuplicateName))
            }
            Err(e) => Err(e.into()),
        }
    })
}

/// Deletes a category. Its budgets go with it; its transactions keep
/// existing with no category.
pub fn delete(store: &Store, id: i64) -> Result<Outcome<()>> {
    store.with_tx(|tx| {
        match find(tx, id)? {
            None => return Ok(decline("delete_category", Decline::NotFound)),
            Some(c) if c.is_protected() => {
                return Ok(decline("delete_category", Decline::ProtectedCategory));
            }
            Some(_) => {}
        }
        tx.execute("DELETE FROM categories WHERE id=?1", params![id])?;
        tracing::info!(id, "deleted category");
        Ok(Outcome::Done(()))
    })
}

pub(crate) fn find(conn: &Connection, id: i64) -> rusqlite::Result<Option<Category>> {
    conn.query_row(&format!("{SELECT} WHERE id=?1"), params![id], from_row)
        .optional()
}
