// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{Connection, OptionalExtension, Row, params};

use super::{accounts, decline};
use crate::db::Store;
use crate::error::{Decline, Outcome, Result, is_foreign_key_violation};
use crate::models::{NewTransaction, Transaction, TransactionRow, clean_description};

const SELECT_ROWS: &str = "SELECT t.id, t.account_id, a.name, t.date, t.description, t.amount, t.category_id,
            IFNULL(c.name, 'Uncategorized'), IFNULL(c.type, 'expense')
     FROM transactions t
     JOIN accounts a ON t.account_id=a.id
     LEFT JOIN categories c ON t.category_id=c.id";

fn row_from(r: &Row<'_>) -> rusqlite::Result<TransactionRow> {
    Ok(TransactionRow {
        id: r.get(0)?,
        account_id: r.get(1)?,
        account_name: r.get(2)?,
        date: r.get(3)?,
        description: r.get(4)?,
        amount: r.get(5)?,
        category_id: r.get(6)?,
        category_name: r.get(7)?,
        category_kind: r.get(8)?,
    })
}

fn from_row(r: &Row<'_>) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: r.get(0)?,
        account_id: r.get(1)?,
        date: r.get(2)?,
        description: r.get(3)?,
        amount: r.get(4)?,
        category_id: r.get(5)?,
        created_at: r.get(6)?,
    })
}

/// A category id that no longer exists degrades to no category.
fn resolve_category(conn: &Connection, category_id: Option<i64>) -> rusqlite::Result<Option<i64>> {
    let Some(id) = category_id else {
        return Ok(None);
    };
    let found = conn
        .query_row("SELECT 1 FROM categories WHERE id=?1", params![id], |_| Ok(()))
        .optional()?;
    if found.is_none() {
        tracing::warn!(category_id = id, "category not found, storing transaction uncategorized");
        return Ok(None);
    }
    Ok(Some(id))
}

/// Records a transaction. The amount is quantized before storage.
pub fn add(store: &Store, new: &NewTransaction) -> Result<Outcome<i64>> {
    let description = match clean_description(&new.description) {
        Ok(d) => d,
        Err(reason) => return Ok(decline("add_transaction", reason)),
    };
    store.with_tx(|tx| {
        if !accounts::exists(tx, new.account_id)? {
            return Ok(decline("add_transaction", Decline::UnknownAccount));
        }
        let category_id = resolve_category(tx, new.category_id)?;
        match tx.execute(
            "INSERT INTO transactions(account_id, date, description, amount, category_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                new.account_id,
                new.date,
                description,
                new.amount.quantize(),
                category_id
            ],
        ) {
            Ok(_) => {
                let id = tx.last_insert_rowid();
                tracing::info!(id, account_id = new.account_id, amount = %new.amount.quantize(), "added transaction");
                Ok(Outcome::Done(id))
            }
            Err(e) if is_foreign_key_violation(&e) => {
                Ok(decline("add_transaction", Decline::UnknownAccount))
            }
            Err(e) => Err(e.into()),
        }
    })
}

/// Newest first (date, then id), optionally for one account and capped at `limit`.
pub fn list(store: &Store, account_id: Option<i64>, limit: Option<usize>) -> Result<Vec<TransactionRow>> {
    store.read(|conn| Ok(query_rows(conn, account_id, limit)?))
}

pub(crate) fn query_rows(
    conn: &Connection,
    account_id: Option<i64>,
    limit: Option<usize>,
) -> rusqlite::Result<Vec<TransactionRow>> {
    let mut sql = format!("{SELECT_ROWS} WHERE 1=1");
    let mut args: Vec<i64> = Vec::new();
    if let Some(acct) = account_id {
        sql.push_str(" AND t.account_id=?");
        args.push(acct);
    }
    sql.push_str(" ORDER BY t.date DESC, t.id DESC");
    if let Some(n) = limit.filter(|n| *n > 0) {
        sql.push_str(" LIMIT ?");
        args.push(i64::try_from(n).unwrap_or(i64::MAX));
    }
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(args), row_from)?;
    rows.collect()
}

pub fn get(store: &Store, id: i64) -> Result<Option<Transaction>> {
    store.read(|conn| {
        Ok(conn
            .query_row(
                "SELECT id, account_id, date, description, amount, category_id, created_at
                 FROM transactions WHERE id=?1",
                params![id],
                from_row,
            )
            .optional()?)
    })
}

/// Same as [`get`] with account and category names resolved.
pub fn get_row(store: &Store, id: i64) -> Result<Option<TransactionRow>> {
    store.read(|conn| {
        Ok(conn
            .query_row(&format!("{SELECT_ROWS} WHERE t.id=?1"), params![id], row_from)
            .optional()?)
    })
}

pub fn update(store: &Store, id: i64, new: &NewTransaction) -> Result<Outcome<()>> {
    let description = match clean_description(&new.description) {
        Ok(d) => d,
        Err(reason) => return Ok(decline("update_transaction", reason)),
    };
    store.with_tx(|tx| {
        if !accounts::exists(tx, new.account_id)? {
            return Ok(decline("update_transaction", Decline::UnknownAccount));
        }
        let category_id = resolve_category(tx, new.category_id)?;
        match tx.execute(
            "UPDATE transactions SET account_id=?1, date=?2, description=?3, amount=?4, category_id=?5
             WHERE id=?6",
            params![
                new.account_id,
                new.date,
                description,
                new.amount.quantize(),
                category_id,
                id
            ],
        ) {
            Ok(0) => Ok(decline("update_transaction", Decline::NotFound)),
            Ok(_) => {
                tracing::info!(id, "updated transaction");
                Ok(Outcome::Done(()))
            }
            Err(e) if is_foreign_key_violation(&e) => {
                Ok(decline("update_transaction", Decline::UnknownAccount))
            }
            Err(e) => Err(e.into()),
        }
    })
}

/// Hard delete. A missing id is declined as not found, not treated as a fault.
pub fn delete(store: &Store, id: i64) -> Result<Outcome<()>> {
    store.with_tx(|tx| {
        let n = tx.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
        if n == 0 {
            return Ok(decline("delete_transaction", Decline::NotFound));
        }
        tracing::info!(id, "deleted transaction");
        Ok(Outcome::Done(()))
    })
}
