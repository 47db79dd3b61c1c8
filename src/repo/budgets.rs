// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::params;

use super::{categories, decline};
use crate::db::Store;
use crate::error::{Decline, Outcome, Result};
use crate::models::{Budget, CategoryKind, is_month_shaped};
use crate::money::Money;

/// Sets the budget of an expense category for `month` (YYYY-MM).
///
/// Upsert keyed by (category, month): setting it again overwrites the amount.
/// Negative amounts are clamped to zero.
pub fn set(store: &Store, category_id: i64, month: &str, amount: Money) -> Result<Outcome<()>> {
    let amount = amount.max(Money::ZERO).quantize();
    store.with_tx(|tx| {
        let Some(cat) = categories::find(tx, category_id)? else {
            return Ok(decline("set_budget", Decline::UnknownCategory));
        };
        if cat.kind != CategoryKind::Expense {
            return Ok(decline("set_budget", Decline::NotExpenseCategory));
        }
        if !is_month_shaped(month) {
            return Ok(decline("set_budget", Decline::InvalidMonth));
        }
        tx.execute(
            "INSERT INTO budgets(category_id, month, amount) VALUES (?1, ?2, ?3)
             ON CONFLICT(category_id, month) DO UPDATE SET amount=excluded.amount",
            params![category_id, month, amount],
        )?;
        tracing::debug!(category_id, month, %amount, "budget set");
        Ok(Outcome::Done(()))
    })
}

/// Budgets of expense categories for one month, ordered by category name.
pub fn for_month(store: &Store, month: &str) -> Result<Vec<Budget>> {
    store.read(|conn| {
        let mut stmt = conn.prepare(
            "SELECT b.id, b.category_id, c.name, b.month, b.amount
             FROM budgets b JOIN categories c ON b.category_id=c.id
             WHERE b.month=?1 AND c.type='expense'
             ORDER BY c.name COLLATE NOCASE",
        )?;
        let rows = stmt.query_map(params![month], |r| {
            Ok(Budget {
                id: r.get(0)?,
                category_id: r.get(1)?,
                category_name: r.get(2)?,
                month: r.get(3)?,
                amount: r.get(4)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    })
}
