// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Balances and aggregates derived from the transaction log on every call.
//!
//! Amounts are read back as text and summed as decimals, never with SQLite's
//! `SUM` (binary floats). `CAST(amount AS REAL)` appears only in sign filters.
//! A total that leaves the decimal range is `LedgerError::Overflow`.

use std::collections::HashMap;

use rusqlite::{Connection, OptionalExtension, params};

use crate::db::Store;
use crate::error::{LedgerError, Result};
use crate::models::{AccountBalance, IncomeExpenseSummary};
use crate::money::Money;

fn sum_amounts(
    conn: &Connection,
    what: &'static str,
    sql: &str,
    args: impl rusqlite::Params,
) -> Result<Money> {
    let mut stmt = conn.prepare(sql)?;
    let amounts = stmt
        .query_map(args, |r| r.get::<_, Money>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Money::checked_sum(amounts).ok_or(LedgerError::Overflow(what))
}

/// `initial_balance + Σ amounts`, quantized once at the end.
/// `None` when the account does not exist.
pub fn current_balance(store: &Store, account_id: i64) -> Result<Option<Money>> {
    store.read(|conn| balance_of(conn, account_id))
}

fn balance_of(conn: &Connection, account_id: i64) -> Result<Option<Money>> {
    let initial: Option<Money> = conn
        .query_row(
            "SELECT initial_balance FROM accounts WHERE id=?1",
            params![account_id],
            |r| r.get(0),
        )
        .optional()?;
    let Some(initial) = initial else {
        tracing::warn!(account_id, "account not found for balance");
        return Ok(None);
    };
    let moved = sum_amounts(
        conn,
        "account balance",
        "SELECT amount FROM transactions WHERE account_id=?1",
        params![account_id],
    )?;
    let balance = initial
        .checked_add(moved)
        .ok_or(LedgerError::Overflow("account balance"))?;
    Ok(Some(balance.quantize()))
}

/// Every account with its derived balance, ordered by name.
pub fn accounts_with_balances(store: &Store) -> Result<Vec<AccountBalance>> {
    store.read(all_balances)
}

pub(crate) fn all_balances(conn: &Connection) -> Result<Vec<AccountBalance>> {
    let mut moved: HashMap<i64, Money> = HashMap::new();
    {
        let mut stmt = conn.prepare("SELECT account_id, amount FROM transactions")?;
        let rows = stmt.query_map([], |r| Ok((r.get::<_, i64>(0)?, r.get::<_, Money>(1)?)))?;
        for row in rows {
            let (account_id, amount) = row?;
            let total = moved.entry(account_id).or_insert(Money::ZERO);
            *total = total
                .checked_add(amount)
                .ok_or(LedgerError::Overflow("account balance"))?;
        }
    }

    let mut stmt =
        conn.prepare("SELECT id, name, initial_balance FROM accounts ORDER BY name COLLATE NOCASE")?;
    let rows = stmt.query_map([], |r| {
        Ok((r.get::<_, i64>(0)?, r.get::<_, String>(1)?, r.get::<_, Money>(2)?))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, name, initial) = row?;
        let delta = moved.get(&id).copied().unwrap_or(Money::ZERO);
        let current = initial
            .checked_add(delta)
            .ok_or(LedgerError::Overflow("account balance"))?;
        out.push(AccountBalance {
            id,
            name,
            initial_balance: initial.quantize(),
            current_balance: current.quantize(),
        });
    }
    Ok(out)
}

/// Σ current balances over all accounts, quantized once.
pub fn total_net_balance(store: &Store) -> Result<Money> {
    store.read(|conn| net_of(&all_balances(conn)?))
}

pub(crate) fn net_of(balances: &[AccountBalance]) -> Result<Money> {
    Money::checked_sum(balances.iter().map(|b| b.current_balance))
        .map(Money::quantize)
        .ok_or(LedgerError::Overflow("net balance"))
}

/// Magnitude of the expenses in `category_id` during `month` (YYYY-MM).
pub fn spending_for(store: &Store, category_id: i64, month: &str) -> Result<Money> {
    store.read(|conn| spending_in(conn, category_id, month))
}

pub(crate) fn spending_in(conn: &Connection, category_id: i64, month: &str) -> Result<Money> {
    let total = sum_amounts(
        conn,
        "category spending",
        "SELECT amount FROM transactions
         WHERE category_id=?1 AND substr(date,1,7)=?2 AND CAST(amount AS REAL) < 0",
        params![category_id, month],
    )?;
    Ok(total.abs().quantize())
}

/// Income and expense totals of `month`, each quantized on its own.
pub fn income_expense_summary(store: &Store, month: &str) -> Result<IncomeExpenseSummary> {
    store.read(|conn| summary_in(conn, month))
}

pub(crate) fn summary_in(conn: &Connection, month: &str) -> Result<IncomeExpenseSummary> {
    let income = sum_amounts(
        conn,
        "monthly income",
        "SELECT amount FROM transactions WHERE substr(date,1,7)=?1 AND CAST(amount AS REAL) > 0",
        params![month],
    )?;
    let expense = sum_amounts(
        conn,
        "monthly expense",
        "SELECT amount FROM transactions WHERE substr(date,1,7)=?1 AND CAST(amount AS REAL) < 0",
        params![month],
    )?;
    Ok(IncomeExpenseSummary {
        total_income: income.quantize(),
        total_expense: expense.abs().quantize(),
    })
}
