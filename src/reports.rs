// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use rusqlite::params;

use crate::balances::{all_balances, net_of, spending_in, summary_in};
use crate::db::Store;
use crate::error::{LedgerError, Result};
use crate::models::{BudgetLine, CategoryKind, CategorySpend, Dashboard, UNCATEGORIZED, is_uncategorized};
use crate::money::Money;
use crate::repo::transactions::query_rows;

/// Expense totals per category between `start_date` and `end_date` inclusive,
/// largest first. Transactions without a category count as `Uncategorized`.
///
/// Dates are compared as `YYYY-MM-DD` text; the caller ensures `start <= end`.
pub fn spending_by_category(store: &Store, start_date: &str, end_date: &str) -> Result<Vec<CategorySpend>> {
    store.read(|conn| {
        let mut stmt = conn.prepare(
            "SELECT IFNULL(c.name, ?3), t.amount
             FROM transactions t LEFT JOIN categories c ON t.category_id=c.id
             WHERE CAST(t.amount AS REAL) < 0 AND t.date BETWEEN ?1 AND ?2",
        )?;
        let rows = stmt.query_map(params![start_date, end_date, UNCATEGORIZED], |r| {
            Ok((r.get::<_, String>(0)?, r.get::<_, Money>(1)?))
        })?;

        // Category names are unique case-insensitively; fold on that key and
        // keep the first spelling seen.
        let mut groups: HashMap<String, (String, Money)> = HashMap::new();
        for row in rows {
            let (name, amount) = row?;
            let entry = groups
                .entry(name.to_lowercase())
                .or_insert_with(|| (name.clone(), Money::ZERO));
            entry.1 = entry
                .1
                .checked_add(amount)
                .ok_or(LedgerError::Overflow("category spending"))?;
        }

        let mut out: Vec<CategorySpend> = groups
            .into_values()
            .map(|(category_name, total)| CategorySpend {
                category_name,
                spent_amount: (-total).quantize(),
            })
            .filter(|s| s.spent_amount > Money::ZERO)
            .collect();
        out.sort_by(|a, b| {
            b.spent_amount
                .cmp(&a.spent_amount)
                .then_with(|| a.category_name.to_lowercase().cmp(&b.category_name.to_lowercase()))
        });
        Ok(out)
    })
}

/// Budgeted, spent and remaining amounts for every expense category except
/// `Uncategorized` in `month`, ordered by name.
pub fn budget_overview(store: &Store, month: &str) -> Result<Vec<BudgetLine>> {
    store.read(|conn| {
        let mut budgets: HashMap<i64, Money> = HashMap::new();
        {
            let mut stmt = conn.prepare("SELECT category_id, amount FROM budgets WHERE month=?1")?;
            let rows = stmt.query_map(params![month], |r| Ok((r.get::<_, i64>(0)?, r.get::<_, Money>(1)?)))?;
            for row in rows {
                let (id, amount) = row?;
                budgets.insert(id, amount);
            }
        }

        let mut stmt = conn.prepare(
            "SELECT id, name FROM categories WHERE type=?1 ORDER BY name COLLATE NOCASE",
        )?;
        let cats = stmt.query_map(params![CategoryKind::Expense], |r| {
            Ok((r.get::<_, i64>(0)?, r.get::<_, String>(1)?))
        })?;
        let mut lines = Vec::new();
        for cat in cats {
            let (category_id, category_name) = cat?;
            if is_uncategorized(&category_name) {
                continue;
            }
            let budgeted = budgets.get(&category_id).copied().unwrap_or(Money::ZERO).quantize();
            let spent = spending_in(conn, category_id, month)?;
            let remaining = budgeted
                .checked_sub(spent)
                .ok_or(LedgerError::Overflow("budget remaining"))?;
            lines.push(BudgetLine {
                category_id,
                category_name,
                budgeted_amount: budgeted,
                spent_amount: spent,
                remaining_amount: remaining.quantize(),
            });
        }
        Ok(lines)
    })
}

/// Snapshot for a landing screen: balances, recent activity and the flow of `month`.
pub fn dashboard(store: &Store, month: &str, recent_limit: usize) -> Result<Dashboard> {
    store.read(|conn| {
        let accounts = all_balances(conn)?;
        let total_balance = net_of(&accounts)?;
        let recent_transactions = query_rows(conn, None, Some(recent_limit))?;
        let summary = summary_in(conn, month)?;
        Ok(Dashboard {
            account_count: accounts.len(),
            accounts,
            total_balance,
            recent_transactions,
            monthly_flow: summary.net().ok_or(LedgerError::Overflow("monthly flow"))?,
            current_month: month.to_string(),
        })
    })
}
