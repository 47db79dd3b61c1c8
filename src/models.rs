// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::error::Decline;
use crate::money::Money;

pub const UNCATEGORIZED: &str = "Uncategorized";
pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_DESC_LENGTH: usize = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Expense,
    Income,
}

impl CategoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKind::Expense => "expense",
            CategoryKind::Income => "income",
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryKind {
    type Err = Decline;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "expense" => Ok(CategoryKind::Expense),
            "income" => Ok(CategoryKind::Income),
            _ => Err(Decline::InvalidCategoryType),
        }
    }
}

impl ToSql for CategoryKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for CategoryKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        s.parse().map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub initial_balance: Money,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub kind: CategoryKind,
    pub created_at: Option<NaiveDateTime>,
}

impl Category {
    pub fn is_protected(&self) -> bool {
        is_uncategorized(&self.name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub account_id: i64,
    pub date: String, // YYYY-MM-DD
    pub description: String,
    pub amount: Money,
    pub category_id: Option<i64>,
    pub created_at: Option<NaiveDateTime>,
}

/// Transaction joined with its account and category names, as listed to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRow {
    pub id: i64,
    pub account_id: i64,
    pub account_name: String,
    pub date: String,
    pub description: String,
    pub amount: Money,
    pub category_id: Option<i64>,
    pub category_name: String,
    pub category_kind: CategoryKind,
}

/// Fields of a transaction write.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub account_id: i64,
    pub date: String,
    pub description: String,
    pub amount: Money,
    pub category_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub category_id: i64,
    pub category_name: String,
    pub month: String, // YYYY-MM
    pub amount: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountBalance {
    pub id: i64,
    pub name: String,
    pub initial_balance: Money,
    pub current_balance: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeExpenseSummary {
    pub total_income: Money,
    pub total_expense: Money,
}

impl IncomeExpenseSummary {
    /// Income minus expense, `None` if the difference is not representable.
    pub fn net(&self) -> Option<Money> {
        self.total_income
            .checked_sub(self.total_expense)
            .map(Money::quantize)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySpend {
    pub category_name: String,
    pub spent_amount: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetLine {
    pub category_id: i64,
    pub category_name: String,
    pub budgeted_amount: Money,
    pub spent_amount: Money,
    pub remaining_amount: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub accounts: Vec<AccountBalance>,
    pub total_balance: Money,
    pub account_count: usize,
    pub recent_transactions: Vec<TransactionRow>,
    pub monthly_flow: Money,
    pub current_month: String,
}

pub fn is_uncategorized(name: &str) -> bool {
    name.trim().eq_ignore_ascii_case(UNCATEGORIZED)
}

/// Structural month check: seven characters with a hyphen at position 4.
pub fn is_month_shaped(month: &str) -> bool {
    month.chars().count() == 7 && month.chars().nth(4) == Some('-')
}

pub(crate) fn clean_name(name: &str) -> Result<String, Decline> {
    let cleaned = name.trim();
    if cleaned.is_empty() {
        return Err(Decline::EmptyName);
    }
    if cleaned.chars().count() > MAX_NAME_LENGTH {
        return Err(Decline::NameTooLong);
    }
    Ok(cleaned.to_string())
}

pub(crate) fn clean_description(description: &str) -> Result<String, Decline> {
    let cleaned = description.trim();
    if cleaned.is_empty() {
        return Err(Decline::EmptyDescription);
    }
    if cleaned.chars().count() > MAX_DESC_LENGTH {
        return Err(Decline::DescriptionTooLong);
    }
    Ok(cleaned.to_string())
}
