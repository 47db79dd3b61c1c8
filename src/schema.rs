// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Schema creation and versioned migrations.
//!
//! `PRAGMA user_version` records the last applied step. All pending steps run
//! in one transaction, so a failure leaves the previous schema untouched.

use rusqlite::{Connection, Transaction, params};

use crate::error::{LedgerError, Result};
use crate::money::Money;

struct Migration {
    version: i64,
    name: &'static str,
    apply: fn(&Transaction<'_>) -> rusqlite::Result<()>,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "create_tables",
        apply: create_tables,
    },
    Migration {
        version: 2,
        name: "seed_defaults",
        apply: seed_defaults,
    },
    Migration {
        version: 3,
        name: "monetary_columns_to_text",
        apply: monetary_columns_to_text,
    },
];

pub const TABLES: &[&str] = &["accounts", "categories", "transactions", "budgets", "settings"];

/// Columns holding money. They must be stored as exact decimal text.
pub const MONETARY_COLUMNS: &[(&str, &str)] = &[
    ("accounts", "initial_balance"),
    ("transactions", "amount"),
    ("budgets", "amount"),
];

pub fn latest_version() -> i64 {
    MIGRATIONS.last().map(|m| m.version).unwrap_or(0)
}

pub fn user_version(conn: &Connection) -> Result<i64> {
    Ok(conn.pragma_query_value(None, "user_version", |r| r.get(0))?)
}

pub(crate) fn initialize(conn: &mut Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = OFF;")?;
    let current = user_version(conn)?;
    let pending: Vec<&Migration> = MIGRATIONS.iter().filter(|m| m.version > current).collect();
    if pending.is_empty() {
        tracing::debug!(version = current, "schema up to date");
        return Ok(());
    }

    tracing::info!(from = current, to = latest_version(), "initializing database schema");
    let tx = conn.transaction()?;
    for m in pending {
        (m.apply)(&tx).map_err(|source| {
            tracing::error!(step = m.name, %source, "migration failed, rolling back");
            LedgerError::Migration {
                step: m.name,
                source,
            }
        })?;
        tracing::info!(step = m.name, version = m.version, "applied migration");
    }

    let violations = foreign_key_violations(&tx)?;
    if violations > 0 {
        tracing::warn!(violations, "existing rows violate foreign keys");
    }
    tx.pragma_update(None, "user_version", latest_version())?;
    tx.commit()?;
    tracing::info!("database schema initialization complete");
    Ok(())
}

/// Canonical DDL for `table`, created under `name` (the same name, or a
/// temporary one while rebuilding).
fn table_ddl(table: &str, name: &str) -> Option<String> {
    let body = match table {
        "accounts" => {
            r#"
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE COLLATE NOCASE,
            initial_balance TEXT NOT NULL DEFAULT '0.00',
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP"#
        }
        "categories" => {
            r#"
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE COLLATE NOCASE,
            type TEXT NOT NULL CHECK(type IN ('expense', 'income')) DEFAULT 'expense',
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP"#
        }
        "transactions" => {
            r#"
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            account_id INTEGER NOT NULL,
            date TEXT NOT NULL, -- YYYY-MM-DD
            description TEXT NOT NULL COLLATE NOCASE,
            amount TEXT NOT NULL,
            category_id INTEGER,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY(account_id) REFERENCES accounts(id) ON DELETE CASCADE,
            FOREIGN KEY(category_id) REFERENCES categories(id) ON DELETE SET NULL"#
        }
        "budgets" => {
            r#"
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            category_id INTEGER NOT NULL,
            month TEXT NOT NULL, -- YYYY-MM
            amount TEXT NOT NULL DEFAULT '0.00',
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            UNIQUE(category_id, month),
            FOREIGN KEY(category_id) REFERENCES categories(id) ON DELETE CASCADE"#
        }
        "settings" => {
            r#"
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT"#
        }
        _ => return None,
    };
    Some(format!("CREATE TABLE IF NOT EXISTS \"{name}\" ({body}\n);"))
}

fn index_ddl(table: &str) -> &'static [&'static str] {
    match table {
        "transactions" => &[
            "CREATE INDEX IF NOT EXISTS idx_transactions_account_date ON transactions(account_id, date);",
            "CREATE INDEX IF NOT EXISTS idx_transactions_category_date ON transactions(category_id, date);",
        ],
        "budgets" => &[
            "CREATE INDEX IF NOT EXISTS idx_budgets_month_category ON budgets(month, category_id);",
        ],
        _ => &[],
    }
}

fn create_tables(tx: &Transaction<'_>) -> rusqlite::Result<()> {
    for table in TABLES {
        if let Some(ddl) = table_ddl(table, table) {
            tx.execute_batch(&ddl)?;
        }
        for idx in index_ddl(table) {
            tx.execute_batch(idx)?;
        }
    }
    Ok(())
}

fn seed_defaults(tx: &Transaction<'_>) -> rusqlite::Result<()> {
    tx.execute(
        "INSERT OR IGNORE INTO categories(name, type) VALUES (?1, 'expense')",
        params![crate::models::UNCATEGORIZED],
    )?;
    tx.execute(
        "INSERT OR IGNORE INTO settings(key, value) VALUES ('theme', 'light')",
        [],
    )?;
    Ok(())
}

/// Rebuilds every table whose monetary column was declared with a binary
/// floating point type. No-op when none is found.
fn monetary_columns_to_text(tx: &Transaction<'_>) -> rusqlite::Result<()> {
    let mut migrated_any = false;
    for table in TABLES {
        let mut legacy: Vec<&str> = Vec::new();
        for (_, column) in MONETARY_COLUMNS.iter().filter(|(t, _)| t == table) {
            if column_type(tx, table, column)?.is_some_and(|ty| is_approximate_numeric(&ty)) {
                legacy.push(*column);
            }
        }
        if legacy.is_empty() {
            continue;
        }
        tracing::warn!(table = *table, columns = ?legacy, "found REAL monetary columns, migrating to TEXT");
        rebuild_with_text_money(tx, table, &legacy)?;
        migrated_any = true;
    }
    if !migrated_any {
        tracing::info!("no REAL monetary columns found");
    }
    Ok(())
}

fn rebuild_with_text_money(tx: &Transaction<'_>, table: &str, money_cols: &[&str]) -> rusqlite::Result<()> {
    let temp = format!("{table}_migrate_temp");
    let Some(ddl) = table_ddl(table, &temp) else {
        return Ok(());
    };
    tx.execute_batch(&format!("DROP TABLE IF EXISTS \"{temp}\";"))?;
    tx.execute_batch(&ddl)?;

    let new_cols = column_names(tx, &temp)?;
    let shared: Vec<String> = column_names(tx, table)?
        .into_iter()
        .filter(|c| new_cols.iter().any(|n| n.eq_ignore_ascii_case(c)))
        .collect();
    let is_money = |c: &str| money_cols.iter().any(|m| m.eq_ignore_ascii_case(c));

    let target = shared
        .iter()
        .map(|c| format!("\"{c}\""))
        .collect::<Vec<_>>()
        .join(", ");
    let select = shared
        .iter()
        .map(|c| {
            if is_money(c) {
                format!("COALESCE(CAST(\"{c}\" AS TEXT), '0.00')")
            } else {
                format!("\"{c}\"")
            }
        })
        .collect::<Vec<_>>()
        .join(", ");
    tx.execute(
        &format!("INSERT INTO \"{temp}\" ({target}) SELECT {select} FROM \"{table}\""),
        [],
    )?;
    tx.execute_batch(&format!(
        "DROP TABLE \"{table}\";
         ALTER TABLE \"{temp}\" RENAME TO \"{table}\";"
    ))?;

    for col in money_cols {
        requantize(tx, table, col)?;
    }
    for idx in index_ddl(table) {
        tx.execute_batch(idx)?;
    }
    tracing::info!(table, "migration successful");
    Ok(())
}

// CAST(REAL AS TEXT) keeps the shortest form ("25.5"); bring it to two places.
fn requantize(tx: &Transaction<'_>, table: &str, column: &str) -> rusqlite::Result<()> {
    let rows: Vec<(i64, String)> = {
        let mut stmt = tx.prepare(&format!("SELECT id, \"{column}\" FROM \"{table}\""))?;
        let mapped = stmt.query_map([], |r| Ok((r.get(0)?, r.get(1)?)))?;
        mapped.collect::<rusqlite::Result<_>>()?
    };
    let mut update = tx.prepare(&format!("UPDATE \"{table}\" SET \"{column}\"=?1 WHERE id=?2"))?;
    for (id, text) in rows {
        update.execute(params![Money::parse_or_zero(&text), id])?;
    }
    Ok(())
}

pub(crate) fn column_names(conn: &Connection, table: &str) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info(\"{table}\")"))?;
    let rows = stmt.query_map([], |r| r.get::<_, String>(1))?;
    rows.collect()
}

/// Declared type of `table.column`, `None` if the table or column is missing.
pub fn column_type(conn: &Connection, table: &str, column: &str) -> rusqlite::Result<Option<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info(\"{table}\")"))?;
    let mut rows = stmt.query([])?;
    while let Some(r) = rows.next()? {
        let name: String = r.get(1)?;
        if name.eq_ignore_ascii_case(column) {
            return Ok(Some(r.get(2)?));
        }
    }
    Ok(None)
}

/// Whether a declared column type gets REAL affinity in SQLite, i.e. stores
/// approximate binary numbers.
pub fn is_approximate_numeric(declared: &str) -> bool {
    let d = declared.to_uppercase();
    if d.contains("INT") || d.contains("CHAR") || d.contains("CLOB") || d.contains("TEXT") {
        return false;
    }
    if d.contains("BLOB") {
        return false;
    }
    d.contains("REAL") || d.contains("FLOA") || d.contains("DOUB")
}

fn foreign_key_violations(conn: &Connection) -> rusqlite::Result<usize> {
    let mut stmt = conn.prepare("PRAGMA foreign_key_check")?;
    let mut rows = stmt.query([])?;
    let mut n = 0;
    while rows.next()?.is_some() {
        n += 1;
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_affinity_detection() {
        assert!(is_approximate_numeric("REAL"));
        assert!(is_approximate_numeric("real"));
        assert!(is_approximate_numeric("DOUBLE PRECISION"));
        assert!(is_approximate_numeric("FLOAT"));
        assert!(!is_approximate_numeric("TEXT"));
        assert!(!is_approximate_numeric("DECIMAL"));
        assert!(!is_approximate_numeric("INTEGER"));
        assert!(!is_approximate_numeric("FLOATING POINT"));
        assert!(!is_approximate_numeric(""));
    }

    #[test]
    fn every_table_has_ddl() {
        for table in TABLES {
            assert!(table_ddl(table, table).is_some(), "{table}");
        }
        assert!(table_ddl("nope", "nope").is_none());
    }

    #[test]
    fn fresh_database_reaches_latest_version() {
        let mut conn = Connection::open_in_memory().unwrap();
        initialize(&mut conn).unwrap();
        assert_eq!(user_version(&conn).unwrap(), latest_version());
        for (table, col) in MONETARY_COLUMNS {
            assert_eq!(column_type(&conn, table, col).unwrap().as_deref(), Some("TEXT"));
        }
        let n: i64 = conn
            .query_row("SELECT COUNT(*) FROM categories WHERE name='uncategorized'", [], |r| r.get(0))
            .unwrap();
        assert_eq!(n, 1);
    }
}
