// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{OptionalExtension, params};

use super::decline;
use crate::db::Store;
use crate::error::{Decline, Outcome, Result};

pub const THEME_KEY: &str = "theme";
pub const THEMES: &[&str] = &["light", "dark"];

/// Value for `key`, or `default` when absent or when the store fails.
pub fn get(store: &Store, key: &str, default: &str) -> String {
    let value = store.read(|conn| {
        let v: Option<Option<String>> = conn
            .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| r.get(0))
            .optional()?;
        Ok(v.flatten())
    });
    match value {
        Ok(Some(v)) => v,
        Ok(None) => default.to_string(),
        Err(err) => {
            tracing::error!(key, %err, "could not read setting, using default");
            default.to_string()
        }
    }
}

pub fn set(store: &Store, key: &str, value: &str) -> Result<()> {
    store.with_tx(|tx| {
        tx.execute(
            "INSERT INTO settings(key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![key, value],
        )?;
        tracing::info!(key, value, "setting saved");
        Ok(())
    })
}

pub fn theme(store: &Store) -> String {
    get(store, THEME_KEY, "light")
}

/// Saves the UI theme; only `light` and `dark` are accepted.
pub fn set_theme(store: &Store, theme: &str) -> Result<Outcome<()>> {
    let theme = theme.trim().to_lowercase();
    if !THEMES.contains(&theme.as_str()) {
        return Ok(decline("set_theme", Decline::InvalidTheme));
    }
    set(store, THEME_KEY, &theme)?;
    Ok(Outcome::Done(()))
}
