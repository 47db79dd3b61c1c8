// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use serde::Serialize;

use crate::api::Response;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_month(s: &str) -> Result<String> {
    let s = s.trim();
    chrono::NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok(s.to_string())
}

pub fn parse_id(s: &str, what: &str) -> Result<i64> {
    s.trim()
        .parse::<i64>()
        .with_context(|| format!("Invalid {} ID '{}'", what, s))
}

/// Validates an inclusive `start..=end` date range.
pub fn parse_range(start: &str, end: &str) -> Result<(String, String)> {
    let s = parse_date(start)?;
    let e = parse_date(end)?;
    if s > e {
        bail!("Start date {} is after end date {}", s, e);
    }
    Ok((s.to_string(), e.to_string()))
}

pub fn current_month() -> String {
    chrono::Local::now().format("%Y-%m").to_string()
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

/// Prints the JSON envelope when `json_flag` is set; returns whether it did.
pub fn maybe_print_json<T: Serialize>(json_flag: bool, resp: &Response<T>) -> Result<bool> {
    if json_flag {
        println!("{}", resp.to_json()?);
        return Ok(true);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_must_be_a_calendar_month() {
        assert_eq!(parse_month("2024-01").unwrap(), "2024-01");
        assert!(parse_month("2024/01").is_err());
        assert!(parse_month("2024-13").is_err());
    }

    #[test]
    fn range_rejects_reversed_dates() {
        assert!(parse_range("2024-01-31", "2024-01-01").is_err());
        let (s, e) = parse_range("2024-01-01", " 2024-01-31").unwrap();
        assert_eq!((s.as_str(), e.as_str()), ("2024-01-01", "2024-01-31"));
    }
}
