// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Exact fixed-point money.
//!
//! Amounts are carried as [`rust_decimal::Decimal`] and quantized to two
//! fractional digits (round half away from zero) whenever they cross the
//! storage boundary. Binary floats never take part in arithmetic, and sums go
//! through checked operations so overflow is reported instead of panicking.

use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of fractional digits kept in storage and reports.
pub const SCALE: u32 = 2;

/// Signed monetary amount. Positive is income/credit, negative is expense/debit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Rounds to exactly two fractional digits, half away from zero.
    /// Quantizing an already quantized value is a no-op.
    pub fn quantize(self) -> Money {
        let mut d = self
            .0
            .round_dp_with_strategy(SCALE, RoundingStrategy::MidpointAwayFromZero);
        d.rescale(SCALE);
        if d.is_zero() {
            d.set_sign_positive(true);
        }
        Money(d)
    }

    /// Lenient parse of user supplied text.
    ///
    /// Trims whitespace and accepts `,` as well as `.` as the decimal
    /// separator. Empty or malformed input yields `default` instead of an
    /// error. The result is not quantized; that happens on write.
    pub fn parse_with_default(text: &str, default: Money) -> Money {
        let cleaned = text.trim();
        if cleaned.is_empty() {
            return default;
        }
        match Decimal::from_str(&cleaned.replace(',', ".")) {
            Ok(d) => Money(d),
            Err(err) => {
                tracing::warn!(input = %text, %err, "could not parse amount, using default");
                default
            }
        }
    }

    /// [`Money::parse_with_default`] falling back to zero.
    pub fn parse_or_zero(text: &str) -> Money {
        Self::parse_with_default(text, Money::ZERO)
    }

    /// `None` when the result leaves the representable range.
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    /// Exact total of `amounts`, `None` on overflow.
    pub fn checked_sum(amounts: impl IntoIterator<Item = Money>) -> Option<Money> {
        amounts
            .into_iter()
            .try_fold(Money::ZERO, |acc, m| acc.checked_add(m))
    }

    pub fn abs(self) -> Money {
        Money(self.0.abs())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.quantize().0)
    }
}

/// Strict parse, used where malformed text must surface as an error.
impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(&s.trim().replace(',', ".")).map(Money)
    }
}

impl Neg for Money {
    type Output = Money;

    // The decimal range is symmetric, so negation cannot overflow.
    fn neg(self) -> Money {
        Money(-self.0)
    }
}

// Stored as quantized decimal text, never as REAL.
impl ToSql for Money {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.quantize().0.to_string()))
    }
}

impl FromSql for Money {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Text(bytes) => {
                let text = std::str::from_utf8(bytes).map_err(|e| FromSqlError::Other(Box::new(e)))?;
                Ok(Money::parse_or_zero(text))
            }
            ValueRef::Integer(i) => Ok(Money(Decimal::from(i))),
            // Legacy rows that slipped through as REAL: go through the shortest
            // textual form so 0.1 reads back as 0.1, not its binary expansion.
            ValueRef::Real(f) => Ok(Money::parse_or_zero(&f.to_string())),
            ValueRef::Null => Ok(Money::ZERO),
            ValueRef::Blob(_) => Err(FromSqlError::InvalidType),
        }
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.quantize().0)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse::<Money>().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(s: &str) -> Money {
        s.parse().unwrap()
    }

    #[test]
    fn quantize_rounds_half_away_from_zero() {
        assert_eq!(m("2.675").quantize().to_string(), "2.68");
        assert_eq!(m("-2.675").quantize().to_string(), "-2.68");
        assert_eq!(m("2.674").quantize().to_string(), "2.67");
        assert_eq!(m("5").quantize().to_string(), "5.00");
    }

    #[test]
    fn quantize_is_idempotent() {
        let once = m("19.995").quantize();
        assert_eq!(once.quantize().to_string(), once.to_string());
        assert_eq!(once.to_string(), "20.00");
    }

    #[test]
    fn negative_zero_renders_plain() {
        assert_eq!(m("-0.001").quantize().to_string(), "0.00");
    }

    #[test]
    fn lenient_parse_accepts_both_separators() {
        assert_eq!(Money::parse_or_zero(" 12,50 "), m("12.50"));
        assert_eq!(Money::parse_or_zero("12.5"), m("12.50"));
        assert_eq!(Money::parse_or_zero("-3,1").quantize().to_string(), "-3.10");
    }

    #[test]
    fn lenient_parse_falls_back_on_garbage() {
        assert_eq!(Money::parse_or_zero("abc"), Money::ZERO);
        assert_eq!(Money::parse_or_zero("   "), Money::ZERO);
        assert_eq!(Money::parse_or_zero("1,234.56"), Money::ZERO);
        assert_eq!(Money::parse_with_default("", m("1.00")), m("1.00"));
    }

    #[test]
    fn repeated_addition_does_not_drift() {
        let total = Money::checked_sum(std::iter::repeat(m("0.10")).take(1000)).unwrap();
        assert_eq!(total.to_string(), "100.00");
    }

    #[test]
    fn serializes_as_two_decimal_string() {
        let json = serde_json::to_string(&m("7.5")).unwrap();
        assert_eq!(json, "\"7.50\"");
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m("7.50"));
    }

    #[test]
    fn overflow_is_reported_not_raised() {
        let max = m("79228162514264337593543950335");
        assert_eq!(max.checked_add(m("1")), None);
        assert_eq!((-max).checked_sub(m("1")), None);
        assert_eq!(Money::checked_sum([max, max]), None);
        assert_eq!(max.checked_sub(max), Some(Money::ZERO));
    }
}
