// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Serializable envelope handed to presentation layers.
//!
//! - success: `{"success": true, "data": ...}`
//! - declined write: `{"success": false, "declined": "<code>", "error": ...}`
//! - faulted write: `{"success": false, "error": ...}` with no `declined` code
//! - faulted read: `{"success": false, "data": <fallback>, "error": ...}` so the
//!   caller can still render something.

use serde::Serialize;

use crate::error::{Decline, LedgerError, Outcome};

#[derive(Debug, Clone, Serialize)]
pub struct Response<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declined: Option<Decline>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> Response<T> {
    pub fn ok(data: T) -> Self {
        Response {
            success: true,
            data: Some(data),
            declined: None,
            error: None,
        }
    }

    pub fn declined(reason: Decline) -> Self {
        Response {
            success: false,
            data: None,
            declined: Some(reason),
            error: Some(reason.to_string()),
        }
    }

    pub fn faulted(err: &LedgerError) -> Self {
        Response {
            success: false,
            data: None,
            declined: None,
            error: Some(err.to_string()),
        }
    }

    /// Read results: a fault becomes a failed response carrying `fallback`.
    pub fn from_read(result: Result<T, LedgerError>, fallback: T) -> Self {
        match result {
            Ok(data) => Response::ok(data),
            Err(err) => {
                tracing::error!(%err, "read failed, responding with fallback");
                Response {
                    data: Some(fallback),
                    ..Response::faulted(&err)
                }
            }
        }
    }

    /// Write results: done, declined or faulted.
    pub fn from_write(result: Result<Outcome<T>, LedgerError>) -> Self {
        match result {
            Ok(Outcome::Done(data)) => Response::ok(data),
            Ok(Outcome::Declined(reason)) => Response::declined(reason),
            Err(err) => {
                tracing::error!(%err, "write failed");
                Response::faulted(&err)
            }
        }
    }

    pub fn to_json(&self) -> Result<String, LedgerError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Decline;
    use crate::money::Money;

    #[test]
    fn declined_write_has_no_data() {
        let r: Response<i64> = Response::from_write(Ok(Outcome::Declined(Decline::DuplicateName)));
        let v: serde_json::Value = serde_json::from_str(&r.to_json().unwrap()).unwrap();
        assert_eq!(v["success"], false);
        assert_eq!(v["error"], "name already exists");
        assert_eq!(v["declined"], "duplicate_name");
        assert!(v.get("data").is_none());
    }

    #[test]
    fn faulted_write_differs_from_declined_write() {
        let declined: Response<()> = Response::from_write(Ok(Outcome::Declined(Decline::NotFound)));
        let faulted: Response<()> =
            Response::from_write(Err(LedgerError::Storage(rusqlite::Error::InvalidQuery)));
        let d: serde_json::Value = serde_json::from_str(&declined.to_json().unwrap()).unwrap();
        let f: serde_json::Value = serde_json::from_str(&faulted.to_json().unwrap()).unwrap();

        assert_eq!(d["success"], false);
        assert_eq!(f["success"], false);
        assert_eq!(d["declined"], "not_found");
        assert!(f.get("declined").is_none());
        assert!(f["error"].as_str().unwrap().contains("storage error"));
    }

    #[test]
    fn faulted_read_carries_fallback() {
        let err = LedgerError::Storage(rusqlite::Error::InvalidQuery);
        let r = Response::from_read(Err(err), Money::ZERO);
        let v: serde_json::Value = serde_json::from_str(&r.to_json().unwrap()).unwrap();
        assert_eq!(v["success"], false);
        assert_eq!(v["data"], "0.00");
        assert!(v.get("declined").is_none());
        assert!(v["error"].as_str().unwrap().contains("storage error"));
    }
}
