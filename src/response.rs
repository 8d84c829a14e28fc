// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vendor response parsing and classification.
//!
//! A control call succeeds in two tiers. The HTTP status must be 2xx, and
//! if the body carries an application status (`Data.bpapi_status`) it must
//! be `ok` or `success`. Bodies that are not JSON are accepted once the
//! HTTP tier has passed; the BPAPI sometimes answers with plain text.

use serde_json::Value;

use crate::error::Error;

/// Maximum body excerpt length written to logs.
pub const LOG_EXCERPT_LEN: usize = 300;
/// Maximum body excerpt length carried by [`Error::Http`].
pub const ERROR_EXCERPT_LEN: usize = 200;

/// Application statuses that count as success (lowercase).
const ACCEPTED_STATUSES: [&str; 2] = ["ok", "success"];

/// Truncates `input` to at most `max` characters, appending `…` when cut.
///
/// # Examples
///
/// ```
/// use sikom_lib::response::truncate_for_log;
///
/// assert_eq!(truncate_for_log("short", 10), "short");
/// assert_eq!(truncate_for_log("abcdef", 3), "abc…");
/// ```
#[must_use]
pub fn truncate_for_log(input: &str, max: usize) -> String {
    match input.char_indices().nth(max) {
        Some((idx, _)) => format!("{}…", &input[..idx]),
        None => input.to_string(),
    }
}

/// Application status pair read from a BPAPI body.
///
/// ```json
/// {"Data": {"bpapi_status": "OK", "bpapi_message": "..."}}
/// ```
///
/// Both fields are taken verbatim. Non-string values are rendered as
/// their JSON text so that an unexpected type can never hide a status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiStatus {
    /// Application status, e.g. `OK` or `Error`.
    pub status: Option<String>,
    /// Human-readable detail accompanying the status.
    pub message: Option<String>,
}

impl ApiStatus {
    /// Extracts `Data.bpapi_status` / `Data.bpapi_message` from a JSON document.
    ///
    /// Missing fields, `null` values and a `Data` that is not an object all
    /// yield `None`.
    #[must_use]
    pub fn from_value(body: &Value) -> Self {
        let data = body.get("Data");
        Self {
            status: data.and_then(|d| d.get("bpapi_status")).and_then(as_text),
            message: data.and_then(|d| d.get("bpapi_message")).and_then(as_text),
        }
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// An empty status carries no opinion; anything else must be accepted.
fn is_rejected(status: &str) -> bool {
    !status.is_empty() && !ACCEPTED_STATUSES.contains(&status)
}

/// Raw outcome of one HTTP exchange.
#[derive(Debug, Clone)]
pub struct VendorResponse {
    status: u16,
    body: String,
}

/// Result of a successful classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The body parsed and carried an accepted status (or none at all).
    Accepted,
    /// The body was not JSON; success was inferred from the HTTP status.
    NonJson,
}

impl VendorResponse {
    /// Creates a response from its status code and full body text.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns the raw body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns `true` for 2xx statuses.
    #[must_use]
    pub fn is_http_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Reads the application status pair, if the body is JSON.
    #[must_use]
    pub fn parse(&self) -> Option<ApiStatus> {
        serde_json::from_str::<Value>(&self.body)
            .ok()
            .map(|body| ApiStatus::from_value(&body))
    }

    /// Applies the two-tier success policy.
    ///
    /// # Errors
    ///
    /// - [`Error::Http`] for non-2xx statuses; the body is not inspected
    /// - [`Error::Application`] if `Data.bpapi_status` is present, non-empty
    ///   and neither `ok` nor `success` (case-insensitive)
    pub fn classify(&self) -> Result<Outcome, Error> {
        if !self.is_http_success() {
            return Err(Error::Http {
                status: self.status,
                body: truncate_for_log(&self.body, ERROR_EXCERPT_LEN),
            });
        }

        let Some(ApiStatus { status, message }) = self.parse() else {
            return Ok(Outcome::NonJson);
        };

        match status.map(|s| s.to_lowercase()) {
            Some(status) if is_rejected(&status) => Err(Error::Application { status, message }),
            _ => Ok(Outcome::Accepted),
        }
    }
}
