// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `sikom_lib` library.
//!
//! Every failure of a group control call maps onto one [`Error`] variant.
//! Configuration and argument errors are raised before any network access;
//! the remaining variants describe what happened on the wire.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Required settings are absent or unusable.
    #[error("missing settings: please configure {0}")]
    Configuration(String),

    /// The caller supplied a malformed argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] ValueError),

    /// The server answered with a non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    Http {
        /// The HTTP status code.
        status: u16,
        /// A truncated excerpt of the response body.
        body: String,
    },

    /// HTTP succeeded but the vendor's embedded status reported a failure.
    #[error(
        "API reported non-success status [{status}]: {}",
        .message.as_deref().unwrap_or("unknown")
    )]
    Application {
        /// The vendor status, lowercased.
        status: String,
        /// The vendor message, if one was sent.
        message: Option<String>,
    },

    /// A header value could not be encoded for the wire.
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// Transport-level failure (DNS, connection refused, timeout).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl Error {
    /// Returns `true` if repeating the same call could succeed.
    ///
    /// Only transport failures qualify. The client itself never retries;
    /// this is a hint for callers.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Returns the HTTP status code carried by this error, if any.
    #[must_use]
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Network(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Errors related to value validation and constraints.
///
/// These errors occur when attempting to create constrained types
/// from caller input.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueError {
    /// The group identifier is NaN or infinite.
    #[error("group id {0} is not a finite number")]
    NonFiniteGroupId(f64),

    /// The group identifier has a fractional part.
    #[error("group id {0} is not an integer")]
    FractionalGroupId(f64),

    /// The group identifier is negative or too large.
    #[error("group id {0} is out of range")]
    GroupIdOutOfRange(String),

    /// The group identifier could not be read as a number.
    #[error("group id {0:?} is not numeric")]
    NonNumericGroupId(String),

    /// The action payload has no group identifier.
    #[error("missing groupId argument")]
    MissingGroupId,

    /// An unknown switch word was supplied.
    #[error("invalid switch mode: {0} (expected on or off)")]
    InvalidSwitchMode(String),

    /// An unknown action identifier was supplied.
    #[error("unknown action: {0}")]
    UnknownAction(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
