// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request construction for the BPAPI control endpoint.
//!
//! Building a request is pure: given a group, a switch mode and resolved
//! credentials it yields the target URL and the headers to send. Nothing
//! here touches the network.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};

use crate::error::{Error, ValueError};
use crate::settings::Credentials;
use crate::types::{GroupId, SwitchMode};

/// Shape of the control URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EndpointStyle {
    /// `/api/Device/{id}/AddProperty/switch_mode/{0|1}/`
    #[default]
    SwitchMode,
    /// `/api/Device/{id}/{turnOn|turnOff}`
    ///
    /// Shape used by earlier releases of the vendor API.
    DeviceCommand,
}

impl EndpointStyle {
    /// Returns the URL path for the given group and mode.
    #[must_use]
    pub fn path(&self, group_id: GroupId, mode: SwitchMode) -> String {
        match self {
            Self::SwitchMode => format!(
                "/api/Device/{group_id}/AddProperty/switch_mode/{}/",
                mode.as_str()
            ),
            Self::DeviceCommand => format!("/api/Device/{group_id}/{}", mode.command()),
        }
    }
}

impl fmt::Display for EndpointStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SwitchMode => f.write_str("switch_mode"),
            Self::DeviceCommand => f.write_str("device_command"),
        }
    }
}

/// How the stored password is turned into the Basic auth password.
///
/// The BPAPI expects a fixed `!!!` suffix on the account password. The
/// suffix is kept as an explicit policy so it can be disabled if the
/// vendor drops the requirement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PasswordPolicy {
    /// Send the password unchanged.
    Plain,
    /// Append the given suffix before encoding.
    AppendSuffix(String),
}

impl PasswordPolicy {
    /// Suffix the BPAPI currently requires.
    pub const VENDOR_SUFFIX: &'static str = "!!!";

    /// Returns the password to encode.
    #[must_use]
    pub fn apply(&self, password: &str) -> String {
        match self {
            Self::Plain => password.to_string(),
            Self::AppendSuffix(suffix) => format!("{password}{suffix}"),
        }
    }

    /// Returns `true` if a suffix is appended.
    #[must_use]
    pub fn appends_suffix(&self) -> bool {
        matches!(self, Self::AppendSuffix(s) if !s.is_empty())
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self::AppendSuffix(Self::VENDOR_SUFFIX.to_string())
    }
}

/// A validated request to switch one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlRequest {
    /// The group to switch.
    pub group_id: GroupId,
    /// The desired state.
    pub mode: SwitchMode,
}

impl ControlRequest {
    /// Creates a request from already validated values.
    #[must_use]
    pub const fn new(group_id: GroupId, mode: SwitchMode) -> Self {
        Self { group_id, mode }
    }

    /// Creates a request from a raw numeric identifier and a desired state.
    ///
    /// # Errors
    ///
    /// Returns `ValueError` if `group_id` is not a finite, non-negative integer.
    pub fn from_raw(group_id: f64, desired_state: bool) -> Result<Self, ValueError> {
        Ok(Self {
            group_id: GroupId::from_f64(group_id)?,
            mode: SwitchMode::from(desired_state),
        })
    }
}

/// A fully built outbound request.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    url: String,
    headers: HeaderMap,
}

impl PreparedRequest {
    /// Returns the target URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the headers to send.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Splits the request into its URL and headers.
    #[must_use]
    pub fn into_parts(self) -> (String, HeaderMap) {
        (self.url, self.headers)
    }
}

/// Builds [`PreparedRequest`]s against a fixed base URL.
///
/// # Examples
///
/// ```
/// use sikom_lib::request::{EndpointStyle, PasswordPolicy, RequestBuilder};
/// use sikom_lib::settings::Credentials;
/// use sikom_lib::types::{GroupId, SwitchMode};
///
/// let builder = RequestBuilder::new(
///     "https://api.connome.com",
///     EndpointStyle::SwitchMode,
///     PasswordPolicy::Plain,
/// );
/// let request = builder
///     .build(GroupId::new(361_177), SwitchMode::On, &Credentials::new("u", "p"))
///     .unwrap();
/// assert_eq!(
///     request.url(),
///     "https://api.connome.com/api/Device/361177/AddProperty/switch_mode/1/"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    base_url: String,
    endpoint_style: EndpointStyle,
    password_policy: PasswordPolicy,
}

impl RequestBuilder {
    /// Creates a builder.
    ///
    /// Trailing slashes on `base_url` are dropped.
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        endpoint_style: EndpointStyle,
        password_policy: PasswordPolicy,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            endpoint_style,
            password_policy,
        }
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the endpoint style.
    #[must_use]
    pub fn endpoint_style(&self) -> EndpointStyle {
        self.endpoint_style
    }

    /// Returns the password policy.
    #[must_use]
    pub fn password_policy(&self) -> &PasswordPolicy {
        &self.password_policy
    }

    /// Builds the control URL.
    #[must_use]
    pub fn url(&self, group_id: GroupId, mode: SwitchMode) -> String {
        format!(
            "{}{}",
            self.base_url,
            self.endpoint_style.path(group_id, mode)
        )
    }

    /// Encodes the `Authorization` header value.
    #[must_use]
    pub fn basic_auth(&self, credentials: &Credentials) -> String {
        let password = self.password_policy.apply(&credentials.password);
        let token = STANDARD.encode(format!("{}:{password}", credentials.username));
        format!("Basic {token}")
    }

    /// Builds the request for switching `group_id` to `mode`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHeader`] if the encoded `Authorization`
    /// value is not a legal header value.
    pub fn build(
        &self,
        group_id: GroupId,
        mode: SwitchMode,
        credentials: &Credentials,
    ) -> Result<PreparedRequest, Error> {
        let mut auth = HeaderValue::from_str(&self.basic_auth(credentials))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(PreparedRequest {
            url: self.url(group_id, mode),
            headers,
        })
    }
}
