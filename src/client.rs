// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Group control client.

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::Client;

use crate::error::{Error, Result};
use crate::request::{
    ControlRequest, EndpointStyle, PasswordPolicy, PreparedRequest, RequestBuilder,
};
use crate::response::{LOG_EXCERPT_LEN, Outcome, VendorResponse, truncate_for_log};
use crate::settings::{self, SettingsReader};
use crate::types::{GroupId, SwitchMode};

// ============================================================================
// ClientConfig
// ============================================================================

/// Configuration for a [`SikomClient`].
///
/// # Examples
///
/// ```
/// use sikom_lib::ClientConfig;
/// use sikom_lib::request::{EndpointStyle, PasswordPolicy};
/// use std::time::Duration;
///
/// let config = ClientConfig::new()
///     .with_base_url("https://api.example.test")
///     .with_endpoint_style(EndpointStyle::SwitchMode)
///     .with_password_policy(PasswordPolicy::Plain)
///     .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.base_url(), "https://api.example.test");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: String,
    endpoint_style: EndpointStyle,
    password_policy: PasswordPolicy,
    timeout: Duration,
}

impl ClientConfig {
    /// Default vendor base URL.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.connome.com";
    /// Default transport timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration with the vendor defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            endpoint_style: EndpointStyle::default(),
            password_policy: PasswordPolicy::default(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets the base URL (scheme and host, no path).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Selects the endpoint shape.
    #[must_use]
    pub fn with_endpoint_style(mut self, endpoint_style: EndpointStyle) -> Self {
        self.endpoint_style = endpoint_style;
        self
    }

    /// Sets the password policy.
    #[must_use]
    pub fn with_password_policy(mut self, password_policy: PasswordPolicy) -> Self {
        self.password_policy = password_policy;
        self
    }

    /// Sets the transport timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
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

    /// Returns the transport timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Creates a [`SikomClient`] reading its credentials from `settings`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn into_client<S>(self, settings: S) -> Result<SikomClient>
    where
        S: SettingsReader + 'static,
    {
        let http = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(Error::Network)?;

        Ok(SikomClient {
            requests: RequestBuilder::new(self.base_url, self.endpoint_style, self.password_policy),
            http,
            settings: Arc::new(settings),
        })
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// SikomClient
// ============================================================================

/// Client that switches device groups on and off.
///
/// Each call resolves credentials from the settings reader, builds one
/// request and performs exactly one `GET`. Nothing is cached between
/// calls and nothing is retried.
///
/// # Examples
///
/// ```no_run
/// use sikom_lib::{ClientConfig, GroupId};
/// use sikom_lib::settings::MemorySettings;
///
/// # async fn example() -> sikom_lib::Result<()> {
/// let settings = MemorySettings::new()
///     .with("username", "alice")
///     .with("password", "secret");
///
/// let client = ClientConfig::new().into_client(settings)?;
/// client.group_on(GroupId::new(361_177)).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SikomClient {
    requests: RequestBuilder,
    http: Client,
    settings: Arc<dyn SettingsReader>,
}

impl std::fmt::Debug for SikomClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SikomClient")
            .field("requests", &self.requests)
            .finish_non_exhaustive()
    }
}

impl SikomClient {
    /// Creates a client with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new<S>(settings: S) -> Result<Self>
    where
        S: SettingsReader + 'static,
    {
        ClientConfig::new().into_client(settings)
    }

    /// Returns the request builder in use.
    #[must_use]
    pub fn request_builder(&self) -> &RequestBuilder {
        &self.requests
    }

    /// Turns a group on.
    ///
    /// # Errors
    ///
    /// See [`SikomClient::control`].
    pub async fn group_on(&self, group_id: GroupId) -> Result<bool> {
        self.control(ControlRequest::new(group_id, SwitchMode::On)).await
    }

    /// Turns a group off.
    ///
    /// # Errors
    ///
    /// See [`SikomClient::control`].
    pub async fn group_off(&self, group_id: GroupId) -> Result<bool> {
        self.control(ControlRequest::new(group_id, SwitchMode::Off)).await
    }

    /// Switches a group to the desired state.
    ///
    /// # Errors
    ///
    /// See [`SikomClient::control`].
    pub async fn set_group_power(&self, group_id: GroupId, desired_state: bool) -> Result<bool> {
        let mode = SwitchMode::from(desired_state);
        self.control(ControlRequest::new(group_id, mode)).await
    }

    /// Resolves credentials and builds the request without sending it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if required settings are missing.
    pub fn prepare(&self, request: ControlRequest) -> Result<PreparedRequest> {
        let credentials = settings::resolve_credentials(&*self.settings)?;
        self.requests.build(request.group_id, request.mode, &credentials)
    }

    /// Performs one control call.
    ///
    /// Returns `Ok(true)` when the vendor accepted the command.
    ///
    /// # Errors
    ///
    /// - [`Error::Configuration`] if credentials are missing (no request is sent)
    /// - [`Error::Network`] on transport failure
    /// - [`Error::Http`] on a non-2xx status
    /// - [`Error::Application`] if the body reports a non-success status
    pub async fn control(&self, request: ControlRequest) -> Result<bool> {
        let result = match self.prepare(request) {
            Ok(prepared) => self.execute(prepared, request).await,
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            tracing::error!(
                group_id = %request.group_id,
                state = %request.mode,
                error = %e,
                "Error controlling group"
            );
        }
        result
    }

    async fn execute(&self, prepared: PreparedRequest, request: ControlRequest) -> Result<bool> {
        let (url, headers) = prepared.into_parts();

        tracing::debug!(url = %url, "Sending control request");

        let started = Instant::now();
        let response = self.http.get(&url).headers(headers).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        tracing::info!(
            url = %url,
            status,
            elapsed_ms,
            body = %truncate_for_log(&body, LOG_EXCERPT_LEN),
            "API response"
        );

        match VendorResponse::new(status, body).classify()? {
            Outcome::Accepted => tracing::info!(
                group_id = %request.group_id,
                state = %request.mode,
                endpoint = %self.requests.endpoint_style(),
                "Successfully switched group"
            ),
            Outcome::NonJson => tracing::info!(
                group_id = %request.group_id,
                state = %request.mode,
                endpoint = %self.requests.endpoint_style(),
                "Successfully switched group (non-JSON response)"
            ),
        }

        Ok(true)
    }
}
