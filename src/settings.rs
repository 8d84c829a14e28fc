// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Settings access and credential resolution.
//!
//! The library never owns persistent settings. The host application hands
//! in a [`SettingsReader`] and the client reads `username` and `password`
//! from it on every call.
//!
//! Two readers ship with the crate:
//!
//! - [`MemorySettings`]: an in-memory map, shared and updatable at runtime
//! - [`EnvSettings`]: `SIKOM_*` environment variables, optionally overlaid
//!   by a `.env.local` style file

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::Error;

/// Settings key holding the account username.
pub const USERNAME_KEY: &str = "username";
/// Settings key holding the account password.
pub const PASSWORD_KEY: &str = "password";

/// Read-only access to flat key/value settings.
pub trait SettingsReader: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;
}

impl<T: SettingsReader + ?Sized> SettingsReader for Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

/// Account credentials used for Basic authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Username for authentication.
    pub username: String,
    /// Password for authentication.
    pub password: String,
}

impl Credentials {
    /// Creates credentials from a username and password.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Reads a setting, treating blank values as absent.
fn non_blank(settings: &dyn SettingsReader, key: &str) -> Option<String> {
    settings.get(key).filter(|v| !v.trim().is_empty())
}

/// Resolves the account credentials from `settings`.
///
/// # Errors
///
/// Returns [`Error::Configuration`] if the username or password is absent
/// or blank.
pub fn resolve_credentials(settings: &dyn SettingsReader) -> Result<Credentials, Error> {
    match (
        non_blank(settings, USERNAME_KEY),
        non_blank(settings, PASSWORD_KEY),
    ) {
        (Some(username), Some(password)) => Ok(Credentials { username, password }),
        _ => Err(Error::Configuration("username and password".to_string())),
    }
}

// ============================================================================
// MemorySettings
// ============================================================================

/// In-memory settings store.
///
/// Cloning shares the underlying map, so a host can keep one handle for
/// writing while the client reads through another.
///
/// # Examples
///
/// ```
/// use sikom_lib::settings::{MemorySettings, SettingsReader};
///
/// let settings = MemorySettings::new()
///     .with("username", "alice")
///     .with("password", "secret");
///
/// assert_eq!(settings.get("username").as_deref(), Some("alice"));
/// settings.set("username", "bob");
/// assert_eq!(settings.get("username").as_deref(), Some("bob"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl MemorySettings {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value, builder style.
    #[must_use]
    pub fn with(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Stores a value.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.values.write().insert(key.into(), value.into());
    }

    /// Removes a value.
    pub fn remove(&self, key: &str) -> Option<String> {
        self.values.write().remove(key)
    }
}

impl SettingsReader for MemorySettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }
}

// ============================================================================
// EnvSettings
// ============================================================================

/// Settings read from `SIKOM_<KEY>` environment variables.
///
/// A `.env.local` style file can be layered on top with
/// [`EnvSettings::with_env_file`]; file values win over the process
/// environment.
#[derive(Debug, Clone, Default)]
pub struct EnvSettings {
    overlay: HashMap<String, String>,
}

impl EnvSettings {
    /// Prefix for environment variable names.
    pub const PREFIX: &'static str = "SIKOM_";

    /// Creates a reader backed by the process environment only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `KEY=VALUE` lines from `path` on top of the environment.
    ///
    /// A missing file is not an error; the reader then falls back to the
    /// process environment.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file exists but cannot be read.
    pub fn with_env_file(mut self, path: impl AsRef<Path>) -> std::io::Result<Self> {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(content) => {
                self.overlay.extend(parse_env_file(&content));
                Ok(self)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(self),
            Err(err) => Err(err),
        }
    }

    /// Returns the environment variable name for a settings key.
    #[must_use]
    pub fn var_name(key: &str) -> String {
        format!("{}{}", Self::PREFIX, key.to_uppercase())
    }
}

impl SettingsReader for EnvSettings {
    fn get(&self, key: &str) -> Option<String> {
        let name = Self::var_name(key);
        self.overlay
            .get(&name)
            .cloned()
            .or_else(|| std::env::var(&name).ok())
    }
}

/// Parses `.env` style content.
///
/// Blank lines and `#` comments are skipped, lines without `=` are ignored
/// and everything after the first `=` belongs to the value.
fn parse_env_file(content: &str) -> impl Iterator<Item = (String, String)> + '_ {
    content.lines().filter_map(|line| {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        let (key, value) = line.split_once('=')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        Some((key.to_string(), value.trim().to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(username: &str, password: &str) -> MemorySettings {
        MemorySettings::new()
            .with(USERNAME_KEY, username)
            .with(PASSWORD_KEY, password)
    }

    #[test]
    fn resolve_credentials_present() {
        let creds = resolve_credentials(&settings("alice", "secret")).unwrap();
        assert_eq!(creds, Credentials::new("alice", "secret"));
    }

    #[test]
    fn resolve_credentials_missing_password() {
        let store = MemorySettings::new().with(USERNAME_KEY, "alice");
        assert!(matches!(
            resolve_credentials(&store),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn resolve_credentials_blank_values_count_as_missing() {
        assert!(resolve_credentials(&settings("", "secret")).is_err());
        assert!(resolve_credentials(&settings("alice", "   ")).is_err());
    }

    #[test]
    fn resolve_credentials_reads_fresh_values() {
        let store = settings("alice", "secret");
        let first = resolve_credentials(&store).unwrap();
        store.set(PASSWORD_KEY, "rotated");
        let second = resolve_credentials(&store).unwrap();
        assert_eq!(first.password, "secret");
        assert_eq!(second.password, "rotated");
    }

    #[test]
    fn credentials_debug_redacts_password() {
        let debug = format!("{:?}", Credentials::new("alice", "secret"));
        assert!(debug.contains("alice"));
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn memory_settings_clones_share_state() {
        let writer = MemorySettings::new();
        let reader = writer.clone();
        writer.set("username", "alice");
        assert_eq!(reader.get("username").as_deref(), Some("alice"));
        writer.remove("username");
        assert!(reader.get("username").is_none());
    }

    #[test]
    fn env_var_names() {
        assert_eq!(EnvSettings::var_name("username"), "SIKOM_USERNAME");
        assert_eq!(EnvSettings::var_name("password"), "SIKOM_PASSWORD");
    }

    #[test]
    fn parse_env_file_lines() {
        let content = "\n# comment\nSIKOM_USERNAME = alice\n\
                       SIKOM_PASSWORD=pa=ss\ngarbage\n=novalue\n";
        let parsed: HashMap<_, _> = parse_env_file(content).collect();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed["SIKOM_USERNAME"], "alice");
        assert_eq!(parsed["SIKOM_PASSWORD"], "pa=ss");
    }

    #[test]
    fn env_file_overlay_wins() {
        let dir = std::env::temp_dir().join(format!("sikom-settings-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(".env.local");
        std::fs::write(&path, "SIKOM_OVERLAY_TEST_ONLY=from-file\n").unwrap();

        let settings = EnvSettings::new().with_env_file(&path).unwrap();
        assert_eq!(
            settings.get("overlay_test_only").as_deref(),
            Some("from-file")
        );

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn env_file_missing_is_not_an_error() {
        let settings = EnvSettings::new()
            .with_env_file("/nonexistent/sikom/.env.local")
            .unwrap();
        assert!(settings.get("definitely_unset_key").is_none());
    }
}
