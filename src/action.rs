// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! User-triggerable actions.
//!
//! A host automation platform exposes two actions, `group-on` and
//! `group-off`, whose arguments arrive as loosely typed JSON. This module
//! parses those payloads into [`ActionArgs`] before anything is dispatched,
//! so a malformed identifier never reaches the network layer.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::client::SikomClient;
use crate::error::{Result, ValueError};
use crate::types::{GroupId, SwitchMode};

/// A user-triggerable action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Switch a group on.
    GroupOn,
    /// Switch a group off.
    GroupOff,
}

impl Action {
    /// All registered actions.
    pub const ALL: [Self; 2] = [Self::GroupOn, Self::GroupOff];

    /// Returns the action identifier.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::GroupOn => "group-on",
            Self::GroupOff => "group-off",
        }
    }

    /// Returns the switch mode this action requests.
    #[must_use]
    pub const fn mode(&self) -> SwitchMode {
        match self {
            Self::GroupOn => SwitchMode::On,
            Self::GroupOff => SwitchMode::Off,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Action {
    type Err = ValueError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.id() == s)
            .ok_or_else(|| ValueError::UnknownAction(s.to_string()))
    }
}

/// Validated arguments of a group action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionArgs {
    /// The target group.
    pub group_id: GroupId,
}

impl ActionArgs {
    /// Argument key used by current action cards.
    pub const GROUP_ID_KEY: &'static str = "groupId";
    /// Argument key used by older action cards.
    pub const LEGACY_GROUP_ID_KEY: &'static str = "GroupID";

    /// Parses an action payload such as `{"groupId": 361177}`.
    ///
    /// The identifier may be a JSON number or a numeric string.
    ///
    /// # Errors
    ///
    /// Returns `ValueError` if the identifier is missing, not numeric,
    /// not an integer, negative or too large.
    ///
    /// # Examples
    ///
    /// ```
    /// use sikom_lib::action::ActionArgs;
    /// use serde_json::json;
    ///
    /// let args = ActionArgs::from_json(&json!({ "groupId": 42 })).unwrap();
    /// assert_eq!(args.group_id.value(), 42);
    ///
    /// assert!(ActionArgs::from_json(&json!({ "groupId": "x" })).is_err());
    /// assert!(ActionArgs::from_json(&json!({})).is_err());
    /// ```
    pub fn from_json(payload: &Value) -> std::result::Result<Self, ValueError> {
        let raw = payload
            .get(Self::GROUP_ID_KEY)
            .or_else(|| payload.get(Self::LEGACY_GROUP_ID_KEY))
            .filter(|v| !v.is_null())
            .ok_or(ValueError::MissingGroupId)?;

        let group_id = match raw {
            Value::Number(n) => {
                if let Some(v) = n.as_u64() {
                    GroupId::checked(v)?
                } else if let Some(v) = n.as_i64() {
                    GroupId::try_from(v)?
                } else {
                    GroupId::from_f64(n.as_f64().unwrap_or(f64::NAN))?
                }
            }
            Value::String(s) => s.parse()?,
            other => return Err(ValueError::NonNumericGroupId(other.to_string())),
        };

        Ok(Self { group_id })
    }
}

impl SikomClient {
    /// Runs an action with a raw argument payload.
    ///
    /// Arguments are validated before credentials are read or any request
    /// is sent.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] for malformed payloads,
    /// otherwise whatever [`SikomClient::control`] returns.
    pub async fn run_action(&self, action: Action, payload: &Value) -> Result<bool> {
        tracing::info!(action = %action, args = %payload, "Action triggered");

        let args = ActionArgs::from_json(payload).inspect_err(|e| {
            tracing::error!(action = %action, error = %e, "Invalid action arguments");
        })?;

        let desired_state = action.mode().is_on();
        self.set_group_power(args.group_id, desired_state).await
    }
}
