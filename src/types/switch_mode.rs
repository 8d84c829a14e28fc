// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Binary power state of a device group.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// The vendor's `switch_mode` property: a group is either on or off.
///
/// # Examples
///
/// ```
/// use sikom_lib::types::SwitchMode;
///
/// assert_eq!(SwitchMode::On.as_str(), "1");
/// assert_eq!(SwitchMode::Off.as_str(), "0");
/// assert_eq!(SwitchMode::from(true), SwitchMode::On);
/// assert_eq!("off".parse::<SwitchMode>().unwrap(), SwitchMode::Off);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwitchMode {
    /// Group is switched off (`0`).
    Off,
    /// Group is switched on (`1`).
    On,
}

impl SwitchMode {
    /// Returns the single-character value sent in the `switch_mode` URL segment.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "0",
            Self::On => "1",
        }
    }

    /// Returns the command word used by the legacy device endpoint.
    #[must_use]
    pub const fn command(&self) -> &'static str {
        match self {
            Self::Off => "turnOff",
            Self::On => "turnOn",
        }
    }

    /// Returns `true` for [`SwitchMode::On`].
    #[must_use]
    pub const fn is_on(&self) -> bool {
        matches!(self, Self::On)
    }
}

impl fmt::Display for SwitchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => f.write_str("off"),
            Self::On => f.write_str("on"),
        }
    }
}

impl FromStr for SwitchMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "on" | "1" | "true" => Ok(Self::On),
            "off" | "0" | "false" => Ok(Self::Off),
            _ => Err(ValueError::InvalidSwitchMode(s.to_string())),
        }
    }
}

impl From<bool> for SwitchMode {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}

impl From<SwitchMode> for bool {
    fn from(value: SwitchMode) -> Self {
        value.is_on()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switch_value_is_single_digit() {
        assert_eq!(SwitchMode::On.as_str(), "1");
        assert_eq!(SwitchMode::Off.as_str(), "0");
    }

    #[test]
    fn legacy_command_words() {
        assert_eq!(SwitchMode::On.command(), "turnOn");
        assert_eq!(SwitchMode::Off.command(), "turnOff");
    }

    #[test]
    fn from_str_accepts_words_and_digits() {
        assert_eq!("ON".parse::<SwitchMode>().unwrap(), SwitchMode::On);
        assert_eq!(" off ".parse::<SwitchMode>().unwrap(), SwitchMode::Off);
        assert_eq!("1".parse::<SwitchMode>().unwrap(), SwitchMode::On);
        assert_eq!("false".parse::<SwitchMode>().unwrap(), SwitchMode::Off);
    }

    #[test]
    fn from_str_invalid() {
        let result = "toggle".parse::<SwitchMode>();
        assert!(matches!(result, Err(ValueError::InvalidSwitchMode(_))));
    }

    #[test]
    fn bool_conversions() {
        assert_eq!(SwitchMode::from(true), SwitchMode::On);
        assert_eq!(SwitchMode::from(false), SwitchMode::Off);
        assert!(bool::from(SwitchMode::On));
        assert!(!bool::from(SwitchMode::Off));
    }

    #[test]
    fn display() {
        assert_eq!(SwitchMode::On.to_string(), "on");
        assert_eq!(SwitchMode::Off.to_string(), "off");
    }
}
