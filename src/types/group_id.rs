// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vendor-assigned group/device identifier.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Numeric handle identifying a controllable group or device.
///
/// Identifiers arrive from loosely typed sources (action payloads carry
/// JSON numbers, the CLI carries strings). Every fallible constructor
/// rejects values that are not a finite, non-negative integer no larger
/// than [`GroupId::MAX_EXACT`], so a `GroupId` can always be placed into
/// a URL as-is. [`GroupId::new`] is the unchecked escape hatch for ids
/// that are already known to be valid.
///
/// # Examples
///
/// ```
/// use sikom_lib::types::GroupId;
///
/// let id = GroupId::new(361_177);
/// assert_eq!(id.value(), 361_177);
///
/// assert!(GroupId::from_f64(42.0).is_ok());
/// assert!(GroupId::from_f64(f64::NAN).is_err());
/// assert!(GroupId::from_f64(1.5).is_err());
/// assert!("abc".parse::<GroupId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(u64);

impl GroupId {
    /// Largest integer an IEEE-754 double represents exactly (2^53 - 1).
    pub const MAX_EXACT: u64 = (1 << 53) - 1;

    /// Creates a group identifier from an integer without a range check.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Creates a group identifier from an integer.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::GroupIdOutOfRange` if the value is larger than
    /// [`GroupId::MAX_EXACT`].
    pub fn checked(value: u64) -> Result<Self, ValueError> {
        if value > Self::MAX_EXACT {
            return Err(ValueError::GroupIdOutOfRange(value.to_string()));
        }
        Ok(Self(value))
    }

    /// Creates a group identifier from a floating-point number.
    ///
    /// # Errors
    ///
    /// Returns `ValueError` if the value is NaN, infinite, fractional,
    /// negative, or larger than [`GroupId::MAX_EXACT`].
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    pub fn from_f64(value: f64) -> Result<Self, ValueError> {
        if !value.is_finite() {
            return Err(ValueError::NonFiniteGroupId(value));
        }
        if value.fract() != 0.0 {
            return Err(ValueError::FractionalGroupId(value));
        }
        if value < 0.0 || value > Self::MAX_EXACT as f64 {
            return Err(ValueError::GroupIdOutOfRange(value.to_string()));
        }
        Ok(Self(value as u64))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for GroupId {
    fn from(value: u32) -> Self {
        Self(u64::from(value))
    }
}

impl TryFrom<i64> for GroupId {
    type Error = ValueError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        let value = u64::try_from(value)
            .map_err(|_| ValueError::GroupIdOutOfRange(value.to_string()))?;
        Self::checked(value)
    }
}

impl TryFrom<f64> for GroupId {
    type Error = ValueError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_f64(value)
    }
}

impl FromStr for GroupId {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(value) = trimmed.parse::<u64>() {
            return Self::checked(value);
        }
        // "361177.0", "-1", "NaN" and friends still get the precise error
        match trimmed.parse::<f64>() {
            Ok(value) => Self::from_f64(value),
            Err(_) => Err(ValueError::NonNumericGroupId(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_f64_accepts_integral_values() {
        assert_eq!(GroupId::from_f64(0.0).unwrap().value(), 0);
        assert_eq!(GroupId::from_f64(361_177.0).unwrap().value(), 361_177);
    }

    #[test]
    fn from_f64_rejects_non_finite() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                GroupId::from_f64(value),
                Err(ValueError::NonFiniteGroupId(_))
            ));
        }
    }

    #[test]
    fn from_f64_rejects_fractional() {
        assert!(matches!(
            GroupId::from_f64(12.5),
            Err(ValueError::FractionalGroupId(_))
        ));
    }

    #[test]
    fn from_f64_rejects_out_of_range() {
        assert!(matches!(
            GroupId::from_f64(-3.0),
            Err(ValueError::GroupIdOutOfRange(_))
        ));
        assert!(matches!(
            GroupId::from_f64(1e300),
            Err(ValueError::GroupIdOutOfRange(_))
        ));
    }

    #[test]
    fn try_from_negative_i64() {
        assert!(GroupId::try_from(-1_i64).is_err());
        assert_eq!(GroupId::try_from(7_i64).unwrap(), GroupId::new(7));
    }

    #[test]
    fn integer_constructors_cap_at_max_exact() {
        let max = GroupId::MAX_EXACT;
        assert_eq!(GroupId::checked(max).unwrap().value(), max);
        assert!(matches!(
            GroupId::checked(max + 1),
            Err(ValueError::GroupIdOutOfRange(_))
        ));
        assert!(matches!(
            GroupId::try_from(i64::MAX),
            Err(ValueError::GroupIdOutOfRange(_))
        ));
        assert_eq!(
            "9007199254740991".parse::<GroupId>().unwrap().value(),
            max
        );
        assert!(matches!(
            "9007199254740992".parse::<GroupId>(),
            Err(ValueError::GroupIdOutOfRange(_))
        ));
        assert!(matches!(
            u64::MAX.to_string().parse::<GroupId>(),
            Err(ValueError::GroupIdOutOfRange(_))
        ));
    }

    #[test]
    fn from_str_variants() {
        assert_eq!("361177".parse::<GroupId>().unwrap(), GroupId::new(361_177));
        assert_eq!(" 12 ".parse::<GroupId>().unwrap(), GroupId::new(12));
        assert_eq!("12.0".parse::<GroupId>().unwrap(), GroupId::new(12));
        assert!(matches!(
            "NaN".parse::<GroupId>(),
            Err(ValueError::NonFiniteGroupId(_))
        ));
        assert!(matches!(
            "twelve".parse::<GroupId>(),
            Err(ValueError::NonNumericGroupId(_))
        ));
        assert!(matches!(
            "".parse::<GroupId>(),
            Err(ValueError::NonNumericGroupId(_))
        ));
    }

    #[test]
    fn display() {
        assert_eq!(GroupId::new(42).to_string(), "42");
    }
}
