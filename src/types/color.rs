// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Color temperature slider value.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Color temperature in mireds (140-500).
///
/// Lower values are cooler (bluer) and higher values are warmer. The range
/// matches what smart-home bridges offer for a tunable white light.
///
/// # Examples
///
/// ```
/// use remolight::types::ColorTemp;
///
/// let ct = ColorTemp::new(260).unwrap();
/// assert_eq!(ct.value(), 260);
///
/// assert!(ColorTemp::new(100).is_err());
/// assert_eq!(ColorTemp::clamped(900), ColorTemp::WARMEST);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct ColorTemp(u16);

impl ColorTemp {
    /// Minimum color temperature in mireds (coolest).
    pub const MIN: u16 = 140;

    /// Maximum color temperature in mireds (warmest).
    pub const MAX: u16 = 500;

    /// Coolest supported value.
    pub const COOLEST: Self = Self(Self::MIN);

    /// Warmest supported value.
    pub const WARMEST: Self = Self(Self::MAX);

    /// Creates a new color temperature value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value is outside [140, 500].
    pub fn new(value: u16) -> Result<Self, ValueError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValueError::OutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: value,
            });
        }
        Ok(Self(value))
    }

    /// Creates a color temperature, clamping to the valid range.
    #[must_use]
    pub const fn clamped(value: u16) -> Self {
        if value < Self::MIN {
            Self(Self::MIN)
        } else if value > Self::MAX {
            Self(Self::MAX)
        } else {
            Self(value)
        }
    }

    /// Returns the value in mireds.
    #[must_use]
    pub const fn value(&self) -> u16 {
        self.0
    }

    /// Returns the approximate color temperature in Kelvin.
    #[must_use]
    pub fn to_kelvin(&self) -> u32 {
        1_000_000 / u32::from(self.0)
    }
}

impl Default for ColorTemp {
    fn default() -> Self {
        Self::COOLEST
    }
}

impl fmt::Display for ColorTemp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} mired", self.0)
    }
}

impl TryFrom<u16> for ColorTemp {
    type Error = ValueError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ColorTemp> for u16 {
    fn from(value: ColorTemp) -> Self {
        value.0
    }
}
