// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Discrete ladder rungs and the direction the remote's step button moves.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// A discrete rung on a brightness or color-temperature ladder (0-7).
///
/// The fixture only understands "one step" pulses, so continuous slider
/// values are approximated by one of eight rungs.
///
/// # Examples
///
/// ```
/// use remolight::types::Level;
///
/// let level = Level::new(3).unwrap();
/// assert_eq!(level.value(), 3);
///
/// assert!(Level::new(8).is_err());
/// assert_eq!(Level::clamped(-2), Level::MIN);
/// assert_eq!(Level::clamped(42), Level::MAX);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Level(u8);

impl Level {
    /// Lowest rung.
    pub const MIN: Self = Self(0);

    /// Highest rung.
    pub const MAX: Self = Self(7);

    /// Creates a level.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value exceeds 7.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value > Self::MAX.0 {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: u16::from(Self::MAX.0),
                actual: u16::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Creates a level from a possibly out-of-range rung, clamping to 0-7.
    #[must_use]
    pub fn clamped(value: i32) -> Self {
        // Safe: clamped to 0..=7 first
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let rung = value.clamp(0, i32::from(Self::MAX.0)) as u8;
        Self(rung)
    }

    /// Returns the rung number.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns the rung one step higher, or `None` at the top.
    #[must_use]
    pub fn up(self) -> Option<Self> {
        (self < Self::MAX).then(|| Self(self.0 + 1))
    }

    /// Returns the rung one step lower, or `None` at the bottom.
    #[must_use]
    pub fn down(self) -> Option<Self> {
        self.0.checked_sub(1).map(Self)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

impl TryFrom<u8> for Level {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.0
    }
}

/// The direction the next step pulse will move a ladder.
///
/// A single physical button cycles the fixture up and down, so the direction
/// only flips when a bound is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Toward level 7.
    Up,
    /// Toward the bottom rung.
    Down,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    /// Returns the lowercase name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_valid_values() {
        for v in 0..=7 {
            assert_eq!(Level::new(v).unwrap().value(), v);
        }
    }

    #[test]
    fn level_invalid_value() {
        assert_eq!(
            Level::new(8),
            Err(ValueError::OutOfRange {
                min: 0,
                max: 7,
                actual: 8
            })
        );
    }

    #[test]
    fn level_clamped() {
        assert_eq!(Level::clamped(-1).value(), 0);
        assert_eq!(Level::clamped(4).value(), 4);
        assert_eq!(Level::clamped(9).value(), 7);
    }

    #[test]
    fn level_up_down_at_bounds() {
        assert_eq!(Level::MAX.up(), None);
        assert_eq!(Level::MIN.down(), None);
        assert_eq!(Level::new(3).unwrap().up(), Level::new(4).ok());
        assert_eq!(Level::new(3).unwrap().down(), Level::new(2).ok());
    }

    #[test]
    fn level_serde_rejects_out_of_range() {
        assert_eq!(serde_json::to_string(&Level::MAX).unwrap(), "7");
        assert_eq!(serde_json::from_str::<Level>("5").unwrap().value(), 5);
        assert!(serde_json::from_str::<Level>("12").is_err());
    }

    #[test]
    fn direction_flip_and_serde() {
        assert_eq!(Direction::Up.flipped(), Direction::Down);
        assert_eq!(Direction::Down.flipped(), Direction::Up);
        assert_eq!(serde_json::to_string(&Direction::Down).unwrap(), "\"down\"");
        assert_eq!(Direction::Up.to_string(), "up");
    }
}
