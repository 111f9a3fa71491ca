// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Level ladders for the two continuous properties.
//!
//! The fixture has one "step" button per property. Each press moves the
//! property one rung in the button's current direction, and the direction
//! only reverses once the top or bottom rung is reached. This module maps
//! slider values onto rungs and emulates that button.
//!
//! # Bounds
//!
//! | Axis | Bottom rung | Top rung | Slider → rung |
//! |------|-------------|----------|---------------|
//! | Brightness | 0 | 7 | ceiling of `percent * 7 / 100` |
//! | Color temperature | 1 | 7 | `round((mired - 140) / 60) + 1` |
//!
//! Brightness rung 0 is the "0 %" slider position and is reachable by
//! stepping down from rung 1.
//!
//! # Examples
//!
//! ```
//! use remolight::ladder::{self, Axis};
//! use remolight::types::{Brightness, Direction, Level};
//!
//! let target = ladder::brightness_level(Brightness::new(50).unwrap());
//! assert_eq!(target.value(), 4);
//!
//! let step = Axis::Brightness.next_step(Level::MAX, Direction::Up);
//! assert_eq!(step.level.value(), 6);
//! assert_eq!(step.direction, Direction::Down);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Brightness, ColorTemp, Direction, Level, SignalClass};

/// Brightness reported for a rung is rounded to whole percents, which puts it
/// up to 3/700 below the rung's exact position. Conversion back forgives that.
const BRIGHTNESS_ROUNDING_SLACK: i32 = 3;

/// One of the two stepped properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Brightness, stepped by [`SignalClass::Brightness`].
    Brightness,
    /// Color temperature, stepped by [`SignalClass::Color`].
    ColorTemperature,
}

/// The outcome of one press of an axis' step button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Rung after the press.
    pub level: Level,
    /// Direction the next press will move.
    pub direction: Direction,
    /// The pulse that performs this press.
    pub signal: SignalClass,
}

impl Axis {
    /// Both axes.
    pub const ALL: [Self; 2] = [Self::Brightness, Self::ColorTemperature];

    /// Returns the signal class that steps this axis.
    #[must_use]
    pub const fn signal(self) -> SignalClass {
        match self {
            Self::Brightness => SignalClass::Brightness,
            Self::ColorTemperature => SignalClass::Color,
        }
    }

    /// Returns the bottom rung of this axis.
    #[must_use]
    pub fn floor(self) -> Level {
        match self {
            Self::Brightness => Level::MIN,
            Self::ColorTemperature => Level::clamped(1),
        }
    }

    /// Returns the number of presses between the bottom and top rung.
    #[must_use]
    pub fn span(self) -> u8 {
        Level::MAX.value() - self.floor().value()
    }

    /// Clamps a rung into this axis' range.
    #[must_use]
    pub fn clamp(self, level: Level) -> Level {
        level.max(self.floor())
    }

    /// Converts a raw slider value (percent or mireds) into a rung.
    ///
    /// Out-of-range input is clamped rather than rejected.
    #[must_use]
    pub fn to_level(self, raw: i32) -> Level {
        match self {
            Self::Brightness => {
                let percent = raw.clamp(0, 100);
                let scaled = percent * i32::from(Level::MAX.value()) - BRIGHTNESS_ROUNDING_SLACK;
                if scaled <= 0 {
                    Level::MIN
                } else {
                    Level::clamped((scaled + 99) / 100)
                }
            }
            Self::ColorTemperature => {
                let offset = raw.saturating_sub(i32::from(ColorTemp::MIN));
                // Round half up, also for offsets below the range.
                let rung = offset.saturating_add(30).div_euclid(60) + 1;
                self.clamp(Level::clamped(rung))
            }
        }
    }

    /// Emulates one press of this axis' step button.
    ///
    /// The direction flips first if the press would otherwise leave the
    /// ladder, then the level moves one rung.
    #[must_use]
    pub fn next_step(self, level: Level, direction: Direction) -> Step {
        let direction = match direction {
            Direction::Up if level >= Level::MAX => Direction::Down,
            Direction::Down if level <= self.floor() => Direction::Up,
            other => other,
        };
        let rung = i32::from(level.value());
        let level = match direction {
            Direction::Up => Level::clamped(rung + 1),
            Direction::Down => Level::clamped(rung - 1),
        };
        Step {
            level,
            direction,
            signal: self.signal(),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Brightness => f.write_str("brightness"),
            Self::ColorTemperature => f.write_str("color temperature"),
        }
    }
}

/// Returns the brightness rung for a slider value.
#[must_use]
pub fn brightness_level(brightness: Brightness) -> Level {
    Axis::Brightness.to_level(i32::from(brightness.value()))
}

/// Returns the color temperature rung for a slider value.
#[must_use]
pub fn color_level(color: ColorTemp) -> Level {
    Axis::ColorTemperature.to_level(i32::from(color.value()))
}

/// Returns the slider value reported for a brightness rung,
/// `round(100 / 7 * level)`.
#[must_use]
pub fn percent_for(level: Level) -> Brightness {
    let rung = u16::from(level.value());
    // Safe: rung <= 7 keeps the result <= 100
    #[allow(clippy::cast_possible_truncation)]
    let percent = ((200 * rung + 7) / 14) as u8;
    Brightness::clamped(percent)
}

/// Returns the slider value reported for a color rung,
/// `140 + 60 * (level - 1)`.
#[must_use]
pub fn mired_for(level: Level) -> ColorTemp {
    let mired = i32::from(ColorTemp::MIN) + 60 * (i32::from(level.value()) - 1);
    // Safe: clamped into ColorTemp's u16 range first
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let mired = mired.clamp(i32::from(ColorTemp::MIN), i32::from(ColorTemp::MAX)) as u16;
    ColorTemp::clamped(mired)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels() -> impl Iterator<Item = Level> {
        (0..=7).map(|v| Level::new(v).unwrap())
    }

    const DIRECTIONS: [Direction; 2] = [Direction::Up, Direction::Down];

    #[test]
    fn next_step_stays_on_ladder() {
        for axis in Axis::ALL {
            for level in levels() {
                for direction in DIRECTIONS {
                    let step = axis.next_step(level, direction);
                    assert!(step.level <= Level::MAX);
                    assert_eq!(step.signal, axis.signal());
                    let moved = i32::from(step.level.value()) - i32::from(level.value());
                    assert_eq!(moved.abs(), 1, "{axis} {level} {direction}");
                }
            }
        }
    }

    #[test]
    fn next_step_flips_at_top() {
        for axis in Axis::ALL {
            let step = axis.next_step(Level::MAX, Direction::Up);
            assert_eq!(step.direction, Direction::Down);
            assert_eq!(step.level.value(), 6);
        }
    }

    #[test]
    fn next_step_flips_at_bottom() {
        let step = Axis::Brightness.next_step(Level::MIN, Direction::Down);
        assert_eq!(step.direction, Direction::Up);
        assert_eq!(step.level.value(), 1);

        let step = Axis::ColorTemperature.next_step(Level::new(1).unwrap(), Direction::Down);
        assert_eq!(step.direction, Direction::Up);
        assert_eq!(step.level.value(), 2);
    }

    #[test]
    fn next_step_keeps_direction_inside() {
        let step = Axis::Brightness.next_step(Level::new(1).unwrap(), Direction::Down);
        assert_eq!(step.direction, Direction::Down);
        assert_eq!(step.level, Level::MIN);

        let step = Axis::ColorTemperature.next_step(Level::new(6).unwrap(), Direction::Up);
        assert_eq!(step.direction, Direction::Up);
        assert_eq!(step.level, Level::MAX);
    }

    #[test]
    fn color_below_floor_recovers_upwards() {
        let step = Axis::ColorTemperature.next_step(Level::MIN, Direction::Down);
        assert_eq!(step.direction, Direction::Up);
        assert_eq!(step.level.value(), 1);
    }

    #[test]
    fn brightness_round_trip() {
        for level in levels().skip(1) {
            assert_eq!(brightness_level(percent_for(level)), level);
        }
        // Rung 0 reports 0 %, which maps back onto rung 0.
        assert_eq!(percent_for(Level::MIN), Brightness::MIN);
        assert_eq!(brightness_level(Brightness::MIN), Level::MIN);
    }

    #[test]
    fn brightness_any_light_is_at_least_rung_one() {
        assert_eq!(brightness_level(Brightness::new(1).unwrap()).value(), 1);
        assert_eq!(brightness_level(Brightness::new(15).unwrap()).value(), 2);
        assert_eq!(brightness_level(Brightness::MAX), Level::MAX);
    }

    #[test]
    fn reported_percents() {
        let percents: Vec<u8> = levels().map(|l| percent_for(l).value()).collect();
        assert_eq!(percents, vec![0, 14, 29, 43, 57, 71, 86, 100]);
    }

    #[test]
    fn color_round_trip() {
        for level in levels().skip(1) {
            assert_eq!(color_level(mired_for(level)), level);
        }
        assert_eq!(mired_for(Level::new(1).unwrap()).value(), 140);
        assert_eq!(mired_for(Level::MAX).value(), 500);
    }

    #[test]
    fn color_rounds_half_up() {
        assert_eq!(color_level(ColorTemp::new(169).unwrap()).value(), 1);
        assert_eq!(color_level(ColorTemp::new(170).unwrap()).value(), 2);
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        assert_eq!(Axis::Brightness.to_level(-40), Level::MIN);
        assert_eq!(Axis::Brightness.to_level(250), Level::MAX);
        assert_eq!(Axis::Brightness.to_level(i32::MAX), Level::MAX);
        assert_eq!(Axis::ColorTemperature.to_level(0).value(), 1);
        assert_eq!(Axis::ColorTemperature.to_level(2000), Level::MAX);
        assert_eq!(Axis::ColorTemperature.to_level(i32::MIN).value(), 1);
    }

    #[test]
    fn stepping_reaches_every_target() {
        for axis in Axis::ALL {
            let bound = 2 * usize::from(axis.span()) - 1;
            for start in levels().filter(|l| *l >= axis.floor()) {
                for target in levels().filter(|l| *l >= axis.floor()) {
                    for direction in DIRECTIONS {
                        let (mut level, mut dir) = (start, direction);
                        let mut presses = 0;
                        while level != target {
                            let step = axis.next_step(level, dir);
                            level = step.level;
                            dir = step.direction;
                            presses += 1;
                            assert!(presses <= bound, "{axis}: {start} -> {target} ({direction})");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn stepping_toward_target_is_direct() {
        // Heading toward the target never needs more than a full span.
        let mut level = Level::new(3).unwrap();
        let mut dir = Direction::Down;
        let mut presses = 0;
        while level != Level::MIN {
            let step = Axis::Brightness.next_step(level, dir);
            level = step.level;
            dir = step.direction;
            presses += 1;
        }
        assert_eq!(presses, 3);
    }
}
