// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The open-loop record of what the fixture is believed to be doing.

use serde::{Deserialize, Serialize};

use crate::ladder::{Axis, Step};
use crate::types::{Brightness, ColorTemp, Direction, Level, Zone};

/// Tracked state of the fixture.
///
/// The fixture reports nothing back, so every field is inferred from the
/// pulses this controller has sent. The record is rehydrated from the
/// snapshot at startup and saved after every mutation.
///
/// `brightness` and `color_temperature` are the slider positions last
/// requested by the accessory layer. They jump immediately on a request,
/// while the levels catch up one pulse at a time.
///
/// # Examples
///
/// ```
/// use remolight::state::LightState;
/// use remolight::types::Zone;
///
/// let mut state = LightState::new();
/// assert!(!state.power());
///
/// state.set_power(true);
/// state.set_zone(Zone::Main);
/// assert!(state.main_on());
/// assert!(!state.upper_on());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightState {
    /// Whether the fixture is energized.
    power: bool,
    /// Lit zones. Only meaningful while powered; kept across power-off.
    zone: Zone,
    /// Current brightness rung.
    brightness_level: Level,
    /// Direction of the next brightness press.
    brightness_direction: Direction,
    /// Current color temperature rung.
    color_level: Level,
    /// Direction of the next color press.
    color_direction: Direction,
    /// Brightness slider as last requested.
    brightness: Brightness,
    /// Color temperature slider as last requested.
    color_temperature: ColorTemp,
}

impl Default for LightState {
    fn default() -> Self {
        Self {
            power: false,
            zone: Zone::Both,
            brightness_level: Level::MAX,
            brightness_direction: Direction::Down,
            color_level: Level::clamped(6),
            color_direction: Direction::Down,
            brightness: Brightness::MAX,
            color_temperature: ColorTemp::COOLEST,
        }
    }
}

impl LightState {
    /// Creates the state of a freshly installed fixture.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Power & Zones ==========

    /// Returns `true` if the fixture is energized.
    #[must_use]
    pub fn power(&self) -> bool {
        self.power
    }

    /// Sets the power flag.
    pub fn set_power(&mut self, power: bool) {
        self.power = power;
    }

    /// Returns the lit zones.
    #[must_use]
    pub fn zone(&self) -> Zone {
        self.zone
    }

    /// Sets the lit zones.
    pub fn set_zone(&mut self, zone: Zone) {
        self.zone = zone;
    }

    /// Returns `true` if the main area is lit.
    #[must_use]
    pub fn main_on(&self) -> bool {
        self.power && self.zone.lights_main()
    }

    /// Returns `true` if the upper area is lit.
    #[must_use]
    pub fn upper_on(&self) -> bool {
        self.power && self.zone.lights_upper()
    }

    // ========== Ladders ==========

    /// Returns the current rung of an axis.
    #[must_use]
    pub fn level(&self, axis: Axis) -> Level {
        match axis {
            Axis::Brightness => self.brightness_level,
            Axis::ColorTemperature => self.color_level,
        }
    }

    /// Returns the direction of the next press on an axis.
    #[must_use]
    pub fn direction(&self, axis: Axis) -> Direction {
        match axis {
            Axis::Brightness => self.brightness_direction,
            Axis::ColorTemperature => self.color_direction,
        }
    }

    /// Computes the press that would follow on an axis, without applying it.
    #[must_use]
    pub fn next_step(&self, axis: Axis) -> Step {
        axis.next_step(self.level(axis), self.direction(axis))
    }

    /// Records a press that has been sent.
    pub fn apply_step(&mut self, axis: Axis, step: &Step) {
        match axis {
            Axis::Brightness => {
                self.brightness_level = step.level;
                self.brightness_direction = step.direction;
            }
            Axis::ColorTemperature => {
                self.color_level = step.level;
                self.color_direction = step.direction;
            }
        }
    }

    /// Overrides an axis' rung and direction.
    ///
    /// Used to re-align the record with the fixture by hand.
    pub fn set_ladder(&mut self, axis: Axis, level: Level, direction: Direction) {
        self.apply_step(
            axis,
            &Step {
                level,
                direction,
                signal: axis.signal(),
            },
        );
    }

    // ========== Sliders ==========

    /// Returns the brightness slider as last requested.
    #[must_use]
    pub fn brightness(&self) -> Brightness {
        self.brightness
    }

    /// Sets the brightness slider.
    pub fn set_brightness(&mut self, value: Brightness) {
        self.brightness = value;
    }

    /// Returns the color temperature slider as last requested.
    #[must_use]
    pub fn color_temperature(&self) -> ColorTemp {
        self.color_temperature
    }

    /// Sets the color temperature slider.
    pub fn set_color_temperature(&mut self, value: ColorTemp) {
        self.color_temperature = value;
    }
}
