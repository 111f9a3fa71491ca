// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Values pushed to the accessory layer.

use serde::{Deserialize, Serialize};

use crate::ladder::{self, Axis};
use crate::types::{Brightness, ColorTemp, Zone};

use super::LightState;

/// What the accessory layer should report upstream after a mutation.
///
/// Slider values are derived from the rungs, so after convergence the
/// reported slider snaps to the position the fixture actually reached.
///
/// # Examples
///
/// ```
/// use remolight::state::{LightState, Report};
///
/// let report = Report::from(&LightState::new());
/// assert!(!report.power);
/// assert!(!report.main_on);
/// assert_eq!(report.brightness.value(), 100);
/// assert_eq!(report.color_temperature.value(), 440);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Light bulb "on" characteristic.
    pub power: bool,
    /// Main switch "on" characteristic.
    pub main_on: bool,
    /// Upper switch "on" characteristic.
    pub upper_on: bool,
    /// Lit zones at the time of the report.
    pub zone: Zone,
    /// Brightness derived from the brightness rung.
    pub brightness: Brightness,
    /// Color temperature derived from the color rung.
    pub color_temperature: ColorTemp,
}

impl From<&LightState> for Report {
    fn from(state: &LightState) -> Self {
        Self {
            power: state.power(),
            main_on: state.main_on(),
            upper_on: state.upper_on(),
            zone: state.zone(),
            brightness: ladder::percent_for(state.level(Axis::Brightness)),
            color_temperature: ladder::mired_for(state.level(Axis::ColorTemperature)),
        }
    }
}
