// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power and zone state machine.
//!
//! The fixture has a power toggle and a single "point" button that cycles
//! through its zone combinations. Reaching a given combination therefore
//! costs one or two point pulses depending on where the cycle currently
//! is, and switching off the last lit zone powers the fixture down instead.
//!
//! | Phase | Event | Pulses | Next |
//! |-------|-------|--------|------|
//! | Off | `PowerOn` | power | Both |
//! | any lit | `PowerOff` | power | Off |
//! | Both | `MainOff` | point, point | UpperOnly |
//! | Both | `UpperOff` | point | MainOnly |
//! | MainOnly | `MainOff` | power | Off |
//! | MainOnly | `UpperOn` | point, point | Both |
//! | UpperOnly | `UpperOff` | power | Off |
//! | UpperOnly | `MainOn` | point | Both |
//!
//! Every other pair is a no-op. In particular zone switches do nothing while
//! the fixture is off.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::state::LightState;
use crate::types::{SignalClass, Zone};

const NONE: &[SignalClass] = &[];
const POWER: &[SignalClass] = &[SignalClass::Power];
const POINT: &[SignalClass] = &[SignalClass::Point];
const POINT_TWICE: &[SignalClass] = &[SignalClass::Point, SignalClass::Point];

/// A request from one of the three switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneEvent {
    /// Light bulb switched on.
    PowerOn,
    /// Light bulb switched off.
    PowerOff,
    /// Main switch on.
    MainOn,
    /// Main switch off.
    MainOff,
    /// Upper switch on.
    UpperOn,
    /// Upper switch off.
    UpperOff,
}

impl ZoneEvent {
    /// Returns the light bulb event for a requested on/off value.
    #[must_use]
    pub const fn power(on: bool) -> Self {
        if on { Self::PowerOn } else { Self::PowerOff }
    }

    /// Returns the main switch event for a requested on/off value.
    #[must_use]
    pub const fn main(on: bool) -> Self {
        if on { Self::MainOn } else { Self::MainOff }
    }

    /// Returns the upper switch event for a requested on/off value.
    #[must_use]
    pub const fn upper(on: bool) -> Self {
        if on { Self::UpperOn } else { Self::UpperOff }
    }
}

impl fmt::Display for ZoneEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PowerOn => "power on",
            Self::PowerOff => "power off",
            Self::MainOn => "main on",
            Self::MainOff => "main off",
            Self::UpperOn => "upper on",
            Self::UpperOff => "upper off",
        };
        f.write_str(name)
    }
}

/// What the fixture is lighting, as seen by the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Not energized.
    Off,
    /// Both areas lit.
    Both,
    /// Only the main area lit.
    MainOnly,
    /// Only the upper area lit.
    UpperOnly,
}

impl Phase {
    /// Derives the phase from the tracked state.
    #[must_use]
    pub fn of(state: &LightState) -> Self {
        if !state.power() {
            return Self::Off;
        }
        match state.zone() {
            Zone::Both => Self::Both,
            Zone::Main => Self::MainOnly,
            Zone::Upper => Self::UpperOnly,
        }
    }

    /// Writes this phase into the tracked state.
    ///
    /// Powering off keeps the last zone; it is simply not meaningful until
    /// the next power-on.
    pub fn apply(self, state: &mut LightState) {
        let zone = match self {
            Self::Off => {
                state.set_power(false);
                return;
            }
            Self::Both => Zone::Both,
            Self::MainOnly => Zone::Main,
            Self::UpperOnly => Zone::Upper,
        };
        state.set_power(true);
        state.set_zone(zone);
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Off => "off",
            Self::Both => "both",
            Self::MainOnly => "main only",
            Self::UpperOnly => "upper only",
        };
        f.write_str(name)
    }
}

/// A planned move of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Phase before the move.
    pub from: Phase,
    /// The request that caused it.
    pub event: ZoneEvent,
    /// Phase after every pulse was sent.
    pub to: Phase,
    /// Pulses to send, in order, spaced by the controller interval.
    pub pulses: &'static [SignalClass],
}

impl Transition {
    /// Returns `true` if the request needs no pulse.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.pulses.is_empty()
    }
}

/// Plans the pulses needed to satisfy `event` from `from`.
///
/// # Examples
///
/// ```
/// use remolight::zones::{self, Phase, ZoneEvent};
/// use remolight::types::SignalClass;
///
/// let t = zones::plan(Phase::Both, ZoneEvent::MainOff);
/// assert_eq!(t.to, Phase::UpperOnly);
/// assert_eq!(t.pulses, &[SignalClass::Point, SignalClass::Point]);
///
/// assert!(zones::plan(Phase::Both, ZoneEvent::MainOn).is_noop());
/// ```
#[must_use]
pub fn plan(from: Phase, event: ZoneEvent) -> Transition {
    use Phase::{Both, MainOnly, Off, UpperOnly};
    use ZoneEvent::{MainOff, MainOn, PowerOff, PowerOn, UpperOff, UpperOn};

    let (to, pulses) = match (from, event) {
        (Off, PowerOn) => (Both, POWER),
        (Both | MainOnly | UpperOnly, PowerOff) => (Off, POWER),

        (Both, MainOff) => (UpperOnly, POINT_TWICE),
        (Both, UpperOff) => (MainOnly, POINT),

        (MainOnly, MainOff) => (Off, POWER),
        (MainOnly, UpperOn) => (Both, POINT_TWICE),

        (UpperOnly, UpperOff) => (Off, POWER),
        (UpperOnly, MainOn) => (Both, POINT),

        (Off, PowerOff | MainOn | MainOff | UpperOn | UpperOff)
        | (Both | MainOnly | UpperOnly, PowerOn)
        | (Both, MainOn | UpperOn)
        | (MainOnly, MainOn | UpperOff)
        | (UpperOnly, UpperOn | MainOff) => (from, NONE),
    };

    Transition {
        from,
        event,
        to,
        pulses,
    }
}
