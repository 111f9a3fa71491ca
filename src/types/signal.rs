// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Signal classes: the buttons of the fixture's remote.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One button of the physical remote.
///
/// Each class is resolved to a transport payload by a
/// [`SignalMap`](crate::dispatch::SignalMap); the core never sees payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalClass {
    /// Toggles power.
    Power,
    /// Cycles which zones are lit.
    Point,
    /// Steps color temperature one rung.
    Color,
    /// Steps brightness one rung.
    Brightness,
}

impl SignalClass {
    /// All signal classes.
    pub const ALL: [Self; 4] = [Self::Power, Self::Point, Self::Color, Self::Brightness];

    /// Returns the lowercase name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Power => "power",
            Self::Point => "point",
            Self::Color => "color",
            Self::Brightness => "brightness",
        }
    }
}

impl fmt::Display for SignalClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
