// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lighting zones of the fixture.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which of the two wired lighting areas are lit.
///
/// # Examples
///
/// ```
/// use remolight::types::Zone;
///
/// assert!(Zone::Both.lights_main());
/// assert!(Zone::Both.lights_upper());
/// assert!(!Zone::Main.lights_upper());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    /// Main and upper areas together.
    #[default]
    Both,
    /// Only the main area.
    Main,
    /// Only the upper area.
    Upper,
}

impl Zone {
    /// Returns `true` if the main area is part of this zone.
    #[must_use]
    pub const fn lights_main(&self) -> bool {
        matches!(self, Self::Both | Self::Main)
    }

    /// Returns `true` if the upper area is part of this zone.
    #[must_use]
    pub const fn lights_upper(&self) -> bool {
        matches!(self, Self::Both | Self::Upper)
    }

    /// Returns the lowercase name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Both => "both",
            Self::Main => "main",
            Self::Upper => "upper",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
