// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light state types.
//!
//! [`LightState`] is the open-loop record of the fixture, and [`Report`] is
//! the view of it pushed to the accessory layer after each mutation.
//!
//! # Examples
//!
//! ```
//! use remolight::state::{LightState, Report};
//!
//! let mut state = LightState::new();
//! state.set_power(true);
//!
//! let report = Report::from(&state);
//! assert!(report.main_on && report.upper_on);
//! ```

mod light_state;
mod report;

pub use light_state::LightState;
pub use report::Report;
