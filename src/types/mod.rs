// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for light control.
//!
//! Each type ensures values are within their valid ranges at construction
//! time, so the ladder and the zone machine never see out-of-range input.
//!
//! # Types
//!
//! - [`Brightness`] - Brightness slider (0-100%)
//! - [`ColorTemp`] - Color temperature slider in mireds (140-500)
//! - [`Level`] - Discrete ladder rung (0-7)
//! - [`Direction`] - Which way the next step pulse moves a ladder
//! - [`Zone`] - Which lighting areas are lit
//! - [`SignalClass`] - The remote button a pulse emulates

mod brightness;
mod color;
mod level;
mod signal;
mod zone;

pub use brightness::Brightness;
pub use color::ColorTemp;
pub use level::{Direction, Level};
pub use signal::SignalClass;
pub use zone::Zone;
