// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `remolight` - open-loop control of an infrared multi-zone ceiling light.
//!
//! The fixture is driven by four infrared buttons (power, point, color and
//! brightness) and never reports its state. This library keeps a record of
//! what the fixture is doing and turns high-level requests ("upper area
//! off", "brightness 40 %") into the exact pulse sequences that get it
//! there, sent through a Nature Remo.
//!
//! # Features
//!
//! - **Zones**: power, main area and upper area switches, mapped onto the
//!   fixture's single "point" button cycle
//! - **Ladders**: brightness and color temperature as seven-rung ladders
//!   walked one pulse at a time by a background task per axis
//! - **Transports**: the Nature Remo cloud API (`cloud` feature) or the
//!   device's local HTTP API (`local` feature)
//! - **Snapshots**: the record survives restarts through a [`StateStore`]
//!
//! # Quick Start
//!
//! ```no_run
//! use remolight::Controller;
//! use remolight::config::LightConfig;
//! use remolight::types::{Brightness, ColorTemp};
//!
//! #[tokio::main]
//! async fn main() -> remolight::Result<()> {
//!     let config = LightConfig::from_file("remolight.json")?;
//!     let controller = Controller::from_config(config)?;
//!
//!     controller.on_published(|report| {
//!         println!("main: {}, upper: {}", report.main_on, report.upper_on);
//!     });
//!
//!     controller.set_power(true).await;
//!     controller.set_main(false).await;
//!     controller.set_brightness(Brightness::new(60)?);
//!     controller.set_color_temperature(ColorTemp::new(320)?);
//!
//!     controller.wait_idle().await;
//!     Ok(())
//! }
//! ```
//!
//! # Custom transports
//!
//! Anything that can emit a pulse implements [`Dispatcher`]:
//!
//! ```
//! use remolight::{Controller, Dispatcher};
//! use remolight::error::DispatchError;
//! use remolight::types::SignalClass;
//!
//! struct Logger;
//!
//! impl Dispatcher for Logger {
//!     async fn send(&self, signal: SignalClass) -> Result<(), DispatchError> {
//!         println!("pulse {signal}");
//!         Ok(())
//!     }
//! }
//!
//! let controller = Controller::builder(Logger).build();
//! assert!(!controller.power());
//! ```

pub mod config;
mod controller;
pub mod dispatch;
pub mod error;
pub mod ladder;
pub mod persistence;
pub mod state;
pub mod subscription;
pub mod types;
pub mod zones;

pub use config::{ControllerConfig, LightConfig};
pub use controller::{Controller, ControllerBuilder};
pub use dispatch::{Dispatcher, SignalMap};
#[cfg(any(feature = "cloud", feature = "local"))]
pub use dispatch::Transport;
pub use error::{ConfigError, DispatchError, Error, PersistenceError, Result, ValueError};
pub use ladder::{Axis, Step};
pub use persistence::{JsonFileStore, MemoryStore, StateStore};
pub use state::{LightState, Report};
pub use subscription::{CallbackRegistry, SubscriptionId};
pub use types::{Brightness, ColorTemp, Direction, Level, SignalClass, Zone};
pub use zones::{Phase, Transition, ZoneEvent};
