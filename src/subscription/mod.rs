// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscription system for published reports.
//!
//! The accessory layer registers a callback and receives a
//! [`Report`](crate::state::Report) after every mutation, including handler
//! calls that changed nothing, so a rejected switch toggle snaps back.
//!
//! ```no_run
//! use remolight::Controller;
//! use remolight::dispatch::Transport;
//!
//! # fn example(controller: &Controller<Transport>) {
//! let sub_id = controller.on_published(|report| {
//!     println!("power={} brightness={}", report.power, report.brightness);
//! });
//!
//! controller.unsubscribe(sub_id);
//! # }
//! ```

mod callback;

pub use callback::{CallbackRegistry, SubscriptionId};
