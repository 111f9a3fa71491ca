// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Open-loop controller for the ceiling light.
//!
//! The fixture never reports back, so the [`Controller`] keeps the only
//! record of what it is doing and moves that record forward one confirmed
//! pulse at a time:
//!
//! - power and zone requests go through the [zone state machine](crate::zones)
//!   and are committed only after every pulse was sent
//! - brightness and color requests set a target level; a background task per
//!   axis walks the ladder towards it
//!
//! ```no_run
//! use remolight::Controller;
//! use remolight::dispatch::{CloudConfig, SignalMap};
//! use remolight::persistence::JsonFileStore;
//! use remolight::types::Brightness;
//!
//! # async fn example() -> remolight::Result<()> {
//! let signals = SignalMap::new(
//!     "power-id".to_string(),
//!     "point-id".to_string(),
//!     "color-id".to_string(),
//!     "brightness-id".to_string(),
//! );
//! let dispatcher = CloudConfig::new("token", signals).into_dispatcher()?;
//!
//! let controller = Controller::builder(dispatcher)
//!     .with_store(JsonFileStore::new("/var/lib/remolight/state.json"))
//!     .build();
//!
//! controller.on_published(|report| println!("{report:?}"));
//!
//! controller.set_power(true).await;
//! controller.set_upper(false).await;
//! controller.set_brightness(Brightness::clamped(40));
//! controller.wait_idle().await;
//! # Ok(())
//! # }
//! ```

mod builder;
mod convergence;

pub use builder::ControllerBuilder;

use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::ControllerConfig;
use crate::dispatch::Dispatcher;
use crate::error::{DispatchError, Error};
use crate::ladder::{self, Axis};
use crate::persistence::StateStore;
use crate::state::{LightState, Report};
use crate::subscription::{CallbackRegistry, SubscriptionId};
use crate::types::{Brightness, ColorTemp, Level, SignalClass};
use crate::zones::{self, Phase, Transition, ZoneEvent};

use convergence::Lane;

/// State shared between the controller handle and its background tasks.
pub(crate) struct Shared<D> {
    dispatcher: D,
    config: ControllerConfig,
    state: Mutex<LightState>,
    store: Box<dyn StateStore>,
    callbacks: CallbackRegistry,
    zone_gate: tokio::sync::Mutex<()>,
    brightness: Lane,
    color: Lane,
}

impl<D> Shared<D> {
    fn lane(&self, axis: Axis) -> &Lane {
        match axis {
            Axis::Brightness => &self.brightness,
            Axis::ColorTemperature => &self.color,
        }
    }

    /// Applies a mutation and saves the result while still holding the lock,
    /// so snapshots are written in mutation order.
    fn mutate<R>(&self, f: impl FnOnce(&mut LightState) -> R) -> R {
        let mut state = self.state.lock();
        let result = f(&mut state);
        if let Err(e) = self.store.save(&state) {
            tracing::warn!(error = %e, "Failed to save state snapshot");
        }
        result
    }

    fn report(&self) -> Report {
        Report::from(&*self.state.lock())
    }

    fn publish(&self) {
        let report = self.report();
        tracing::trace!(?report, "Publishing state");
        self.callbacks.dispatch(&report);
    }
}

impl<D: Dispatcher> Shared<D> {
    /// Sends pulses in order, waiting the interval between consecutive ones.
    async fn emit(&self, pulses: &[SignalClass]) -> Result<(), DispatchError> {
        for (i, &signal) in pulses.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(self.config.interval()).await;
            }
            tracing::debug!(signal = %signal, pulse = i + 1, of = pulses.len(), "Sending pulse");
            self.dispatcher.send(signal).await?;
        }
        Ok(())
    }
}

/// Controller of one infrared ceiling light.
///
/// Cheap to clone; clones share the same state and background tasks.
///
/// Brightness and color requests spawn Tokio tasks, so the controller must
/// be used from within a Tokio runtime.
pub struct Controller<D: Dispatcher + 'static> {
    shared: Arc<Shared<D>>,
}

impl<D: Dispatcher + 'static> Clone for Controller<D> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<D: Dispatcher + 'static> std::fmt::Debug for Controller<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("config", &self.shared.config)
            .field("state", &*self.shared.state.lock())
            .field("callbacks", &self.shared.callbacks)
            .finish_non_exhaustive()
    }
}

impl<D: Dispatcher + 'static> Controller<D> {
    /// Starts building a controller around a dispatcher.
    #[must_use]
    pub fn builder(dispatcher: D) -> ControllerBuilder<D> {
        ControllerBuilder::new(dispatcher)
    }

    pub(crate) fn new(
        dispatcher: D,
        config: ControllerConfig,
        store: Box<dyn StateStore>,
        state: LightState,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                dispatcher,
                config,
                state: Mutex::new(state),
                store,
                callbacks: CallbackRegistry::new(),
                zone_gate: tokio::sync::Mutex::new(()),
                brightness: Lane::default(),
                color: Lane::default(),
            }),
        }
    }

    /// Returns the timing in use.
    #[must_use]
    pub fn config(&self) -> &ControllerConfig {
        &self.shared.config
    }

    /// Returns the dispatcher.
    #[must_use]
    pub fn dispatcher(&self) -> &D {
        &self.shared.dispatcher
    }

    // ========== Power and Zones ==========

    /// Runs one zone state machine transition.
    ///
    /// Transitions are serialized: a second call waits for the first to
    /// finish. The new phase is committed and saved only once every pulse
    /// was sent, so a failed pulse leaves the record untouched. Subscribers
    /// are notified either way.
    ///
    /// # Errors
    ///
    /// Returns `Error::Dispatch` if a pulse could not be sent.
    pub async fn transition(&self, event: ZoneEvent) -> Result<Transition, Error> {
        let _gate = self.shared.zone_gate.lock().await;

        let from = Phase::of(&self.shared.state.lock());
        let transition = zones::plan(from, event);

        if transition.is_noop() {
            tracing::debug!(phase = %from, event = %event, "No pulse needed");
            self.shared.publish();
            return Ok(transition);
        }

        if let Err(e) = self.shared.emit(transition.pulses).await {
            tracing::debug!(phase = %from, event = %event, "Transition not committed");
            self.shared.publish();
            return Err(e.into());
        }

        self.shared.mutate(|state| transition.to.apply(state));
        tracing::info!(
            from = %transition.from,
            to = %transition.to,
            event = %event,
            pulses = transition.pulses.len(),
            "Zone transition committed"
        );
        self.shared.publish();
        Ok(transition)
    }

    /// Handles the light bulb switch. Failures are logged.
    pub async fn set_power(&self, on: bool) {
        self.handle(ZoneEvent::power(on)).await;
    }

    /// Handles the main area switch. Failures are logged.
    pub async fn set_main(&self, on: bool) {
        self.handle(ZoneEvent::main(on)).await;
    }

    /// Handles the upper area switch. Failures are logged.
    pub async fn set_upper(&self, on: bool) {
        self.handle(ZoneEvent::upper(on)).await;
    }

    async fn handle(&self, event: ZoneEvent) {
        if let Err(e) = self.transition(event).await {
            tracing::error!(event = %event, error = %e, "Zone transition failed");
        }
    }

    /// Returns whether the fixture is powered.
    #[must_use]
    pub fn power(&self) -> bool {
        self.shared.state.lock().power()
    }

    /// Returns whether the main area is lit.
    #[must_use]
    pub fn main_on(&self) -> bool {
        self.shared.state.lock().main_on()
    }

    /// Returns whether the upper area is lit.
    #[must_use]
    pub fn upper_on(&self) -> bool {
        self.shared.state.lock().upper_on()
    }

    // ========== Brightness and Color ==========

    /// Records a brightness request and starts walking the ladder to it.
    ///
    /// Returns immediately; pulses are sent by a background task.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn set_brightness(&self, value: Brightness) {
        self.shared.mutate(|state| state.set_brightness(value));
        let target = ladder::brightness_level(value);
        tracing::debug!(value = %value, target = %target, "Brightness requested");
        self.shared.request_target(Axis::Brightness, target);
    }

    /// Records a color temperature request and starts walking the ladder
    /// to it.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn set_color_temperature(&self, value: ColorTemp) {
        self.shared.mutate(|state| state.set_color_temperature(value));
        let target = ladder::color_level(value);
        tracing::debug!(value = %value, target = %target, "Color temperature requested");
        self.shared.request_target(Axis::ColorTemperature, target);
    }

    /// Sets a ladder target directly.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn request_level(&self, axis: Axis, target: Level) {
        self.shared.request_target(axis, target);
    }

    /// Returns the last requested brightness.
    #[must_use]
    pub fn brightness(&self) -> Brightness {
        self.shared.state.lock().brightness()
    }

    /// Returns the last requested color temperature.
    #[must_use]
    pub fn color_temperature(&self) -> ColorTemp {
        self.shared.state.lock().color_temperature()
    }

    /// Returns the current rung of an axis.
    #[must_use]
    pub fn level(&self, axis: Axis) -> Level {
        self.shared.state.lock().level(axis)
    }

    /// Returns the latest target of an axis, if one was ever requested.
    #[must_use]
    pub fn target(&self, axis: Axis) -> Option<Level> {
        self.shared.lane(axis).target()
    }

    /// Returns `true` while a background task is walking an axis.
    #[must_use]
    pub fn is_converging(&self, axis: Axis) -> bool {
        self.shared.lane(axis).is_running()
    }

    /// Waits until neither axis has a running task.
    pub async fn wait_idle(&self) {
        for axis in Axis::ALL {
            let lane = self.shared.lane(axis);
            while let Some(task) = lane.take_task() {
                if let Err(e) = task.await {
                    tracing::error!(axis = %axis, error = %e, "Convergence task failed");
                }
            }
        }
    }

    // ========== State and Subscriptions ==========

    /// Returns a copy of the full record.
    #[must_use]
    pub fn state(&self) -> LightState {
        self.shared.state.lock().clone()
    }

    /// Returns the values the accessory layer displays.
    #[must_use]
    pub fn report(&self) -> Report {
        self.shared.report()
    }

    /// Pushes the current report to every subscriber.
    pub fn publish(&self) {
        self.shared.publish();
    }

    /// Registers a callback invoked with every published report.
    pub fn on_published<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Report) + Send + Sync + 'static,
    {
        self.shared.callbacks.on_published(callback)
    }

    /// Removes a callback. Returns `true` if it was registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.shared.callbacks.unsubscribe(id)
    }
}

#[cfg(any(feature = "cloud", feature = "local"))]
impl Controller<crate::dispatch::Transport> {
    /// Builds a controller from a host configuration.
    ///
    /// Uses a [`JsonFileStore`](crate::persistence::JsonFileStore) when
    /// `state_path` is set and an in-memory store otherwise.
    ///
    /// # Errors
    ///
    /// Returns `Error::Dispatch` if the transport cannot be created.
    pub fn from_config(config: crate::config::LightConfig) -> Result<Self, Error> {
        use crate::persistence::{JsonFileStore, MemoryStore};

        let controller_config = config.controller_config();
        let dispatcher = config.transport.into_dispatcher()?;
        let builder = Self::builder(dispatcher).with_config(controller_config);

        let builder = match config.state_path {
            Some(path) => builder.with_store(JsonFileStore::new(path)),
            None => builder.with_store(MemoryStore::new()),
        };
        Ok(builder.build())
    }
}
