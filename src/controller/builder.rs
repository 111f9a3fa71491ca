// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Controller builder.

use crate::config::ControllerConfig;
use crate::controller::Controller;
use crate::dispatch::Dispatcher;
use crate::persistence::{MemoryStore, StateStore};
use crate::state::LightState;

/// Builder for [`Controller`].
///
/// The state is restored from the store when the controller is built. A
/// missing or unreadable snapshot falls back to the defaults: powered off,
/// both zones, brightness rung 7 and color rung 6, both moving down.
///
/// # Examples
///
/// ```
/// use remolight::Controller;
/// use remolight::config::ControllerConfig;
/// use remolight::dispatch::Dispatcher;
/// use remolight::error::DispatchError;
/// use remolight::persistence::MemoryStore;
/// use remolight::types::SignalClass;
/// use std::time::Duration;
///
/// struct Silent;
///
/// impl Dispatcher for Silent {
///     async fn send(&self, _signal: SignalClass) -> Result<(), DispatchError> {
///         Ok(())
///     }
/// }
///
/// let controller = Controller::builder(Silent)
///     .with_config(ControllerConfig::new().with_interval(Duration::from_millis(300)))
///     .with_store(MemoryStore::new())
///     .build();
///
/// assert!(!controller.power());
/// ```
pub struct ControllerBuilder<D> {
    dispatcher: D,
    config: ControllerConfig,
    store: Option<Box<dyn StateStore>>,
}

impl<D: Dispatcher + 'static> ControllerBuilder<D> {
    pub(crate) fn new(dispatcher: D) -> Self {
        Self {
            dispatcher,
            config: ControllerConfig::default(),
            store: None,
        }
    }

    /// Sets the timing.
    #[must_use]
    pub fn with_config(mut self, config: ControllerConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets where the state snapshot is loaded from and saved to.
    ///
    /// Defaults to a [`MemoryStore`].
    #[must_use]
    pub fn with_store(mut self, store: impl StateStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Builds the controller, restoring the last saved state.
    #[must_use]
    pub fn build(self) -> Controller<D> {
        let store = self
            .store
            .unwrap_or_else(|| Box::new(MemoryStore::new()));

        let state = match store.load() {
            Ok(Some(state)) => {
                tracing::info!(
                    power = state.power(),
                    zone = %state.zone(),
                    "Restored state snapshot"
                );
                state
            }
            Ok(None) => {
                tracing::info!("No state snapshot, starting from defaults");
                LightState::default()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Unreadable state snapshot, starting from defaults");
                LightState::default()
            }
        };

        Controller::new(self.dispatcher, self.config, store, state)
    }
}

impl<D> std::fmt::Debug for ControllerBuilder<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControllerBuilder")
            .field("config", &self.config)
            .field("has_store", &self.store.is_some())
            .finish_non_exhaustive()
    }
}
