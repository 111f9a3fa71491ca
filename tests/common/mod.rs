// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared helpers for controller integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use remolight::error::DispatchError;
use remolight::persistence::MemoryStore;
use remolight::{Controller, ControllerConfig, Dispatcher, LightState, SignalClass};
use tokio::time::Instant;

pub const INTERVAL: Duration = Duration::from_millis(500);

/// Dispatcher that records every pulse with the (paused) Tokio clock.
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    sent: Mutex<Vec<(SignalClass, Instant)>>,
    calls: Mutex<usize>,
    fail_on: Mutex<HashSet<usize>>,
    in_flight: Mutex<HashMap<SignalClass, (usize, usize)>>,
    delay: Duration,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every send takes `delay` before completing.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// The `n`th call (1-based, counting failures) fails.
    pub fn fail_on(self, n: usize) -> Self {
        self.fail_on.lock().insert(n);
        self
    }

    pub fn signals(&self) -> Vec<SignalClass> {
        self.sent.lock().iter().map(|(s, _)| *s).collect()
    }

    pub fn count(&self, signal: SignalClass) -> usize {
        self.sent.lock().iter().filter(|(s, _)| *s == signal).count()
    }

    pub fn instants(&self) -> Vec<Instant> {
        self.sent.lock().iter().map(|(_, t)| *t).collect()
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock()
    }

    /// Highest number of concurrent sends seen for a signal class.
    pub fn max_in_flight(&self, signal: SignalClass) -> usize {
        self.in_flight.lock().get(&signal).map_or(0, |(_, max)| *max)
    }

    pub fn clear(&self) {
        self.sent.lock().clear();
    }
}

impl Dispatcher for RecordingDispatcher {
    async fn send(&self, signal: SignalClass) -> Result<(), DispatchError> {
        let call = {
            let mut calls = self.calls.lock();
            *calls += 1;
            *calls
        };
        {
            let mut in_flight = self.in_flight.lock();
            let entry = in_flight.entry(signal).or_default();
            entry.0 += 1;
            entry.1 = entry.1.max(entry.0);
        }

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if let Some(entry) = self.in_flight.lock().get_mut(&signal) {
            entry.0 -= 1;
        }

        if self.fail_on.lock().contains(&call) {
            return Err(DispatchError::ConnectionFailed(format!("call {call} refused")));
        }

        self.sent.lock().push((signal, Instant::now()));
        Ok(())
    }
}

pub fn config() -> ControllerConfig {
    ControllerConfig::new().with_interval(INTERVAL)
}

/// Builds a controller starting from `state`, returning the store handle.
pub fn controller_with(
    dispatcher: RecordingDispatcher,
    state: LightState,
) -> (Controller<Arc<RecordingDispatcher>>, Arc<RecordingDispatcher>, Arc<MemoryStore>) {
    let dispatcher = Arc::new(dispatcher);
    let store = Arc::new(MemoryStore::with_state(state));
    let controller = Controller::builder(Arc::clone(&dispatcher))
        .with_config(config())
        .with_store(Arc::clone(&store))
        .build();
    (controller, dispatcher, store)
}

/// Asserts that consecutive pulses are at least one interval apart.
pub fn assert_spaced(instants: &[Instant]) {
    for pair in instants.windows(2) {
        let gap = pair[1] - pair[0];
        assert!(gap >= INTERVAL, "pulses only {gap:?} apart");
    }
}
