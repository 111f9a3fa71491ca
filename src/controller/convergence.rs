// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Background convergence of one ladder towards its target level.
//!
//! Each axis owns a [`Lane`]: the latest requested target plus the handle of
//! at most one running task. A request while a task runs only moves the
//! target; the task picks it up on its next check.
//!
//! Lock order is lane, then state. No guard is held across an await.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::controller::Shared;
use crate::dispatch::Dispatcher;
use crate::ladder::Axis;
use crate::types::Level;

#[derive(Debug, Default)]
pub(crate) struct Lane {
    slot: Mutex<Slot>,
}

#[derive(Debug, Default)]
struct Slot {
    target: Option<Level>,
    running: bool,
    task: Option<JoinHandle<()>>,
}

impl Lane {
    pub(crate) fn target(&self) -> Option<Level> {
        self.slot.lock().target
    }

    pub(crate) fn is_running(&self) -> bool {
        self.slot.lock().running
    }

    /// Takes the handle of the running task so the caller can await it.
    ///
    /// The lane stays marked as running until the task itself exits.
    pub(crate) fn take_task(&self) -> Option<JoinHandle<()>> {
        self.slot.lock().task.take()
    }

    fn finish(&self) {
        let mut slot = self.slot.lock();
        slot.running = false;
        slot.task = None;
    }
}

impl<D: Dispatcher + 'static> Shared<D> {
    /// Records a new target and starts the task if none is running.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime while no task is running.
    pub(crate) fn request_target(self: &Arc<Self>, axis: Axis, target: Level) {
        let target = axis.clamp(target);
        let mut slot = self.lane(axis).slot.lock();
        slot.target = Some(target);

        if slot.running {
            tracing::debug!(axis = %axis, target = %target, "Retargeted running convergence");
            return;
        }

        tracing::debug!(axis = %axis, target = %target, "Starting convergence");
        slot.running = true;
        slot.task = Some(tokio::spawn(Arc::clone(self).converge(axis)));
    }

    async fn converge(self: Arc<Self>, axis: Axis) {
        let lane = self.lane(axis);
        let mut pulses = 0_u32;

        loop {
            tokio::time::sleep(self.config.settle()).await;

            // Deciding to stop and leaving the lane happen under one lock, so
            // a request racing with the exit either lands before it or spawns
            // a fresh task.
            let step = {
                let mut slot = lane.slot.lock();
                let state = self.state.lock();
                let current = state.level(axis);
                match slot.target {
                    Some(target) if target != current => Some(state.next_step(axis)),
                    _ => {
                        slot.running = false;
                        slot.task = None;
                        None
                    }
                }
            };
            let Some(step) = step else {
                break;
            };

            tracing::debug!(
                axis = %axis,
                level = %step.level,
                direction = step.direction.as_str(),
                signal = %step.signal,
                "Convergence step"
            );

            if let Err(e) = self.dispatcher.send(step.signal).await {
                tracing::error!(
                    axis = %axis,
                    error = %e,
                    "Convergence aborted, target kept for the next request"
                );
                lane.finish();
                return;
            }
            pulses += 1;

            self.mutate(|state| state.apply_step(axis, &step));
            tokio::time::sleep(self.config.interval()).await;
        }

        tracing::info!(axis = %axis, pulses, "Convergence reached target");
        self.publish();
    }
}
