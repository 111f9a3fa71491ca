// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transports that emit infrared pulses.
//!
//! The core only needs "emit pulse P, await completion or failure", which is
//! the [`Dispatcher`] trait. Two transports ship with the crate:
//!
//! - [`CloudDispatcher`]: asks the Nature Remo cloud to replay a pre-learned
//!   signal, identified by its signal id
//! - [`LocalDispatcher`]: posts a raw pulse-timing waveform to a Remo device
//!   on the local network
//!
//! Each transport resolves a [`SignalClass`] to its own payload through a
//! [`SignalMap`]. Transports do not rate-limit; the controller spaces pulses.

#[cfg(feature = "cloud")]
mod cloud;
#[cfg(feature = "local")]
mod local;

#[cfg(feature = "cloud")]
pub use cloud::{CloudConfig, CloudDispatcher};
#[cfg(feature = "local")]
pub use local::{IrSignal, LocalConfig, LocalDispatcher};

use std::future::Future;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::DispatchError;
use crate::types::SignalClass;

/// Something that can emit one pulse of a given signal class.
///
/// Each call is independent. Implementations must not retry on their own:
/// a blind retry could toggle the fixture twice.
pub trait Dispatcher: Send + Sync {
    /// Emits one pulse and waits until the transport accepted it.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError` if the transport failed to emit the pulse.
    fn send(&self, signal: SignalClass)
    -> impl Future<Output = Result<(), DispatchError>> + Send;
}

impl<D: Dispatcher> Dispatcher for Arc<D> {
    fn send(
        &self,
        signal: SignalClass,
    ) -> impl Future<Output = Result<(), DispatchError>> + Send {
        (**self).send(signal)
    }
}

/// One transport payload per signal class.
///
/// # Examples
///
/// ```
/// use remolight::dispatch::SignalMap;
/// use remolight::types::SignalClass;
///
/// let ids = SignalMap::new("sig-power", "sig-point", "sig-color", "sig-bright");
/// assert_eq!(ids.get(SignalClass::Point), &"sig-point");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalMap<T> {
    /// Payload for [`SignalClass::Power`].
    pub power: T,
    /// Payload for [`SignalClass::Point`].
    pub point: T,
    /// Payload for [`SignalClass::Color`].
    pub color: T,
    /// Payload for [`SignalClass::Brightness`].
    pub brightness: T,
}

impl<T> SignalMap<T> {
    /// Creates a map from one payload per class.
    #[must_use]
    pub fn new(power: T, point: T, color: T, brightness: T) -> Self {
        Self {
            power,
            point,
            color,
            brightness,
        }
    }

    /// Returns the payload for a signal class.
    #[must_use]
    pub fn get(&self, signal: SignalClass) -> &T {
        match signal {
            SignalClass::Power => &self.power,
            SignalClass::Point => &self.point,
            SignalClass::Color => &self.color,
            SignalClass::Brightness => &self.brightness,
        }
    }
}

/// Either shipped transport, chosen by configuration.
#[cfg(any(feature = "cloud", feature = "local"))]
#[derive(Debug, Clone)]
pub enum Transport {
    /// Pre-learned signals replayed by the cloud API.
    #[cfg(feature = "cloud")]
    Cloud(CloudDispatcher),
    /// Raw waveforms sent to a device on the local network.
    #[cfg(feature = "local")]
    Local(LocalDispatcher),
}

#[cfg(any(feature = "cloud", feature = "local"))]
impl Dispatcher for Transport {
    async fn send(&self, signal: SignalClass) -> Result<(), DispatchError> {
        match self {
            #[cfg(feature = "cloud")]
            Self::Cloud(dispatcher) => dispatcher.send(signal).await,
            #[cfg(feature = "local")]
            Self::Local(dispatcher) => dispatcher.send(signal).await,
        }
    }
}

/// Checks a transport response the same way for both transports.
#[cfg(any(feature = "cloud", feature = "local"))]
fn check_status(status: reqwest::StatusCode) -> Result<(), DispatchError> {
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(DispatchError::AuthenticationFailed);
    }
    if !status.is_success() {
        return Err(DispatchError::Status {
            code: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        });
    }
    Ok(())
}
