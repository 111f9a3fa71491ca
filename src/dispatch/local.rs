// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Local transport: posts raw infrared waveforms to a Remo on the LAN.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::dispatch::{Dispatcher, SignalMap, check_status};
use crate::error::DispatchError;
use crate::types::SignalClass;

/// A raw infrared waveform as accepted by the local `/messages` endpoint.
///
/// `data` holds alternating mark/space durations in the unit named by
/// `format` (microseconds for `"us"`).
///
/// ```
/// use remolight::dispatch::IrSignal;
///
/// let signal = IrSignal::new(vec![3400, 1700, 450, 1300]);
/// assert_eq!(signal.format, "us");
/// assert_eq!(signal.freq, 38);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrSignal {
    /// Duration unit of `data`.
    #[serde(default = "IrSignal::default_format")]
    pub format: String,
    /// Carrier frequency in kHz.
    #[serde(default = "IrSignal::default_freq")]
    pub freq: u16,
    /// Mark/space durations.
    pub data: Vec<u32>,
}

impl IrSignal {
    /// Creates a 38 kHz waveform with microsecond timings.
    #[must_use]
    pub fn new(data: Vec<u32>) -> Self {
        Self {
            format: Self::default_format(),
            freq: Self::default_freq(),
            data,
        }
    }

    fn default_format() -> String {
        "us".to_string()
    }

    fn default_freq() -> u16 {
        38
    }
}

/// Configuration for the local transport.
///
/// `host` may be a bare address or include a scheme.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalConfig {
    host: String,
    #[serde(
        rename = "timeout_ms",
        default = "LocalConfig::default_timeout",
        with = "crate::config::duration_ms"
    )]
    timeout: Duration,
    signals: SignalMap<IrSignal>,
}

impl LocalConfig {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Creates a configuration for the device at `host`.
    #[must_use]
    pub fn new(host: impl Into<String>, signals: SignalMap<IrSignal>) -> Self {
        Self {
            host: host.into(),
            timeout: Self::DEFAULT_TIMEOUT,
            signals,
        }
    }

    fn default_timeout() -> Duration {
        Self::DEFAULT_TIMEOUT
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Creates a `LocalDispatcher` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn into_dispatcher(self) -> Result<LocalDispatcher, DispatchError> {
        let base_url = if self.host.starts_with("http://") || self.host.starts_with("https://") {
            self.host.trim_end_matches('/').to_string()
        } else {
            format!("http://{}", self.host)
        };

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(DispatchError::Http)?;

        Ok(LocalDispatcher {
            base_url,
            signals: self.signals,
            client,
        })
    }
}

/// Sends pulses as raw waveforms to `POST /messages` on the device.
#[derive(Debug, Clone)]
pub struct LocalDispatcher {
    base_url: String,
    signals: SignalMap<IrSignal>,
    client: Client,
}

impl LocalDispatcher {
    /// Returns the base URL of the device.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Dispatcher for LocalDispatcher {
    async fn send(&self, signal: SignalClass) -> Result<(), DispatchError> {
        let url = format!("{}/messages", self.base_url);
        let waveform = self.signals.get(signal);

        tracing::debug!(
            url = %url,
            signal = %signal,
            edges = waveform.data.len(),
            "Sending local waveform"
        );

        let response = self
            .client
            .post(&url)
            .header("X-Requested-With", "local")
            .json(waveform)
            .send()
            .await
            .map_err(DispatchError::Http)?;

        check_status(response.status())
    }
}
