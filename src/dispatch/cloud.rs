// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cloud transport: replays pre-learned signals through the Nature Remo API.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::dispatch::{Dispatcher, SignalMap, check_status};
use crate::error::DispatchError;
use crate::types::SignalClass;

/// Configuration for the cloud transport.
///
/// # Examples
///
/// ```
/// use remolight::dispatch::{CloudConfig, SignalMap};
/// use std::time::Duration;
///
/// let signals = SignalMap::new(
///     "power-id".to_string(),
///     "point-id".to_string(),
///     "color-id".to_string(),
///     "brightness-id".to_string(),
/// );
/// let config = CloudConfig::new("secret-token", signals)
///     .with_timeout(Duration::from_secs(5));
/// assert_eq!(config.base_url(), "https://api.nature.global");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudConfig {
    access_token: String,
    #[serde(default = "CloudConfig::default_base_url")]
    base_url: String,
    #[serde(
        rename = "timeout_ms",
        default = "CloudConfig::default_timeout",
        with = "crate::config::duration_ms"
    )]
    timeout: Duration,
    signals: SignalMap<String>,
}

impl CloudConfig {
    /// Default API endpoint.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.nature.global";
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration with the given access token and signal ids.
    #[must_use]
    pub fn new(access_token: impl Into<String>, signals: SignalMap<String>) -> Self {
        Self {
            access_token: access_token.into(),
            base_url: Self::default_base_url(),
            timeout: Self::DEFAULT_TIMEOUT,
            signals,
        }
    }

    fn default_base_url() -> String {
        Self::DEFAULT_BASE_URL.to_string()
    }

    fn default_timeout() -> Duration {
        Self::DEFAULT_TIMEOUT
    }

    /// Sets a custom API endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the API endpoint.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the signal ids.
    #[must_use]
    pub fn signals(&self) -> &SignalMap<String> {
        &self.signals
    }

    /// Creates a `CloudDispatcher` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn into_dispatcher(self) -> Result<CloudDispatcher, DispatchError> {
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(DispatchError::Http)?;

        Ok(CloudDispatcher {
            base_url: self.base_url.trim_end_matches('/').to_string(),
            access_token: self.access_token,
            signals: self.signals,
            client,
        })
    }
}

/// Sends pulses by asking the cloud API to replay a learned signal.
///
/// Uses `POST /1/signals/{id}/send` with a bearer token.
#[derive(Clone)]
pub struct CloudDispatcher {
    base_url: String,
    access_token: String,
    signals: SignalMap<String>,
    client: Client,
}

impl CloudDispatcher {
    /// Returns the API endpoint.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_url(&self, signal: SignalClass) -> String {
        let id = urlencoding::encode(self.signals.get(signal));
        format!("{}/1/signals/{id}/send", self.base_url)
    }
}

impl std::fmt::Debug for CloudDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudDispatcher")
            .field("base_url", &self.base_url)
            .field("signals", &self.signals)
            .finish_non_exhaustive()
    }
}

impl Dispatcher for CloudDispatcher {
    async fn send(&self, signal: SignalClass) -> Result<(), DispatchError> {
        let url = self.build_url(signal);

        tracing::debug!(url = %url, signal = %signal, "Sending cloud signal");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(DispatchError::Http)?;

        check_status(response.status())
    }
}
