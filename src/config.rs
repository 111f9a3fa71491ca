// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Controller configuration.
//!
//! [`ControllerConfig`] holds the timing the core enforces. [`LightConfig`]
//! is the file a host process loads: timing, snapshot location and which
//! transport to use.
//!
//! ```
//! use remolight::config::LightConfig;
//!
//! let config = LightConfig::from_json_str(r#"{
//!     "interval_ms": 600,
//!     "state_path": "/var/lib/remolight/state.json",
//!     "transport": {
//!         "kind": "cloud",
//!         "access_token": "token",
//!         "signals": {"power": "a", "point": "b", "color": "c", "brightness": "d"}
//!     }
//! }"#).unwrap();
//!
//! assert_eq!(config.controller_config().interval().as_millis(), 600);
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Timing enforced by the controller.
///
/// # Examples
///
/// ```
/// use remolight::config::ControllerConfig;
/// use std::time::Duration;
///
/// let config = ControllerConfig::new().with_interval(Duration::from_millis(700));
/// assert_eq!(config.interval(), Duration::from_millis(700));
/// assert_eq!(config.settle(), ControllerConfig::DEFAULT_SETTLE);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    interval: Duration,
    settle: Duration,
}

impl ControllerConfig {
    /// Default spacing between related pulses.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);
    /// Default yield before each convergence check.
    pub const DEFAULT_SETTLE: Duration = Duration::from_millis(1);

    /// Creates a configuration with the default timing.
    #[must_use]
    pub fn new() -> Self {
        Self {
            interval: Self::DEFAULT_INTERVAL,
            settle: Self::DEFAULT_SETTLE,
        }
    }

    /// Sets the mandatory spacing between related pulses.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the yield before each convergence check.
    ///
    /// A longer settle lets a dragged slider coalesce into fewer targets.
    #[must_use]
    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    /// Returns the spacing between related pulses.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns the yield before each convergence check.
    #[must_use]
    pub fn settle(&self) -> Duration {
        self.settle
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Which transport emits pulses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransportConfig {
    /// Pre-learned signals replayed by the cloud API.
    #[cfg(feature = "cloud")]
    Cloud(crate::dispatch::CloudConfig),
    /// Raw waveforms posted to a device on the local network.
    #[cfg(feature = "local")]
    Local(crate::dispatch::LocalConfig),
}

#[cfg(any(feature = "cloud", feature = "local"))]
impl TransportConfig {
    /// Builds the configured transport.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn into_dispatcher(
        self,
    ) -> Result<crate::dispatch::Transport, crate::error::DispatchError> {
        use crate::dispatch::Transport;

        match self {
            #[cfg(feature = "cloud")]
            Self::Cloud(config) => config.into_dispatcher().map(Transport::Cloud),
            #[cfg(feature = "local")]
            Self::Local(config) => config.into_dispatcher().map(Transport::Local),
        }
    }
}

/// Configuration file of a host process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightConfig {
    /// Spacing between related pulses in milliseconds.
    #[serde(default)]
    pub interval_ms: Option<u64>,
    /// Yield before each convergence check in milliseconds.
    #[serde(default)]
    pub settle_ms: Option<u64>,
    /// Where the crash-recovery snapshot lives. No snapshot if unset.
    #[serde(default)]
    pub state_path: Option<PathBuf>,
    /// Transport used to emit pulses.
    pub transport: TransportConfig,
}

impl LightConfig {
    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the JSON does not match the schema or a
    /// value is unusable.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "Loaded configuration file");
        Self::from_json_str(&contents)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_ms == Some(0) {
            return Err(ConfigError::Invalid(
                "interval_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the timing part of this configuration.
    #[must_use]
    pub fn controller_config(&self) -> ControllerConfig {
        let mut config = ControllerConfig::new();
        if let Some(ms) = self.interval_ms {
            config = config.with_interval(Duration::from_millis(ms));
        }
        if let Some(ms) = self.settle_ms {
            config = config.with_settle(Duration::from_millis(ms));
        }
        config
    }
}

/// Serde adapter storing a `Duration` as whole milliseconds.
pub(crate) mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(crate) fn serialize<S: Serializer>(
        value: &Duration,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let millis = u64::try_from(value.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
