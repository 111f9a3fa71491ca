// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `remolight` library.
//!
//! The core only ever has to react to [`DispatchError`]: a pulse that could
//! not be sent. Everything else here belongs to the collaborators around the
//! core (snapshot persistence, configuration loading, value validation).

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// A pulse could not be emitted.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// The state snapshot could not be read or written.
    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// The configuration could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// A value was outside its allowed range.
    #[error("value error: {0}")]
    Value(#[from] ValueError),
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u16,
        /// Maximum allowed value.
        max: u16,
        /// The actual value that was provided.
        actual: u16,
    },
}

/// Errors raised by a transport while emitting a pulse.
///
/// The hardware gives no feedback, so a successful send only means the
/// transport accepted the pulse.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// HTTP request failed.
    #[cfg(any(feature = "cloud", feature = "local"))]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The transport rejected the access token.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The transport answered with a non-success status.
    #[error("HTTP {code} - {reason}")]
    Status {
        /// The HTTP status code.
        code: u16,
        /// The canonical reason phrase.
        reason: String,
    },

    /// Connection to the transport failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
}

/// Errors related to the crash-recovery snapshot.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Reading or writing the snapshot file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The snapshot could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors related to loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration is not valid JSON for this schema.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration parsed but contains an unusable value.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::OutOfRange {
            min: 0,
            max: 100,
            actual: 150,
        };
        assert_eq!(err.to_string(), "value 150 is out of range [0, 100]");
    }

    #[test]
    fn dispatch_status_display() {
        let err = DispatchError::Status {
            code: 503,
            reason: "Service Unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 503 - Service Unavailable");
    }

    #[test]
    fn error_from_dispatch_error() {
        let err: Error = DispatchError::AuthenticationFailed.into();
        assert!(matches!(
            err,
            Error::Dispatch(DispatchError::AuthenticationFailed)
        ));
        assert_eq!(err.to_string(), "dispatch error: authentication failed");
    }

    #[test]
    fn config_error_display() {
        let err = ConfigError::Invalid("interval_ms must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "invalid configuration: interval_ms must be positive"
        );
    }
}
