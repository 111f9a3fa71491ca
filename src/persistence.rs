// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Crash-recovery snapshot of the light state.
//!
//! The fixture cannot be queried, so after a restart the controller only
//! knows what it last wrote here. The snapshot is written after every
//! mutation and read once at startup.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::PersistenceError;
use crate::state::LightState;

/// Storage for the state snapshot.
pub trait StateStore: Send + Sync {
    /// Loads the last saved state, or `None` if nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if a snapshot exists but cannot be read.
    fn load(&self) -> Result<Option<LightState>, PersistenceError>;

    /// Saves the state, replacing any previous snapshot.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if the snapshot cannot be written.
    fn save(&self, state: &LightState) -> Result<(), PersistenceError>;
}

impl<S: StateStore + ?Sized> StateStore for Arc<S> {
    fn load(&self) -> Result<Option<LightState>, PersistenceError> {
        (**self).load()
    }

    fn save(&self, state: &LightState) -> Result<(), PersistenceError> {
        (**self).save(state)
    }
}

/// Keeps the snapshot in memory only.
///
/// For hosts that do not persist state, and for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<Option<LightState>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds a snapshot.
    #[must_use]
    pub fn with_state(state: LightState) -> Self {
        Self {
            state: Mutex::new(Some(state)),
        }
    }

    /// Returns the last saved snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Option<LightState> {
        self.state.lock().clone()
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<Option<LightState>, PersistenceError> {
        Ok(self.snapshot())
    }

    fn save(&self, state: &LightState) -> Result<(), PersistenceError> {
        *self.state.lock() = Some(state.clone());
        Ok(())
    }
}

/// Stores the snapshot as a JSON file.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// crash mid-write leaves the previous snapshot intact.
///
/// # Examples
///
/// ```no_run
/// use remolight::persistence::{JsonFileStore, StateStore};
/// use remolight::state::LightState;
///
/// # fn example() -> Result<(), remolight::error::PersistenceError> {
/// let store = JsonFileStore::new("/var/lib/remolight/state.json");
/// store.save(&LightState::new())?;
/// assert!(store.load()?.is_some());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the snapshot file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> Result<Option<LightState>, PersistenceError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No state snapshot found");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let state = serde_json::from_str(&contents)?;
        tracing::debug!(path = %self.path.display(), "Loaded state snapshot");
        Ok(Some(state))
    }

    fn save(&self, state: &LightState) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(state)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;

        tracing::trace!(path = %self.path.display(), "Saved state snapshot");
        Ok(())
    }
}
