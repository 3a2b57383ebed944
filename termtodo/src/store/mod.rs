//! Key-value storage port for the persistence slot.
//!
//! The controller never touches the filesystem directly. It reads and writes
//! whole string values under a fixed key through [`KeyValueStore`], which
//! is injected at construction so tests can swap in [`InMemoryStore`].

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::InMemoryStore;

use std::sync::Arc;

/// Errors that can occur during key-value store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The key cannot be used by this store (empty, or names a path).
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Reading the value failed.
    #[error("failed to read key {key:?}: {source}")]
    Read {
        /// Key that was being read.
        key: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Writing the value failed.
    #[error("failed to write key {key:?}: {source}")]
    Write {
        /// Key that was being written.
        key: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// A process-local string store addressed by key.
///
/// Implementations include:
/// - [`InMemoryStore`]: `HashMap`-backed, for tests
/// - [`FileStore`]: one JSON file per key under a data directory
pub trait KeyValueStore {
    /// Returns the value stored under `key`, or `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the key is invalid or the read fails.
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the key is invalid or the write fails.
    fn save(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).save(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).save(key, value)
    }
}
