//! Typed JSON access over a [`KeyValueStore`].

use crate::storage::{KeyValueStore, StorageError, StorageKey, StorageResult};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;

/// Serialises records to and from JSON blobs in a key/value store.
#[derive(Debug)]
pub struct JsonStore<S: KeyValueStore> {
    backend: Arc<S>,
}

impl<S: KeyValueStore> Clone for JsonStore<S> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<S: KeyValueStore> JsonStore<S> {
    /// Creates a typed accessor over the given backend.
    #[must_use]
    pub const fn new(backend: Arc<S>) -> Self {
        Self { backend }
    }

    /// Returns the underlying backend.
    #[must_use]
    pub const fn backend(&self) -> &Arc<S> {
        &self.backend
    }

    /// Reads and decodes the record stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] when the backend fails and
    /// [`StorageError::Corrupt`] when the stored blob does not decode as `T`.
    pub fn read<T: DeserializeOwned>(&self, key: &StorageKey) -> StorageResult<Option<T>> {
        let Some(raw) = self.backend.get(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|err| StorageError::Corrupt {
                key: key.as_key(),
                reason: err.to_string(),
            })
    }

    /// Encodes `value` and stores it under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Encode`] when encoding fails and
    /// [`StorageError::Unavailable`] when the backend rejects the write.
    pub fn write<T: Serialize + ?Sized>(&self, key: &StorageKey, value: &T) -> StorageResult<()> {
        let encoded = serde_json::to_string(value).map_err(|err| StorageError::Encode {
            key: key.as_key(),
            reason: err.to_string(),
        })?;
        self.backend.set(key, &encoded)?;
        tracing::debug!(key = %key, bytes = encoded.len(), "persisted record");
        Ok(())
    }

    /// Removes the record stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] when the backend rejects the
    /// removal.
    pub fn clear(&self, key: &StorageKey) -> StorageResult<()> {
        self.backend.remove(key)
    }
}
