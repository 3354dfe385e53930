//! In-memory key/value store for tests and ephemeral sessions.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::storage::{KeyValueStore, StorageError, StorageKey, StorageResult};

/// Thread-safe in-memory key/value store.
///
/// Clones share the same entries, so a clone handed to a second service
/// observes every write made through the first.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryKeyValueStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored keys.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] when the entry lock is poisoned.
    pub fn len(&self) -> StorageResult<usize> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.len())
    }

    /// Returns `true` when no keys are stored.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] when the entry lock is poisoned.
    pub fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.len()? == 0)
    }
}

fn poisoned<E: std::fmt::Display>(err: E) -> StorageError {
    StorageError::unavailable(std::io::Error::other(err.to_string()))
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &StorageKey) -> StorageResult<Option<String>> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.get(&key.as_key()).cloned())
    }

    fn set(&self, key: &StorageKey, value: &str) -> StorageResult<()> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.insert(key.as_key(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &StorageKey) -> StorageResult<()> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.remove(&key.as_key());
        Ok(())
    }
}
