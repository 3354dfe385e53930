//! Key/value storage port.

use crate::storage::StorageKey;
use std::sync::Arc;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Durable string storage addressed by [`StorageKey`].
///
/// Operations are synchronous: a write either lands or fails before the
/// caller continues, so services can persist and commit in-memory state
/// without yielding in between.
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// Returns `None` when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] when the backing store cannot be
    /// read.
    fn get(&self, key: &StorageKey) -> StorageResult<Option<String>>;

    /// Replaces the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] when the backing store rejects
    /// the write.
    fn set(&self, key: &StorageKey, value: &str) -> StorageResult<()>;

    /// Removes the value stored under `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] when the backing store rejects
    /// the removal.
    fn remove(&self, key: &StorageKey) -> StorageResult<()>;
}

/// Errors returned by storage adapters and typed accessors.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// The backing store could not be read or written.
    #[error("storage unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),

    /// A stored value could not be decoded.
    #[error("corrupt record under '{key}': {reason}")]
    Corrupt {
        /// Physical key of the unreadable record.
        key: String,
        /// Decoder failure description.
        reason: String,
    },

    /// A value could not be encoded for storage.
    #[error("failed to encode record for '{key}': {reason}")]
    Encode {
        /// Physical key of the rejected record.
        key: String,
        /// Encoder failure description.
        reason: String,
    },
}

impl StorageError {
    /// Wraps a backend failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
