//! Storage-backed user directory.
//!
//! The directory is a single JSON list under
//! [`StorageKey::UserDirectory`]. Every write replaces the whole list.

use crate::account::domain::{Email, User, UserId, UserRecord};
use crate::storage::{JsonStore, KeyValueStore, StorageError, StorageKey};
use thiserror::Error;

/// Result type for user directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Errors returned by the user directory.
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    /// Another user already holds this email, ignoring case.
    #[error("an account already exists for {0}")]
    DuplicateEmail(Email),

    /// The backing store failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Mapping from email to user, persisted as one record.
#[derive(Debug)]
pub struct UserDirectory<S: KeyValueStore> {
    store: JsonStore<S>,
}

impl<S: KeyValueStore> Clone for UserDirectory<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S: KeyValueStore> UserDirectory<S> {
    /// Creates a directory over the given store.
    #[must_use]
    pub const fn new(store: JsonStore<S>) -> Self {
        Self { store }
    }

    /// Returns every stored record, oldest registration first.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Storage`] when the directory cannot be read
    /// or decoded.
    pub fn records(&self) -> DirectoryResult<Vec<UserRecord>> {
        Ok(self
            .store
            .read::<Vec<UserRecord>>(&StorageKey::UserDirectory)?
            .unwrap_or_default())
    }

    /// Finds a user by email, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Storage`] when the directory cannot be read.
    pub fn find_by_email(&self, email: &Email) -> DirectoryResult<Option<User>> {
        Ok(self
            .records()?
            .into_iter()
            .find(|record| record.email.matches(email))
            .map(User::from_record))
    }

    /// Finds a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Storage`] when the directory cannot be read.
    pub fn find_by_id(&self, id: UserId) -> DirectoryResult<Option<User>> {
        Ok(self
            .records()?
            .into_iter()
            .find(|record| record.id == id)
            .map(User::from_record))
    }

    /// Appends a new user.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::DuplicateEmail`] when the email is taken and
    /// [`DirectoryError::Storage`] when the directory cannot be read or
    /// written.
    pub fn insert(&self, user: &User) -> DirectoryResult<()> {
        let mut records = self.records()?;
        if records.iter().any(|record| record.email.matches(user.email())) {
            return Err(DirectoryError::DuplicateEmail(user.email().clone()));
        }
        records.push(user.to_record());
        self.store.write(&StorageKey::UserDirectory, &records)?;
        Ok(())
    }

    /// Replaces the stored record for `user`.
    ///
    /// Returns `false` without writing when no record has the user's id.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Storage`] when the directory cannot be read
    /// or written.
    pub fn replace(&self, user: &User) -> DirectoryResult<bool> {
        let mut records = self.records()?;
        let Some(slot) = records.iter_mut().find(|record| record.id == user.id()) else {
            return Ok(false);
        };
        *slot = user.to_record();
        self.store.write(&StorageKey::UserDirectory, &records)?;
        Ok(true)
    }
}
