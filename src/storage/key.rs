//! Logical storage partitions.

use crate::account::domain::UserId;
use std::fmt;

const USER_DIRECTORY_KEY: &str = "taskflow_users";
const SESSION_POINTER_KEY: &str = "taskflow_session_userId";
const TASKS_KEY_PREFIX: &str = "tasks_";

/// Named partition in the key/value store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// Global list of registered users.
    UserDirectory,
    /// Identifier of the user whose session is active.
    SessionPointer,
    /// Task collection owned by a single user.
    Tasks(UserId),
}

impl StorageKey {
    /// Returns the physical key used by storage adapters.
    #[must_use]
    pub fn as_key(&self) -> String {
        match self {
            Self::UserDirectory => USER_DIRECTORY_KEY.to_owned(),
            Self::SessionPointer => SESSION_POINTER_KEY.to_owned(),
            Self::Tasks(user_id) => format!("{TASKS_KEY_PREFIX}{user_id}"),
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_key())
    }
}
