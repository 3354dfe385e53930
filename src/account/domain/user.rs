//! User aggregate and its persisted record.

use super::{CredentialHash, Email, UserId};
use serde::{Deserialize, Serialize};

/// Registered user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    email: Email,
    credential: CredentialHash,
    has_onboarded: bool,
}

impl User {
    /// Creates a newly registered user who has not seen the onboarding tour.
    #[must_use]
    pub fn register(email: Email, credential: CredentialHash) -> Self {
        Self {
            id: UserId::new(),
            email,
            credential,
            has_onboarded: false,
        }
    }

    /// Reconstructs a user from its stored record.
    ///
    /// Records written before onboarding existed carry no flag; those users
    /// are treated as already onboarded.
    #[must_use]
    pub fn from_record(record: UserRecord) -> Self {
        Self {
            id: record.id,
            email: record.email,
            credential: record.credential,
            has_onboarded: record.has_onboarded.unwrap_or(true),
        }
    }

    /// Converts the user into its stored record.
    #[must_use]
    pub fn to_record(&self) -> UserRecord {
        UserRecord {
            id: self.id,
            email: self.email.clone(),
            credential: self.credential.clone(),
            has_onboarded: Some(self.has_onboarded),
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the email as registered.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Returns the stored credential hash.
    #[must_use]
    pub const fn credential(&self) -> &CredentialHash {
        &self.credential
    }

    /// Returns whether the onboarding tour has been completed.
    #[must_use]
    pub const fn has_onboarded(&self) -> bool {
        self.has_onboarded
    }

    /// Applies a partial update and returns the merged user.
    #[must_use]
    pub fn merged(&self, update: &UserUpdate) -> Self {
        Self {
            has_onboarded: update.has_onboarded.unwrap_or(self.has_onboarded),
            ..self.clone()
        }
    }
}

/// Persisted form of a [`User`] inside the user directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Stored user identifier.
    pub id: UserId,
    /// Stored email.
    pub email: Email,
    /// Stored credential hash.
    pub credential: CredentialHash,
    /// Stored onboarding flag; absent on records that predate onboarding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_onboarded: Option<bool>,
}

/// Partial set of user fields to merge into the active user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdate {
    has_onboarded: Option<bool>,
}

impl UserUpdate {
    /// Creates an empty update.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            has_onboarded: None,
        }
    }

    /// Sets the onboarding flag.
    #[must_use]
    pub const fn with_has_onboarded(mut self, value: bool) -> Self {
        self.has_onboarded = Some(value);
        self
    }

    /// Returns `true` when no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.has_onboarded.is_none()
    }
}
