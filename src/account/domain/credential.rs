//! Salted credential hashes.

use super::AccountDomainError;
use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Argon2id hash of a user secret in PHC string format.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialHash(String);

impl CredentialHash {
    /// Hashes `secret` with a freshly generated salt.
    ///
    /// # Errors
    ///
    /// Returns [`AccountDomainError::EmptySecret`] for an empty secret and
    /// [`AccountDomainError::Hashing`] when the hasher fails.
    pub fn derive(secret: &str) -> Result<Self, AccountDomainError> {
        if secret.is_empty() {
            return Err(AccountDomainError::EmptySecret);
        }
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|err| AccountDomainError::Hashing(err.to_string()))?;
        Ok(Self(hash.to_string()))
    }

    /// Returns `true` when `secret` hashes to this value.
    ///
    /// A stored value that is not a valid PHC string never verifies.
    #[must_use]
    pub fn verify(&self, secret: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.0) else {
            tracing::warn!("stored credential is not a valid password hash");
            return false;
        };
        Argon2::default()
            .verify_password(secret.as_bytes(), &parsed)
            .is_ok()
    }

    /// Returns the PHC string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CredentialHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CredentialHash(<redacted>)")
    }
}
