//! Error types for account domain validation.

use thiserror::Error;

/// Errors returned while constructing account values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountDomainError {
    /// The email is empty after trimming.
    #[error("email must not be empty")]
    EmptyEmail,

    /// The email does not have a `local@domain` shape.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// The secret is empty.
    #[error("password must not be empty")]
    EmptySecret,

    /// The credential hasher failed.
    #[error("failed to hash credential: {0}")]
    Hashing(String),
}
