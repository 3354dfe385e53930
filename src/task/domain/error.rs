//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task identifier is empty after trimming.
    #[error("task identifier must not be empty")]
    EmptyTaskId,

    /// A stored creation timestamp is not RFC 3339.
    #[error("invalid task timestamp '{value}': {reason}")]
    InvalidTimestamp {
        /// Raw stored value.
        value: String,
        /// Parser failure description.
        reason: String,
    },
}
