//! Identifier types for the task domain.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Reserved identifier of the onboarding sample task.
const SAMPLE_TASK_ID: &str = "sample-task-1";

/// Unique identifier for a task within one user's collection.
///
/// Regular tasks carry a random UUID. The reserved sample identifier marks
/// the onboarding task, which is never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Creates a new random task identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the reserved onboarding sample identifier.
    #[must_use]
    pub fn sample() -> Self {
        Self(SAMPLE_TASK_ID.to_owned())
    }

    /// Parses a task identifier received from the UI or storage.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskId`] for a blank value.
    pub fn parse(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTaskId);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns `true` for the reserved onboarding sample identifier.
    #[must_use]
    pub fn is_sample(&self) -> bool {
        self.0 == SAMPLE_TASK_ID
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<str> for TaskId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
