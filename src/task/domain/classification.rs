//! Category and priority enumerations and the analysis result.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Fixed set of task categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Job-related work.
    Work,
    /// Personal errands and appointments.
    Personal,
    /// Time-critical items.
    Urgent,
    /// Recurring chores.
    Routine,
    /// Design, writing, and ideation.
    Creative,
}

impl Category {
    /// Every category in display order.
    pub const ALL: [Self; 5] = [
        Self::Work,
        Self::Personal,
        Self::Urgent,
        Self::Routine,
        Self::Creative,
    ];

    /// Returns the canonical display and storage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::Personal => "Personal",
            Self::Urgent => "Urgent",
            Self::Routine => "Routine",
            Self::Creative => "Creative",
        }
    }
}

impl TryFrom<&str> for Category {
    type Error = ParseCategoryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| ParseCategoryError(value.to_owned()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed set of task priorities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// Do first.
    High,
    /// Default urgency.
    Medium,
    /// Can wait.
    Low,
}

impl Priority {
    /// Every priority from highest to lowest.
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    /// Returns the canonical display and storage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str() == value)
            .ok_or_else(|| ParsePriorityError(value.to_owned()))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for a category outside the fixed set.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct ParseCategoryError(pub String);

/// Error returned for a priority outside the fixed set.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown priority: {0}")]
pub struct ParsePriorityError(pub String);

/// Classification of a task's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskAnalysis {
    /// Chosen category.
    pub category: Category,
    /// Chosen priority.
    pub priority: Priority,
    /// Short explanation of the choice.
    pub reasoning: String,
}

impl TaskAnalysis {
    /// Creates an analysis result.
    #[must_use]
    pub fn new(category: Category, priority: Priority, reasoning: impl Into<String>) -> Self {
        Self {
            category,
            priority,
            reasoning: reasoning.into(),
        }
    }
}
