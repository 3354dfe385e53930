//! Task aggregate root and its status.

use super::{Category, Priority, TaskAnalysis, TaskDomainError, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Title of the onboarding sample task.
pub const SAMPLE_TASK_TITLE: &str = "Review onboarding steps";

/// Reasoning attached to the onboarding sample task.
pub const SAMPLE_TASK_REASONING: &str = "This is a sample task to guide you.";

/// Completion status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Still to do.
    Pending,
    /// Done.
    Completed,
}

impl TaskStatus {
    /// Returns the opposite status.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Pending => Self::Completed,
            Self::Completed => Self::Pending,
        }
    }

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

/// A classified task owned by one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    title: String,
    category: Category,
    priority: Priority,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    reasoning: Option<String>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted category.
    pub category: Category,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted classification reasoning, if any.
    pub reasoning: Option<String>,
}

impl Task {
    /// Creates a pending task from its title and classification.
    ///
    /// The title is kept as entered.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank.
    pub fn new(
        title: impl Into<String>,
        analysis: TaskAnalysis,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let text = title.into();
        if text.trim().is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        Ok(Self {
            id: TaskId::new(),
            title: text,
            category: analysis.category,
            priority: analysis.priority,
            status: TaskStatus::Pending,
            created_at: clock.utc(),
            reasoning: Some(analysis.reasoning),
        })
    }

    /// Creates the onboarding sample task.
    #[must_use]
    pub fn sample(clock: &impl Clock) -> Self {
        Self {
            id: TaskId::sample(),
            title: SAMPLE_TASK_TITLE.to_owned(),
            category: Category::Work,
            priority: Priority::Medium,
            status: TaskStatus::Pending,
            created_at: clock.utc(),
            reasoning: Some(SAMPLE_TASK_REASONING.to_owned()),
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            category: data.category,
            priority: data.priority,
            status: data.status,
            created_at: data.created_at,
            reasoning: data.reasoning,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the title as entered.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the category.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the completion status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the classification reasoning, if any.
    #[must_use]
    pub fn reasoning(&self) -> Option<&str> {
        self.reasoning.as_deref()
    }

    /// Returns `true` for the onboarding sample task.
    #[must_use]
    pub fn is_sample(&self) -> bool {
        self.id.is_sample()
    }

    /// Flips the status between pending and completed.
    pub const fn toggle_status(&mut self) -> TaskStatus {
        self.status = self.status.toggled();
        self.status
    }
}
