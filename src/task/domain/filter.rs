//! Category filters and the derived board view.

use super::{Category, ParseCategoryError, Task, TaskStatus};
use std::fmt;

const ALL_FILTER: &str = "all";

/// Category selection applied to the task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    /// Every task.
    #[default]
    All,
    /// Only tasks of one category.
    Only(Category),
}

impl CategoryFilter {
    /// Returns `true` when `task` passes the filter.
    #[must_use]
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => task.category() == category,
        }
    }

    /// Returns the tasks passing the filter, preserving order.
    #[must_use]
    pub fn apply(self, tasks: &[Task]) -> Vec<Task> {
        tasks
            .iter()
            .filter(|task| self.matches(task))
            .cloned()
            .collect()
    }
}

impl TryFrom<&str> for CategoryFilter {
    type Error = ParseCategoryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value == ALL_FILTER {
            return Ok(Self::All);
        }
        Category::try_from(value).map(Self::Only)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_FILTER),
            Self::Only(category) => f.write_str(category.as_str()),
        }
    }
}

/// Filtered tasks partitioned by status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskBoardView {
    /// Pending tasks in collection order.
    pub pending: Vec<Task>,
    /// Completed tasks in collection order.
    pub completed: Vec<Task>,
}

impl TaskBoardView {
    /// Projects `tasks` through `filter` and splits the result by status.
    #[must_use]
    pub fn project(tasks: &[Task], filter: CategoryFilter) -> Self {
        let (pending, completed) = tasks
            .iter()
            .filter(|task| filter.matches(task))
            .cloned()
            .partition(|task| task.status() == TaskStatus::Pending);
        Self { pending, completed }
    }

    /// Returns the total number of visible tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len() + self.completed.len()
    }

    /// Returns `true` when no task is visible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.completed.is_empty()
    }
}
