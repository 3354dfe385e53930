//! Domain model for the task board.
//!
//! Tasks are created from free text plus a classification, toggled between
//! pending and completed, and projected through category filters. All
//! infrastructure concerns stay outside of the domain boundary.

mod classification;
mod error;
mod filter;
mod ids;
mod task;

pub use classification::{
    Category, ParseCategoryError, ParsePriorityError, Priority, TaskAnalysis,
};
pub use error::TaskDomainError;
pub use filter::{CategoryFilter, TaskBoardView};
pub use ids::TaskId;
pub use task::{PersistedTaskData, SAMPLE_TASK_REASONING, SAMPLE_TASK_TITLE, Task, TaskStatus};
