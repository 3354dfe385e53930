//! Per-user task partitions in key/value storage.
//!
//! Each user's tasks live under [`StorageKey::Tasks`] as a JSON list of
//! [`TaskRecord`]s. Timestamps are stored as RFC 3339 strings and parsed in
//! an explicit step after the generic JSON decode.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::account::domain::UserId;
use crate::storage::{JsonStore, KeyValueStore, StorageError, StorageKey, StorageResult};
use crate::task::domain::{
    Category, PersistedTaskData, Priority, Task, TaskDomainError, TaskId, TaskStatus,
};

/// Stored form of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    /// Task identifier.
    pub id: TaskId,
    /// Title as entered.
    pub title: String,
    /// Category name.
    pub category: Category,
    /// Priority name.
    pub priority: Priority,
    /// Status name.
    pub status: TaskStatus,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
    /// Classification reasoning.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

impl TaskRecord {
    /// Builds the stored form of `task`.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id().clone(),
            title: task.title().to_owned(),
            category: task.category(),
            priority: task.priority(),
            status: task.status(),
            created_at: task
                .created_at()
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            reasoning: task.reasoning().map(str::to_owned),
        }
    }

    /// Converts the record into a domain task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTimestamp`] when `created_at` is not
    /// RFC 3339.
    pub fn into_task(self) -> Result<Task, TaskDomainError> {
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|err| TaskDomainError::InvalidTimestamp {
                value: self.created_at.clone(),
                reason: err.to_string(),
            })?
            .with_timezone(&Utc);
        Ok(Task::from_persisted(PersistedTaskData {
            id: self.id,
            title: self.title,
            category: self.category,
            priority: self.priority,
            status: self.status,
            created_at,
            reasoning: self.reasoning,
        }))
    }
}

/// Reads and writes one user's task collection.
#[derive(Debug)]
pub struct TaskPartition<S: KeyValueStore> {
    store: JsonStore<S>,
}

impl<S: KeyValueStore> Clone for TaskPartition<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S: KeyValueStore> TaskPartition<S> {
    /// Creates a partition accessor over the given store.
    #[must_use]
    pub const fn new(store: JsonStore<S>) -> Self {
        Self { store }
    }

    /// Loads `owner`'s tasks in stored order.
    ///
    /// Returns an empty list when nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] when the store fails and
    /// [`StorageError::Corrupt`] when the blob or a timestamp cannot be
    /// decoded.
    pub fn load(&self, owner: UserId) -> StorageResult<Vec<Task>> {
        let key = StorageKey::Tasks(owner);
        let records = self
            .store
            .read::<Vec<TaskRecord>>(&key)?
            .unwrap_or_default();
        records
            .into_iter()
            .map(|record| {
                record.into_task().map_err(|err| StorageError::Corrupt {
                    key: key.as_key(),
                    reason: err.to_string(),
                })
            })
            .collect()
    }

    /// Replaces `owner`'s stored tasks with `tasks`.
    ///
    /// The onboarding sample task is always left out of the write.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when encoding or the write fails.
    pub fn save(&self, owner: UserId, tasks: &[Task]) -> StorageResult<()> {
        let records: Vec<TaskRecord> = tasks
            .iter()
            .filter(|task| !task.is_sample())
            .map(TaskRecord::from_task)
            .collect();
        self.store.write(&StorageKey::Tasks(owner), &records)
    }
}
