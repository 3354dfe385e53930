//! Task store: the active user's task collection and its persistence.

use mockable::Clock;
use std::sync::{Arc, RwLock};
use thiserror::Error;

use crate::account::{domain::UserId, services::SessionManager};
use crate::storage::{JsonStore, KeyValueStore, StorageError};
use crate::task::{
    adapters::TaskPartition,
    domain::{CategoryFilter, Task, TaskBoardView, TaskDomainError, TaskId, TaskStatus},
    ports::LanguageModel,
    services::{ClassificationError, TaskClassifier},
};

/// Insight shown when nobody is signed in.
pub const LOGGED_OUT_INSIGHT: &str = "Log in to get your daily insight.";

/// Insight shown when the active user has no pending tasks.
pub const NO_PENDING_INSIGHT: &str = "Add a task to get your first insight!";

/// Service-level errors for task store operations.
#[derive(Debug, Error)]
pub enum TaskStoreError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The classification collaborator failed; nothing was added.
    #[error("task classification failed: {0}")]
    ClassificationFailed(#[from] ClassificationError),

    /// The backing store failed; in-memory state is unchanged.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The operation needs a signed-in user.
    #[error("no user is signed in")]
    NotAuthenticated,

    /// The active user changed while the operation was in flight.
    #[error("the active user changed before the task could be saved")]
    SessionChanged,

    /// The board lock was poisoned.
    #[error("task board state is unavailable")]
    StatePoisoned,
}

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

#[derive(Debug, Default)]
struct TaskBoard {
    owner: Option<UserId>,
    tasks: Vec<Task>,
}

/// Ordered, most-recent-first task collection of the signed-in user.
///
/// Every mutation reads the freshest in-memory collection, persists the
/// result, and only then commits it, so concurrent operations never lose
/// each other's updates and a failed write leaves memory untouched.
pub struct TaskStore<S, M, C>
where
    S: KeyValueStore,
    M: LanguageModel,
    C: Clock + Send + Sync,
{
    session: Arc<SessionManager<S>>,
    partition: TaskPartition<S>,
    classifier: TaskClassifier<M>,
    clock: Arc<C>,
    board: RwLock<TaskBoard>,
}

impl<S, M, C> TaskStore<S, M, C>
where
    S: KeyValueStore,
    M: LanguageModel,
    C: Clock + Send + Sync,
{
    /// Creates an empty store; call [`TaskStore::load`] to read the active
    /// user's tasks.
    #[must_use]
    pub fn new(
        session: Arc<SessionManager<S>>,
        backend: Arc<S>,
        classifier: TaskClassifier<M>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            session,
            partition: TaskPartition::new(JsonStore::new(backend)),
            classifier,
            clock,
            board: RwLock::new(TaskBoard::default()),
        }
    }

    /// Returns the classifier used for new tasks and insights.
    #[must_use]
    pub const fn classifier(&self) -> &TaskClassifier<M> {
        &self.classifier
    }

    /// Replaces the in-memory collection with the active user's stored tasks.
    ///
    /// With nobody signed in the collection becomes empty.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Storage`] when the partition cannot be read;
    /// the collection is then left empty for the active user.
    pub fn load(&self) -> TaskStoreResult<Vec<Task>> {
        let owner = self.session.current_user().map(|user| user.id());
        let loaded = match owner {
            Some(user_id) => self.partition.load(user_id),
            None => Ok(Vec::new()),
        };
        let mut board = self.board.write().map_err(|_| TaskStoreError::StatePoisoned)?;
        board.owner = owner;
        match loaded {
            Ok(tasks) => {
                tracing::debug!(owner = ?owner, count = tasks.len(), "loaded tasks");
                board.tasks.clone_from(&tasks);
                Ok(tasks)
            }
            Err(err) => {
                tracing::warn!(owner = ?owner, error = %err, "failed to load tasks");
                board.tasks.clear();
                Err(err.into())
            }
        }
    }

    /// Returns the user whose tasks are loaded.
    #[must_use]
    pub fn owner(&self) -> Option<UserId> {
        self.board.read().ok().and_then(|board| board.owner)
    }

    /// Returns a snapshot of the full collection.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.board
            .read()
            .map(|board| board.tasks.clone())
            .unwrap_or_default()
    }

    /// Classifies `title` and prepends the new pending task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Domain`] for a blank title,
    /// [`TaskStoreError::NotAuthenticated`] with nobody signed in,
    /// [`TaskStoreError::ClassificationFailed`] when the collaborator fails,
    /// [`TaskStoreError::SessionChanged`] when another user signed in while
    /// classification was pending, and [`TaskStoreError::Storage`] when the
    /// write fails. The collection is unchanged on every error.
    pub async fn add(&self, title: &str) -> TaskStoreResult<Task> {
        if title.trim().is_empty() {
            return Err(TaskDomainError::EmptyTitle.into());
        }
        let owner = self.owner().ok_or(TaskStoreError::NotAuthenticated)?;

        let analysis = self.classifier.analyze(title).await?;
        let task = Task::new(title, analysis, &*self.clock)?;

        self.commit(owner, |tasks| tasks.insert(0, task.clone()))?;
        tracing::debug!(
            task_id = %task.id(),
            category = %task.category(),
            priority = %task.priority(),
            "added task"
        );
        Ok(task)
    }

    /// Removes the task with `task_id`.
    ///
    /// Returns `false` when no such task exists. Does nothing with nobody
    /// signed in.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Storage`] when the write fails.
    pub fn remove(&self, task_id: &TaskId) -> TaskStoreResult<bool> {
        let Some(owner) = self.owner() else {
            return Ok(false);
        };
        let removed = self.commit(owner, |tasks| {
            let before = tasks.len();
            tasks.retain(|task| task.id() != task_id);
            tasks.len() != before
        })?;
        tracing::debug!(task_id = %task_id, removed, "removed task");
        Ok(removed)
    }

    /// Flips the status of the task with `task_id`.
    ///
    /// Returns the new status, or `None` when no such task exists.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Storage`] when the write fails.
    pub fn toggle_status(&self, task_id: &TaskId) -> TaskStoreResult<Option<TaskStatus>> {
        let Some(owner) = self.owner() else {
            return Ok(None);
        };
        let status = self.commit(owner, |tasks| {
            tasks
                .iter_mut()
                .find(|task| task.id() == task_id)
                .map(Task::toggle_status)
        })?;
        tracing::debug!(task_id = %task_id, status = ?status, "toggled task status");
        Ok(status)
    }

    /// Returns the tasks passing `filter`, in collection order.
    #[must_use]
    pub fn filter(&self, filter: CategoryFilter) -> Vec<Task> {
        self.board
            .read()
            .map(|board| filter.apply(&board.tasks))
            .unwrap_or_default()
    }

    /// Returns the filtered tasks split into pending and completed.
    #[must_use]
    pub fn view(&self, filter: CategoryFilter) -> TaskBoardView {
        self.board
            .read()
            .map(|board| TaskBoardView::project(&board.tasks, filter))
            .unwrap_or_default()
    }

    /// Returns the filtered pending tasks.
    #[must_use]
    pub fn pending(&self, filter: CategoryFilter) -> Vec<Task> {
        self.view(filter).pending
    }

    /// Returns the filtered completed tasks.
    #[must_use]
    pub fn completed(&self, filter: CategoryFilter) -> Vec<Task> {
        self.view(filter).completed
    }

    /// Produces a productivity insight for the pending tasks.
    pub async fn insight(&self) -> String {
        if self.owner().is_none() {
            return LOGGED_OUT_INSIGHT.to_owned();
        }
        let pending = self.pending(CategoryFilter::All);
        if pending.is_empty() {
            return NO_PENDING_INSIGHT.to_owned();
        }
        self.classifier.summarize(&pending).await
    }

    /// Adds the onboarding sample task when the collection is empty.
    ///
    /// The sample lives in memory only. Returns `true` when it was added.
    pub fn inject_sample(&self) -> bool {
        let Ok(mut board) = self.board.write() else {
            return false;
        };
        if board.owner.is_none() || !board.tasks.is_empty() {
            return false;
        }
        board.tasks.push(Task::sample(&*self.clock));
        true
    }

    /// Drops the onboarding sample task from memory.
    ///
    /// Returns `true` when a sample was present.
    pub fn discard_sample(&self) -> bool {
        let Ok(mut board) = self.board.write() else {
            return false;
        };
        let before = board.tasks.len();
        board.tasks.retain(|task| !task.is_sample());
        board.tasks.len() != before
    }

    fn commit<T>(
        &self,
        owner: UserId,
        mutate: impl FnOnce(&mut Vec<Task>) -> T,
    ) -> TaskStoreResult<T> {
        let mut board = self.board.write().map_err(|_| TaskStoreError::StatePoisoned)?;
        if board.owner != Some(owner) {
            return Err(TaskStoreError::SessionChanged);
        }
        let mut next = board.tasks.clone();
        let outcome = mutate(&mut next);
        self.partition.save(owner, &next)?;
        board.tasks = next;
        Ok(outcome)
    }
}
