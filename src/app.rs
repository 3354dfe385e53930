//! UI-facing facade: one entry point per user interaction.
//!
//! [`TaskFlowApp`] wires the session, task store, and onboarding controller
//! over one storage backend and maps each [`AppEvent`] to a single
//! component operation. Every session change reloads the board, so the
//! previous user's tasks never stay visible.

use mockable::Clock;
use std::sync::{Arc, RwLock};
use thiserror::Error;

use crate::account::{
    domain::User,
    services::{SessionConfig, SessionError, SessionManager},
};
use crate::onboarding::{OnboardingController, OnboardingError, OnboardingState};
use crate::storage::KeyValueStore;
use crate::task::{
    domain::{CategoryFilter, Task, TaskBoardView, TaskId, TaskStatus},
    ports::LanguageModel,
    services::{ClassifierConfig, TaskClassifier, TaskStore, TaskStoreError},
};

/// Configuration for a [`TaskFlowApp`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Session behaviour.
    pub session: SessionConfig,
    /// Classification collaborator settings.
    pub classifier: ClassifierConfig,
}

impl AppConfig {
    /// Creates a configuration without simulated authentication latency.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            session: SessionConfig::immediate(),
            ..Self::default()
        }
    }
}

/// User interaction consumed by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Submit a new task text.
    AddTask(String),
    /// Delete a task.
    DeleteTask(TaskId),
    /// Toggle a task between pending and completed.
    ToggleTask(TaskId),
    /// Change the visible category.
    FilterChange(CategoryFilter),
    /// Sign in.
    Login {
        /// Account email.
        email: String,
        /// Account secret.
        secret: String,
    },
    /// Create an account and sign in.
    Register {
        /// Account email.
        email: String,
        /// Account secret.
        secret: String,
    },
    /// Sign out.
    Logout,
    /// Finish the onboarding tour.
    OnboardingComplete,
}

/// Result of handling an [`AppEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppOutcome {
    /// A task was classified and added.
    TaskAdded(Task),
    /// A delete was processed; `true` when a task was removed.
    TaskRemoved(bool),
    /// A toggle was processed; carries the new status when the task exists.
    TaskToggled(Option<TaskStatus>),
    /// The visible category changed.
    FilterChanged(CategoryFilter),
    /// A user signed in or registered.
    SignedIn(User),
    /// The session ended.
    SignedOut,
    /// The onboarding tour is complete.
    OnboardingCompleted,
}

/// Errors surfaced to the UI.
#[derive(Debug, Error)]
pub enum AppError {
    /// Session operation failed.
    #[error(transparent)]
    Session(#[from] SessionError),
    /// Task operation failed.
    #[error(transparent)]
    Tasks(#[from] TaskStoreError),
    /// Onboarding operation failed.
    #[error(transparent)]
    Onboarding(#[from] OnboardingError),
}

impl AppError {
    /// Returns a short message suitable for display.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Session(SessionError::DuplicateAccount(_)) => {
                "An account with this email already exists."
            }
            Self::Session(SessionError::InvalidCredentials) => "Invalid email or password.",
            Self::Session(SessionError::Domain(_)) => "Please enter a valid email and password.",
            Self::Tasks(TaskStoreError::ClassificationFailed(_)) => {
                "Failed to analyze task. The AI service may be unavailable."
            }
            Self::Tasks(TaskStoreError::Domain(_)) => "Please enter a task.",
            Self::Tasks(TaskStoreError::NotAuthenticated | TaskStoreError::SessionChanged) => {
                "Please sign in again."
            }
            _ => "An unexpected error occurred.",
        }
    }
}

/// Result type for application events.
pub type AppResult<T> = Result<T, AppError>;

/// Application core for one storage backend and language model.
pub struct TaskFlowApp<S, M, C>
where
    S: KeyValueStore,
    M: LanguageModel,
    C: Clock + Send + Sync,
{
    session: Arc<SessionManager<S>>,
    tasks: Arc<TaskStore<S, M, C>>,
    onboarding: OnboardingController<S, M, C>,
    filter: RwLock<CategoryFilter>,
}

impl<S, M, C> TaskFlowApp<S, M, C>
where
    S: KeyValueStore,
    M: LanguageModel,
    C: Clock + Send + Sync,
{
    /// Restores the persisted session, loads its tasks, and enters
    /// onboarding when needed.
    ///
    /// Storage failures during startup degrade to an empty board.
    #[must_use]
    pub fn bootstrap(backend: Arc<S>, model: Arc<M>, clock: Arc<C>, config: AppConfig) -> Self {
        let session = Arc::new(SessionManager::restore(
            Arc::clone(&backend),
            config.session,
        ));
        let classifier = TaskClassifier::new(model, config.classifier);
        let tasks = Arc::new(TaskStore::new(
            Arc::clone(&session),
            backend,
            classifier,
            clock,
        ));
        let onboarding = OnboardingController::new(Arc::clone(&session), Arc::clone(&tasks));
        let app = Self {
            session,
            tasks,
            onboarding,
            filter: RwLock::new(CategoryFilter::All),
        };
        if let Err(err) = app.refresh() {
            tracing::warn!(error = %err, "starting with an empty board");
        }
        app
    }

    /// Returns the session manager.
    #[must_use]
    pub const fn session(&self) -> &Arc<SessionManager<S>> {
        &self.session
    }

    /// Returns the task store.
    #[must_use]
    pub const fn tasks(&self) -> &Arc<TaskStore<S, M, C>> {
        &self.tasks
    }

    /// Returns the onboarding controller.
    #[must_use]
    pub const fn onboarding(&self) -> &OnboardingController<S, M, C> {
        &self.onboarding
    }

    /// Returns the signed-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.session.current_user()
    }

    /// Returns the active category filter.
    #[must_use]
    pub fn filter(&self) -> CategoryFilter {
        self.filter.read().map(|filter| *filter).unwrap_or_default()
    }

    /// Returns the board under the active filter.
    #[must_use]
    pub fn view(&self) -> TaskBoardView {
        self.tasks.view(self.filter())
    }

    /// Returns the onboarding state of the signed-in user.
    #[must_use]
    pub fn onboarding_state(&self) -> Option<OnboardingState> {
        self.onboarding.state()
    }

    /// Produces the productivity insight for the current board.
    pub async fn insight(&self) -> String {
        self.tasks.insight().await
    }

    /// Handles one user interaction.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] when the underlying operation fails; the board is
    /// left consistent in every case.
    pub async fn dispatch(&self, event: AppEvent) -> AppResult<AppOutcome> {
        match event {
            AppEvent::AddTask(text) => Ok(AppOutcome::TaskAdded(self.tasks.add(&text).await?)),
            AppEvent::DeleteTask(task_id) => {
                Ok(AppOutcome::TaskRemoved(self.tasks.remove(&task_id)?))
            }
            AppEvent::ToggleTask(task_id) => {
                Ok(AppOutcome::TaskToggled(self.tasks.toggle_status(&task_id)?))
            }
            AppEvent::FilterChange(filter) => {
                if let Ok(mut active) = self.filter.write() {
                    *active = filter;
                }
                Ok(AppOutcome::FilterChanged(filter))
            }
            AppEvent::Login { email, secret } => {
                let user = self.session.login(&email, &secret).await?;
                self.refresh_after_sign_in();
                Ok(AppOutcome::SignedIn(user))
            }
            AppEvent::Register { email, secret } => {
                let user = self.session.register(&email, &secret).await?;
                self.refresh_after_sign_in();
                Ok(AppOutcome::SignedIn(user))
            }
            AppEvent::Logout => {
                self.session.logout();
                self.onboarding.reset();
                if let Err(err) = self.tasks.load() {
                    tracing::warn!(error = %err, "failed to clear board after sign-out");
                }
                Ok(AppOutcome::SignedOut)
            }
            AppEvent::OnboardingComplete => {
                self.onboarding.complete()?;
                Ok(AppOutcome::OnboardingCompleted)
            }
        }
    }

    fn refresh(&self) -> AppResult<()> {
        let loaded = self.tasks.load();
        self.onboarding.enter()?;
        loaded?;
        Ok(())
    }

    fn refresh_after_sign_in(&self) {
        if let Err(err) = self.refresh() {
            tracing::warn!(error = %err, "signed in with an empty board");
        }
    }
}
