//! Onboarding state machine.

use mockable::Clock;
use std::sync::{Arc, RwLock};
use thiserror::Error;

use crate::account::{
    domain::{UserId, UserUpdate},
    services::{SessionError, SessionManager},
};
use crate::storage::KeyValueStore;
use crate::task::{ports::LanguageModel, services::TaskStore};

/// Onboarding progress of the signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OnboardingState {
    /// The tour has not been seen yet.
    Pending,
    /// The tour is done; terminal for the account.
    Completed,
}

/// Errors returned by onboarding operations.
#[derive(Debug, Error)]
pub enum OnboardingError {
    /// Persisting the onboarding flag failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The controller lock was poisoned.
    #[error("onboarding state is unavailable")]
    StatePoisoned,
}

/// Result type for onboarding operations.
pub type OnboardingResult<T> = Result<T, OnboardingError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Progress {
    user_id: UserId,
    state: OnboardingState,
}

/// Drives the onboarding tour for whichever user is signed in.
pub struct OnboardingController<S, M, C>
where
    S: KeyValueStore,
    M: LanguageModel,
    C: Clock + Send + Sync,
{
    session: Arc<SessionManager<S>>,
    tasks: Arc<TaskStore<S, M, C>>,
    progress: RwLock<Option<Progress>>,
}

impl<S, M, C> OnboardingController<S, M, C>
where
    S: KeyValueStore,
    M: LanguageModel,
    C: Clock + Send + Sync,
{
    /// Creates a controller with no active tour.
    #[must_use]
    pub const fn new(session: Arc<SessionManager<S>>, tasks: Arc<TaskStore<S, M, C>>) -> Self {
        Self {
            session,
            tasks,
            progress: RwLock::new(None),
        }
    }

    /// Evaluates the signed-in user after their tasks have been loaded.
    ///
    /// Returns `None` with nobody signed in. A user who has not onboarded
    /// enters [`OnboardingState::Pending`] and, with an empty board, gets
    /// the sample task.
    ///
    /// # Errors
    ///
    /// Returns [`OnboardingError::StatePoisoned`] when the controller lock is
    /// poisoned.
    pub fn enter(&self) -> OnboardingResult<Option<OnboardingState>> {
        let mut progress = self
            .progress
            .write()
            .map_err(|_| OnboardingError::StatePoisoned)?;
        let Some(user) = self.session.current_user() else {
            *progress = None;
            return Ok(None);
        };

        let state = if user.has_onboarded() {
            OnboardingState::Completed
        } else {
            OnboardingState::Pending
        };
        *progress = Some(Progress {
            user_id: user.id(),
            state,
        });

        if state == OnboardingState::Pending && self.tasks.inject_sample() {
            tracing::debug!(user_id = %user.id(), "injected onboarding sample task");
        }
        Ok(Some(state))
    }

    /// Returns the state of the signed-in user's tour, if any.
    #[must_use]
    pub fn state(&self) -> Option<OnboardingState> {
        let current = self.session.current_user()?;
        self.progress
            .read()
            .ok()
            .and_then(|progress| *progress)
            .filter(|progress| progress.user_id == current.id())
            .map(|progress| progress.state)
    }

    /// Finishes the tour for the signed-in user.
    ///
    /// Sets `has_onboarded`, removes the sample task, and moves to
    /// [`OnboardingState::Completed`]. Calling it again has no effect.
    ///
    /// # Errors
    ///
    /// Returns [`OnboardingError::Session`] when the flag cannot be
    /// persisted; the tour then stays pending.
    pub fn complete(&self) -> OnboardingResult<()> {
        let mut progress = self
            .progress
            .write()
            .map_err(|_| OnboardingError::StatePoisoned)?;
        let Some(user) = self.session.current_user() else {
            self.tasks.discard_sample();
            return Ok(());
        };
        let already_completed = progress.is_some_and(|current| {
            current.user_id == user.id() && current.state == OnboardingState::Completed
        });
        if already_completed {
            return Ok(());
        }

        if !user.has_onboarded() {
            self.session
                .update_current_user(&UserUpdate::new().with_has_onboarded(true))?;
            tracing::info!(user_id = %user.id(), "completed onboarding");
        }
        self.tasks.discard_sample();
        *progress = Some(Progress {
            user_id: user.id(),
            state: OnboardingState::Completed,
        });
        Ok(())
    }

    /// Forgets any tour state, for use after sign-out.
    pub fn reset(&self) {
        if let Ok(mut progress) = self.progress.write() {
            *progress = None;
        }
    }
}
