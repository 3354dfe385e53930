//! Session manager: registration, login, logout, and profile updates.

use crate::account::{
    directory::{DirectoryError, UserDirectory},
    domain::{AccountDomainError, CredentialHash, Email, User, UserId, UserUpdate},
};
use crate::storage::{JsonStore, KeyValueStore, StorageError, StorageKey};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use thiserror::Error;

/// Simulated round trip of the remote account service.
const DEFAULT_AUTH_LATENCY: Duration = Duration::from_millis(500);

/// Configuration for session behaviour.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use taskflow::account::services::SessionConfig;
///
/// let config = SessionConfig::default();
/// assert_eq!(config.auth_latency, Duration::from_millis(500));
///
/// let immediate = SessionConfig::immediate();
/// assert!(immediate.auth_latency.is_zero());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Delay applied before `register` and `login` resolve.
    pub auth_latency: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            auth_latency: DEFAULT_AUTH_LATENCY,
        }
    }
}

impl SessionConfig {
    /// Creates a configuration without simulated latency.
    #[must_use]
    pub const fn immediate() -> Self {
        Self {
            auth_latency: Duration::ZERO,
        }
    }
}

/// Service-level errors for session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Registration used an email that already has an account.
    #[error("an account with this email already exists: {0}")]
    DuplicateAccount(Email),

    /// Login email or secret did not match.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] AccountDomainError),

    /// The backing store failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The session lock was poisoned.
    #[error("session state is unavailable")]
    StatePoisoned,
}

impl From<DirectoryError> for SessionError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::DuplicateEmail(email) => Self::DuplicateAccount(email),
            DirectoryError::Storage(inner) => Self::Storage(inner),
        }
    }
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Tracks the authenticated user and mirrors the session pointer to storage.
#[derive(Debug)]
pub struct SessionManager<S: KeyValueStore> {
    directory: UserDirectory<S>,
    store: JsonStore<S>,
    config: SessionConfig,
    current: RwLock<Option<User>>,
}

impl<S: KeyValueStore> SessionManager<S> {
    /// Creates a manager and restores any persisted session.
    ///
    /// A missing, unreadable, or dangling session pointer leaves the manager
    /// unauthenticated; restore never fails.
    #[must_use]
    pub fn restore(backend: Arc<S>, config: SessionConfig) -> Self {
        let store = JsonStore::new(backend);
        let directory = UserDirectory::new(store.clone());
        let restored = restore_user(&store, &directory);
        Self {
            directory,
            store,
            config,
            current: RwLock::new(restored),
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Returns the user directory backing this session.
    #[must_use]
    pub const fn directory(&self) -> &UserDirectory<S> {
        &self.directory
    }

    /// Returns a copy of the authenticated user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.current
            .read()
            .map(|current| current.clone())
            .unwrap_or_default()
    }

    /// Returns `true` when a user is signed in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    /// Registers a new account and signs it in.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::DuplicateAccount`] when the email is already
    /// registered (ignoring case), [`SessionError::Domain`] for an invalid
    /// email or empty secret, and [`SessionError::Storage`] when the
    /// directory or session pointer cannot be written.
    pub async fn register(&self, email: &str, secret: &str) -> SessionResult<User> {
        tokio::time::sleep(self.config.auth_latency).await;

        let address = Email::new(email)?;
        if self.directory.find_by_email(&address)?.is_some() {
            return Err(SessionError::DuplicateAccount(address));
        }
        let user = User::register(address, CredentialHash::derive(secret)?);
        self.directory.insert(&user)?;
        self.activate(&user)?;
        tracing::info!(user_id = %user.id(), email = %user.email(), "registered account");
        Ok(user)
    }

    /// Signs in an existing account.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidCredentials`] when no account matches
    /// the email or the secret does not verify, and
    /// [`SessionError::Storage`] when storage fails.
    pub async fn login(&self, email: &str, secret: &str) -> SessionResult<User> {
        tokio::time::sleep(self.config.auth_latency).await;

        let Ok(address) = Email::new(email) else {
            return Err(SessionError::InvalidCredentials);
        };
        let Some(user) = self.directory.find_by_email(&address)? else {
            tracing::debug!(email = %address, "login rejected: unknown email");
            return Err(SessionError::InvalidCredentials);
        };
        if !user.credential().verify(secret) {
            tracing::debug!(user_id = %user.id(), "login rejected: credential mismatch");
            return Err(SessionError::InvalidCredentials);
        }
        self.activate(&user)?;
        tracing::info!(user_id = %user.id(), "signed in");
        Ok(user)
    }

    /// Ends the active session.
    ///
    /// The in-memory session is always cleared; a failure to remove the
    /// persisted pointer is logged.
    pub fn logout(&self) {
        let previous = self.replace_current(None);
        if let Err(err) = self.store.clear(&StorageKey::SessionPointer) {
            tracing::warn!(error = %err, "failed to clear persisted session pointer");
        }
        if let Some(user) = previous {
            tracing::info!(user_id = %user.id(), "signed out");
        }
    }

    /// Merges `update` into the active user and persists the directory.
    ///
    /// Does nothing when no user is signed in. The in-memory user changes
    /// only after the directory write succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] when the directory cannot be read or
    /// written.
    pub fn update_current_user(&self, update: &UserUpdate) -> SessionResult<()> {
        let Some(current) = self.current_user() else {
            return Ok(());
        };
        let merged = current.merged(update);
        if !self.directory.replace(&merged)? {
            tracing::warn!(user_id = %merged.id(), "active user missing from directory");
        }
        let mut slot = self.current.write().map_err(|_| SessionError::StatePoisoned)?;
        if slot.as_ref().map(User::id) == Some(merged.id()) {
            *slot = Some(merged);
        }
        Ok(())
    }

    fn activate(&self, user: &User) -> SessionResult<()> {
        self.store.write(&StorageKey::SessionPointer, &user.id())?;
        self.replace_current(Some(user.clone()));
        Ok(())
    }

    fn replace_current(&self, user: Option<User>) -> Option<User> {
        match self.current.write() {
            Ok(mut slot) => std::mem::replace(&mut *slot, user),
            Err(poisoned) => {
                let mut slot = poisoned.into_inner();
                std::mem::replace(&mut *slot, user)
            }
        }
    }
}

fn restore_user<S: KeyValueStore>(
    store: &JsonStore<S>,
    directory: &UserDirectory<S>,
) -> Option<User> {
    let user_id = match store.read::<UserId>(&StorageKey::SessionPointer) {
        Ok(Some(user_id)) => user_id,
        Ok(None) => return None,
        Err(err) => {
            tracing::warn!(error = %err, "ignoring unreadable session pointer");
            return None;
        }
    };
    match directory.find_by_id(user_id) {
        Ok(Some(user)) => {
            tracing::info!(user_id = %user.id(), "restored session");
            Some(user)
        }
        Ok(None) => {
            tracing::warn!(user_id = %user_id, "session pointer references unknown user");
            None
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to read user directory during restore");
            None
        }
    }
}
