//! Shared test helpers for application integration tests.

use std::sync::Arc;

use camino::Utf8PathBuf;
use mockable::DefaultClock;
use rstest::fixture;
use taskflow::{
    app::{AppConfig, AppEvent, TaskFlowApp},
    storage::{KeyValueStore, adapters::InMemoryKeyValueStore},
    task::{
        adapters::ScriptedLanguageModel,
        domain::{Category, Priority, Task},
        ports::ModelError,
    },
};
use uuid::Uuid;

/// Application type under test.
pub type TestApp<S> = TaskFlowApp<S, ScriptedLanguageModel, DefaultClock>;

/// Secret used by every test account.
pub const SECRET: &str = "secret1";

/// Reply returned for insight prompts.
pub const INSIGHT_REPLY: &str = "Start with the report.";

/// Provides a fresh shared in-memory backend.
#[fixture]
pub fn backend() -> Arc<InMemoryKeyValueStore> {
    Arc::new(InMemoryKeyValueStore::new())
}

/// Provides a language model with a fixed script.
///
/// The insight rule comes first because insight prompts quote task titles.
#[fixture]
pub fn model() -> ScriptedLanguageModel {
    ScriptedLanguageModel::new()
        .with_reply("productivity insight", INSIGHT_REPLY)
        .with_analysis(
            "Write report",
            Category::Work,
            Priority::High,
            "deadline-driven",
        )
        .with_analysis("Gym", Category::Personal, Priority::Low, "health")
        .with_failure("Unreachable", ModelError::Transport("offline".to_owned()))
}

/// Boots an application over `backend` without authentication latency.
pub fn boot<S: KeyValueStore>(backend: &Arc<S>, model: &ScriptedLanguageModel) -> TestApp<S> {
    TaskFlowApp::bootstrap(
        Arc::clone(backend),
        Arc::new(model.clone()),
        Arc::new(DefaultClock),
        AppConfig::immediate(),
    )
}

/// Builds a registration event.
#[must_use]
pub fn register(email: &str) -> AppEvent {
    AppEvent::Register {
        email: email.to_owned(),
        secret: SECRET.to_owned(),
    }
}

/// Builds a login event.
#[must_use]
pub fn login(email: &str, secret: &str) -> AppEvent {
    AppEvent::Login {
        email: email.to_owned(),
        secret: secret.to_owned(),
    }
}

/// Registers `email` and finishes onboarding so the board starts empty.
///
/// # Errors
///
/// Returns an error if registration or onboarding fails.
pub async fn onboarded_user<S: KeyValueStore>(
    app: &TestApp<S>,
    email: &str,
) -> Result<(), eyre::Report> {
    app.dispatch(register(email)).await?;
    app.dispatch(AppEvent::OnboardingComplete).await?;
    Ok(())
}

/// Returns the titles of `tasks` in order.
#[must_use]
pub fn titles(tasks: &[Task]) -> Vec<String> {
    tasks.iter().map(|task| task.title().to_owned()).collect()
}

/// Temporary directory removed on drop.
pub struct ScratchDir {
    /// Directory path; created lazily by the store under test.
    pub path: Utf8PathBuf,
}

impl ScratchDir {
    /// Picks a fresh path under the system temp directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the temp directory path is not UTF-8.
    pub fn new() -> Result<Self, eyre::Report> {
        let base = std::env::temp_dir().join(format!("taskflow-app-{}", Uuid::new_v4()));
        let path = Utf8PathBuf::from_path_buf(base)
            .map_err(|path| eyre::eyre!("temp dir is not UTF-8: {}", path.display()))?;
        Ok(Self { path })
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ignored = std::fs::remove_dir_all(&self.path);
    }
}
