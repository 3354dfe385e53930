//! Tests for restoring state when the application starts again.

use std::sync::Arc;

use rstest::rstest;
use taskflow::{
    app::AppEvent,
    onboarding::OnboardingState,
    storage::{
        KeyValueStore, StorageKey,
        adapters::{DirectoryKeyValueStore, InMemoryKeyValueStore},
    },
    task::{adapters::ScriptedLanguageModel, domain::SAMPLE_TASK_TITLE},
};

use super::helpers::{ScratchDir, backend, boot, model, onboarded_user, register, titles};

#[rstest]
#[tokio::test]
async fn restart_restores_session_and_tasks(
    backend: Arc<InMemoryKeyValueStore>,
    model: ScriptedLanguageModel,
) -> Result<(), eyre::Report> {
    let first = boot(&backend, &model);
    onboarded_user(&first, "a@x.com").await?;
    first
        .dispatch(AppEvent::AddTask("Write report".to_owned()))
        .await?;
    first.dispatch(AppEvent::AddTask("Gym".to_owned())).await?;
    drop(first);

    let second = boot(&backend, &model);

    let user = second
        .current_user()
        .ok_or_else(|| eyre::eyre!("session should be restored"))?;
    assert_eq!(user.email().as_str(), "a@x.com");
    assert_eq!(titles(&second.tasks().tasks()), vec!["Gym", "Write report"]);
    assert_eq!(second.onboarding_state(), Some(OnboardingState::Completed));
    Ok(())
}

#[rstest]
#[tokio::test]
async fn restart_mid_tour_brings_back_the_sample(
    backend: Arc<InMemoryKeyValueStore>,
    model: ScriptedLanguageModel,
) -> Result<(), eyre::Report> {
    let first = boot(&backend, &model);
    first.dispatch(register("a@x.com")).await?;
    drop(first);

    let second = boot(&backend, &model);

    assert_eq!(second.onboarding_state(), Some(OnboardingState::Pending));
    assert_eq!(titles(&second.tasks().tasks()), vec![SAMPLE_TASK_TITLE]);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn restart_after_logout_stays_signed_out(
    backend: Arc<InMemoryKeyValueStore>,
    model: ScriptedLanguageModel,
) -> Result<(), eyre::Report> {
    let first = boot(&backend, &model);
    onboarded_user(&first, "a@x.com").await?;
    first.dispatch(AppEvent::Logout).await?;
    drop(first);

    let second = boot(&backend, &model);

    assert_eq!(second.current_user(), None);
    assert!(second.view().is_empty());
    Ok(())
}

#[rstest]
#[tokio::test]
async fn dangling_session_pointer_degrades_to_signed_out(
    backend: Arc<InMemoryKeyValueStore>,
    model: ScriptedLanguageModel,
) -> Result<(), eyre::Report> {
    backend.set(
        &StorageKey::SessionPointer,
        "\"00000000-0000-0000-0000-000000000000\"",
    )?;

    let app = boot(&backend, &model);

    assert_eq!(app.current_user(), None);
    assert!(app.view().is_empty());
    Ok(())
}

#[rstest]
#[tokio::test]
async fn corrupt_task_partition_starts_with_empty_board(
    backend: Arc<InMemoryKeyValueStore>,
    model: ScriptedLanguageModel,
) -> Result<(), eyre::Report> {
    let first = boot(&backend, &model);
    onboarded_user(&first, "a@x.com").await?;
    let owner = first
        .tasks()
        .owner()
        .ok_or_else(|| eyre::eyre!("a user should be signed in"))?;
    drop(first);
    backend.set(&StorageKey::Tasks(owner), "{broken")?;

    let second = boot(&backend, &model);

    eyre::ensure!(second.current_user().is_some(), "session should survive");
    assert!(second.tasks().tasks().is_empty());
    Ok(())
}

#[rstest]
#[tokio::test]
async fn directory_backend_survives_process_restart(
    model: ScriptedLanguageModel,
) -> Result<(), eyre::Report> {
    let scratch = ScratchDir::new()?;
    {
        let store = Arc::new(DirectoryKeyValueStore::open(&scratch.path)?);
        let app = boot(&store, &model);
        onboarded_user(&app, "a@x.com").await?;
        app.dispatch(AppEvent::AddTask("Write report".to_owned()))
            .await?;
    }

    let reopened = Arc::new(DirectoryKeyValueStore::open(&scratch.path)?);
    let app = boot(&reopened, &model);

    eyre::ensure!(app.current_user().is_some(), "session should be restored");
    assert_eq!(titles(&app.tasks().tasks()), vec!["Write report"]);
    Ok(())
}
