//! Event dispatch tests for the application facade.

use std::sync::Arc;

use rstest::rstest;
use taskflow::{
    app::{AppError, AppEvent, AppOutcome},
    onboarding::OnboardingState,
    storage::adapters::InMemoryKeyValueStore,
    task::{
        adapters::ScriptedLanguageModel,
        domain::{Category, CategoryFilter, SAMPLE_TASK_TITLE, TaskId, TaskStatus},
        services::{LOGGED_OUT_INSIGHT, NO_PENDING_INSIGHT},
    },
};

use super::helpers::{
    INSIGHT_REPLY, SECRET, backend, boot, login, model, onboarded_user, register, titles,
};

#[rstest]
#[tokio::test]
async fn fresh_app_starts_signed_out(
    backend: Arc<InMemoryKeyValueStore>,
    model: ScriptedLanguageModel,
) {
    let app = boot(&backend, &model);

    assert_eq!(app.current_user(), None);
    assert!(app.view().is_empty());
    assert_eq!(app.onboarding_state(), None);
    assert_eq!(app.insight().await, LOGGED_OUT_INSIGHT);
}

#[rstest]
#[tokio::test]
async fn registration_starts_onboarding_with_sample(
    backend: Arc<InMemoryKeyValueStore>,
    model: ScriptedLanguageModel,
) -> Result<(), eyre::Report> {
    let app = boot(&backend, &model);

    let outcome = app.dispatch(register("a@x.com")).await?;

    let AppOutcome::SignedIn(user) = outcome else {
        return Err(eyre::eyre!("expected sign-in outcome, got {outcome:?}"));
    };
    eyre::ensure!(!user.has_onboarded(), "new user starts the tour");
    assert_eq!(app.onboarding_state(), Some(OnboardingState::Pending));
    assert_eq!(titles(&app.view().pending), vec![SAMPLE_TASK_TITLE]);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn classify_toggle_and_delete_through_events(
    backend: Arc<InMemoryKeyValueStore>,
    model: ScriptedLanguageModel,
) -> Result<(), eyre::Report> {
    let app = boot(&backend, &model);
    onboarded_user(&app, "a@x.com").await?;

    let AppOutcome::TaskAdded(task) = app
        .dispatch(AppEvent::AddTask("Write report".to_owned()))
        .await?
    else {
        return Err(eyre::eyre!("expected an added task"));
    };
    assert_eq!(task.category(), Category::Work);
    assert_eq!(app.insight().await, INSIGHT_REPLY);

    let toggled = app.dispatch(AppEvent::ToggleTask(task.id().clone())).await?;
    assert_eq!(toggled, AppOutcome::TaskToggled(Some(TaskStatus::Completed)));
    assert_eq!(titles(&app.view().completed), vec!["Write report"]);
    assert_eq!(app.insight().await, NO_PENDING_INSIGHT);

    let removed = app.dispatch(AppEvent::DeleteTask(task.id().clone())).await?;
    assert_eq!(removed, AppOutcome::TaskRemoved(true));
    let repeated = app.dispatch(AppEvent::DeleteTask(task.id().clone())).await?;
    assert_eq!(repeated, AppOutcome::TaskRemoved(false));
    assert!(app.view().is_empty());
    Ok(())
}

#[rstest]
#[tokio::test]
async fn filter_change_narrows_the_view(
    backend: Arc<InMemoryKeyValueStore>,
    model: ScriptedLanguageModel,
) -> Result<(), eyre::Report> {
    let app = boot(&backend, &model);
    onboarded_user(&app, "a@x.com").await?;
    app.dispatch(AppEvent::AddTask("Write report".to_owned()))
        .await?;
    app.dispatch(AppEvent::AddTask("Gym".to_owned())).await?;

    let filter = CategoryFilter::Only(Category::Personal);
    let outcome = app.dispatch(AppEvent::FilterChange(filter)).await?;

    assert_eq!(outcome, AppOutcome::FilterChanged(filter));
    assert_eq!(app.filter(), filter);
    assert_eq!(titles(&app.view().pending), vec!["Gym"]);
    assert_eq!(app.tasks().tasks().len(), 2);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn logout_clears_board_and_tour(
    backend: Arc<InMemoryKeyValueStore>,
    model: ScriptedLanguageModel,
) -> Result<(), eyre::Report> {
    let app = boot(&backend, &model);
    app.dispatch(register("a@x.com")).await?;
    app.dispatch(AppEvent::AddTask("Gym".to_owned())).await?;

    let outcome = app.dispatch(AppEvent::Logout).await?;

    assert_eq!(outcome, AppOutcome::SignedOut);
    assert_eq!(app.current_user(), None);
    assert!(app.view().is_empty());
    assert_eq!(app.onboarding_state(), None);
    assert_eq!(app.insight().await, LOGGED_OUT_INSIGHT);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn login_switches_to_that_users_board(
    backend: Arc<InMemoryKeyValueStore>,
    model: ScriptedLanguageModel,
) -> Result<(), eyre::Report> {
    let app = boot(&backend, &model);
    onboarded_user(&app, "a@x.com").await?;
    app.dispatch(AppEvent::AddTask("Write report".to_owned()))
        .await?;
    app.dispatch(AppEvent::Logout).await?;
    onboarded_user(&app, "b@x.com").await?;
    app.dispatch(AppEvent::AddTask("Gym".to_owned())).await?;
    app.dispatch(AppEvent::Logout).await?;

    app.dispatch(login("A@x.com", SECRET)).await?;

    assert_eq!(titles(&app.tasks().tasks()), vec!["Write report"]);
    assert_eq!(app.onboarding_state(), Some(OnboardingState::Completed));
    Ok(())
}

#[rstest]
#[case::duplicate_account(
    vec![register("a@x.com"), AppEvent::Logout],
    register("A@X.COM"),
    "An account with this email already exists."
)]
#[case::wrong_secret(
    vec![register("a@x.com"), AppEvent::Logout],
    login("a@x.com", "wrong"),
    "Invalid email or password."
)]
#[case::unknown_email(vec![], login("nobody@x.com", SECRET), "Invalid email or password.")]
#[case::classification_failure(
    vec![register("a@x.com")],
    AppEvent::AddTask("Unreachable errand".to_owned()),
    "Failed to analyze task. The AI service may be unavailable."
)]
#[case::blank_task(vec![register("a@x.com")], AppEvent::AddTask("  ".to_owned()), "Please enter a task.")]
#[case::signed_out_add(vec![], AppEvent::AddTask("Gym".to_owned()), "Please sign in again.")]
#[tokio::test]
async fn failures_map_to_user_messages(
    backend: Arc<InMemoryKeyValueStore>,
    model: ScriptedLanguageModel,
    #[case] setup: Vec<AppEvent>,
    #[case] event: AppEvent,
    #[case] expected: &str,
) -> Result<(), eyre::Report> {
    let app = boot(&backend, &model);
    for step in setup {
        app.dispatch(step).await?;
    }
    let before = app.tasks().tasks();

    let err: AppError = match app.dispatch(event).await {
        Ok(outcome) => return Err(eyre::eyre!("expected a failure, got {outcome:?}")),
        Err(err) => err,
    };

    assert_eq!(err.user_message(), expected);
    assert_eq!(app.tasks().tasks(), before);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn failed_login_keeps_previous_state(
    backend: Arc<InMemoryKeyValueStore>,
    model: ScriptedLanguageModel,
) -> Result<(), eyre::Report> {
    let app = boot(&backend, &model);
    app.dispatch(register("a@x.com")).await?;
    app.dispatch(AppEvent::Logout).await?;

    let result = app.dispatch(login("a@x.com", "wrong")).await;

    eyre::ensure!(result.is_err(), "login with a wrong secret must fail");
    assert_eq!(app.current_user(), None);
    assert!(app.view().is_empty());
    Ok(())
}

#[rstest]
#[tokio::test]
async fn unknown_task_events_are_ignored(
    backend: Arc<InMemoryKeyValueStore>,
    model: ScriptedLanguageModel,
) -> Result<(), eyre::Report> {
    let app = boot(&backend, &model);
    onboarded_user(&app, "a@x.com").await?;
    let missing = TaskId::parse("missing")?;

    assert_eq!(
        app.dispatch(AppEvent::ToggleTask(missing.clone())).await?,
        AppOutcome::TaskToggled(None)
    );
    assert_eq!(
        app.dispatch(AppEvent::DeleteTask(missing)).await?,
        AppOutcome::TaskRemoved(false)
    );
    Ok(())
}

#[rstest]
#[tokio::test]
async fn completing_onboarding_twice_is_harmless(
    backend: Arc<InMemoryKeyValueStore>,
    model: ScriptedLanguageModel,
) -> Result<(), eyre::Report> {
    let app = boot(&backend, &model);
    app.dispatch(register("a@x.com")).await?;

    app.dispatch(AppEvent::OnboardingComplete).await?;
    app.dispatch(AppEvent::OnboardingComplete).await?;

    assert_eq!(app.onboarding_state(), Some(OnboardingState::Completed));
    assert!(app.view().is_empty());
    eyre::ensure!(
        app.current_user().is_some_and(|user| user.has_onboarded()),
        "flag should be set"
    );
    Ok(())
}
