//! When steps for application BDD scenarios.

use super::world::{AppWorld, run_async};
use rstest_bdd_macros::when;
use taskflow::{
    app::AppEvent,
    task::domain::{Category, CategoryFilter},
};

#[when(r#""{email}" registers with secret "{secret}""#)]
fn registers(world: &mut AppWorld, email: String, secret: String) {
    world.dispatch(AppEvent::Register { email, secret });
}

#[when(r#""{email}" logs in with secret "{secret}""#)]
fn logs_in(world: &mut AppWorld, email: String, secret: String) {
    world.dispatch(AppEvent::Login { email, secret });
}

#[when("the user signs out")]
fn signs_out(world: &mut AppWorld) {
    world.dispatch(AppEvent::Logout);
}

#[when("the user completes onboarding")]
fn completes_onboarding(world: &mut AppWorld) {
    world.dispatch(AppEvent::OnboardingComplete);
}

#[when("the application restarts")]
fn application_restarts(world: &mut AppWorld) {
    world.restart();
}

#[when(r#"the user adds "{title}""#)]
fn adds_task(world: &mut AppWorld, title: String) {
    world.dispatch(AppEvent::AddTask(title));
}

#[when(r#"the user adds "{first}" and "{second}" at the same time"#)]
fn adds_concurrently(
    world: &mut AppWorld,
    first: String,
    second: String,
) -> Result<(), eyre::Report> {
    let app = &world.app;
    let (first_result, second_result) = run_async(async {
        tokio::join!(
            app.dispatch(AppEvent::AddTask(first)),
            app.dispatch(AppEvent::AddTask(second))
        )
    });
    first_result.map_err(|err| eyre::eyre!("first add failed: {err}"))?;
    second_result.map_err(|err| eyre::eyre!("second add failed: {err}"))?;
    Ok(())
}

#[when(r#"the user toggles "{title}""#)]
fn toggles(world: &mut AppWorld, title: String) -> Result<(), eyre::Report> {
    let task = world.task_titled(&title)?;
    world.dispatch_ok(AppEvent::ToggleTask(task.id().clone()))?;
    Ok(())
}

#[when(r#"the user filters by "{category}""#)]
fn filters_by(world: &mut AppWorld, category: String) -> Result<(), eyre::Report> {
    let parsed = Category::try_from(category.as_str())?;
    world.dispatch_ok(AppEvent::FilterChange(CategoryFilter::Only(parsed)))?;
    Ok(())
}
