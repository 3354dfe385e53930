//! Given steps for application BDD scenarios.

use super::world::AppWorld;
use rstest_bdd_macros::given;
use taskflow::app::AppEvent;

#[given("a fresh application")]
fn fresh_application(world: &mut AppWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(
        world.app.current_user().is_none(),
        "a fresh application has no session"
    );
    Ok(())
}

#[given(r#"a registered account "{email}" with secret "{secret}""#)]
fn registered_account(
    world: &mut AppWorld,
    email: String,
    secret: String,
) -> Result<(), eyre::Report> {
    world.dispatch_ok(AppEvent::Register { email, secret })?;
    Ok(())
}

#[given(r#"an onboarded account "{email}""#)]
fn onboarded_account(world: &mut AppWorld, email: String) -> Result<(), eyre::Report> {
    world.dispatch_ok(AppEvent::Register {
        email,
        secret: "secret1".to_owned(),
    })?;
    world.dispatch_ok(AppEvent::OnboardingComplete)?;
    Ok(())
}

#[given(r#"the user has added "{title}""#)]
fn user_has_added(world: &mut AppWorld, title: String) -> Result<(), eyre::Report> {
    world.dispatch_ok(AppEvent::AddTask(title))?;
    Ok(())
}
