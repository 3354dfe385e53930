//! First-run onboarding for new users.
//!
//! A user who has never completed the tour enters [`OnboardingState::Pending`]
//! when their board loads. If their board is empty they get one in-memory
//! sample task to explore. Completing the tour flips the user's
//! `has_onboarded` flag once and removes the sample.

mod controller;

pub use controller::{OnboardingController, OnboardingError, OnboardingResult, OnboardingState};

#[cfg(test)]
mod tests;
