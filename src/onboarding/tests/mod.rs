//! Unit tests for the onboarding controller.
