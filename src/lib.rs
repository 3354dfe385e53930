//! Taskflow: a per-user task board with AI-assisted classification.
//!
//! This crate holds the client-side state machine of a single-user task
//! manager: authentication sessions, a per-user task collection with its
//! derived views, the persistence lifecycle that mirrors memory to durable
//! key/value storage, and the one-shot onboarding flow.
//!
//! # Architecture
//!
//! Taskflow follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (storage, models)
//!
//! # Modules
//!
//! - [`storage`]: Key/value persistence partitions
//! - [`account`]: User directory and authentication sessions
//! - [`task`]: Task collection, classification, and derived views
//! - [`onboarding`]: First-run tour state and sample task handling
//! - [`app`]: UI-facing event facade wiring the components together

pub mod account;
pub mod app;
pub mod onboarding;
pub mod storage;
pub mod task;
