//! Port contracts for the task board.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod model;

#[cfg(test)]
pub use model::MockLanguageModel;
pub use model::{GenerationRequest, LanguageModel, ModelError, ModelResult};
