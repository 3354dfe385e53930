//! Generative model port used for task classification and insights.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Result type for model calls.
pub type ModelResult<T> = Result<T, ModelError>;

/// Single text-generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Model name to invoke.
    pub model: String,
    /// Prompt text.
    pub prompt: String,
    /// JSON schema the reply must follow, when structured output is needed.
    pub response_schema: Option<Value>,
}

impl GenerationRequest {
    /// Creates a free-text request.
    #[must_use]
    pub fn text(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            response_schema: None,
        }
    }

    /// Requests a JSON reply constrained by `schema`.
    #[must_use]
    pub fn with_response_schema(mut self, schema: Value) -> Self {
        self.response_schema = Some(schema);
        self
    }
}

/// Remote text-generation service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generates a reply for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] when the service cannot be reached or refuses
    /// the request.
    async fn generate(&self, request: GenerationRequest) -> ModelResult<String>;
}

/// Errors returned by model adapters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModelError {
    /// The service could not be reached.
    #[error("model transport failed: {0}")]
    Transport(String),

    /// The service answered with an error.
    #[error("model rejected request: {0}")]
    Rejected(String),
}
