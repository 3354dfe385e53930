//! Deterministic language model for demos and tests.
//!
//! Replies are chosen by the first rule whose needle occurs in the prompt.
//! A rule may carry a delay so tests can control the order in which
//! concurrent classifications resolve.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::task::domain::{Category, Priority};
use crate::task::ports::{GenerationRequest, LanguageModel, ModelError, ModelResult};

#[derive(Debug, Clone)]
struct ScriptRule {
    needle: String,
    delay: Duration,
    reply: ModelResult<String>,
}

/// Language model answering from a fixed script.
#[derive(Debug, Clone, Default)]
pub struct ScriptedLanguageModel {
    rules: Arc<RwLock<Vec<ScriptRule>>>,
    requests: Arc<RwLock<Vec<GenerationRequest>>>,
}

impl ScriptedLanguageModel {
    /// Creates a model with an empty script.
    ///
    /// Unscripted prompts fail with [`ModelError::Transport`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers prompts containing `needle` with `reply`.
    #[must_use]
    pub fn with_reply(self, needle: impl Into<String>, reply: impl Into<String>) -> Self {
        self.with_rule(needle.into(), Duration::ZERO, Ok(reply.into()))
    }

    /// Answers prompts containing `needle` with `reply` after `delay`.
    #[must_use]
    pub fn with_delayed_reply(
        self,
        needle: impl Into<String>,
        delay: Duration,
        reply: impl Into<String>,
    ) -> Self {
        self.with_rule(needle.into(), delay, Ok(reply.into()))
    }

    /// Answers prompts containing `needle` with a classification reply.
    #[must_use]
    pub fn with_analysis(
        self,
        needle: impl Into<String>,
        category: Category,
        priority: Priority,
        reasoning: &str,
    ) -> Self {
        self.with_reply(needle, analysis_reply(category, priority, reasoning))
    }

    /// Fails prompts containing `needle` with `error`.
    #[must_use]
    pub fn with_failure(self, needle: impl Into<String>, error: ModelError) -> Self {
        self.with_rule(needle.into(), Duration::ZERO, Err(error))
    }

    /// Returns every request received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests
            .read()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    fn with_rule(self, needle: String, delay: Duration, reply: ModelResult<String>) -> Self {
        if let Ok(mut rules) = self.rules.write() {
            rules.push(ScriptRule {
                needle,
                delay,
                reply,
            });
        }
        self
    }

    fn find_rule(&self, prompt: &str) -> Option<ScriptRule> {
        self.rules
            .read()
            .ok()?
            .iter()
            .find(|rule| prompt.contains(&rule.needle))
            .cloned()
    }
}

/// Builds the JSON reply a classifier expects.
#[must_use]
pub fn analysis_reply(category: Category, priority: Priority, reasoning: &str) -> String {
    serde_json::json!({
        "category": category.as_str(),
        "priority": priority.as_str(),
        "reasoning": reasoning,
    })
    .to_string()
}

#[async_trait]
impl LanguageModel for ScriptedLanguageModel {
    async fn generate(&self, request: GenerationRequest) -> ModelResult<String> {
        if let Ok(mut requests) = self.requests.write() {
            requests.push(request.clone());
        }
        let Some(rule) = self.find_rule(&request.prompt) else {
            return Err(ModelError::Transport("no scripted reply".to_owned()));
        };
        if !rule.delay.is_zero() {
            tokio::time::sleep(rule.delay).await;
        }
        rule.reply
    }
}
