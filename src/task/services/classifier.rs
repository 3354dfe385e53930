//! Classification collaborator: task analysis and productivity insights.

use minijinja::{Environment, context};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use thiserror::Error;

use crate::task::{
    domain::{Category, Priority, Task, TaskAnalysis},
    ports::{GenerationRequest, LanguageModel},
};

/// Model used when none is configured.
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Upper bound on insight length requested from the model.
const DEFAULT_INSIGHT_WORD_LIMIT: usize = 25;

/// Insight returned for an empty task list.
pub const EMPTY_INSIGHT: &str = "Add your first task to get started!";

/// Insight returned when the model cannot be reached.
pub const FALLBACK_INSIGHT: &str = "Could not retrieve AI insight at this time.";

const ANALYSIS_TEMPLATE: &str = r#"Analyze the following task and provide its category and priority.
Task: "{{ task }}"

Consider the following:
- Keywords indicating urgency (e.g., 'ASAP', 'urgent', 'deadline', 'by tomorrow').
- Work-related terms (e.g., 'client', 'meeting', 'project', 'report', 'presentation').
- Personal activities (e.g., 'doctor', 'gym', 'family', 'shopping', 'appointment').
- Creative tasks (e.g., 'design', 'write', 'brainstorm', 'plan', 'create').
- Routine activities (e.g., 'daily', 'weekly', 'review', 'standup', 'cleanup').

Return the analysis in JSON format."#;

const INSIGHT_TEMPLATE: &str = "Based on the following list of tasks for today, provide a single, \
short, and encouraging productivity insight or tip for the user.
Keep it under {{ word_limit }} words. Be positive and motivational.

Tasks:
{% for task in tasks %}- {{ task.title }} ({{ task.category }}, {{ task.priority }} priority)
{% endfor %}";

/// Configuration for the classification collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierConfig {
    /// Model name sent with each request.
    pub model: String,
    /// Maximum insight length requested from the model.
    pub insight_word_limit: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_owned(),
            insight_word_limit: DEFAULT_INSIGHT_WORD_LIMIT,
        }
    }
}

/// Errors returned while classifying a task.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClassificationError {
    /// The model failed or answered outside the expected schema.
    #[error("failed to analyze task, the AI service may be unavailable: {reason}")]
    AnalysisUnavailable {
        /// Underlying failure description.
        reason: String,
    },
}

impl ClassificationError {
    fn unavailable(reason: impl ToString) -> Self {
        Self::AnalysisUnavailable {
            reason: reason.to_string(),
        }
    }
}

/// Result type for classification operations.
pub type ClassificationResult<T> = Result<T, ClassificationError>;

#[derive(Debug, Deserialize)]
struct RawAnalysis {
    category: String,
    priority: String,
    reasoning: String,
}

#[derive(Debug, Serialize)]
struct InsightLine<'a> {
    title: &'a str,
    category: &'static str,
    priority: &'static str,
}

/// Classifies task text and summarises task lists through a language model.
#[derive(Debug)]
pub struct TaskClassifier<M: LanguageModel> {
    model: Arc<M>,
    config: ClassifierConfig,
}

impl<M: LanguageModel> Clone for TaskClassifier<M> {
    fn clone(&self) -> Self {
        Self {
            model: Arc::clone(&self.model),
            config: self.config.clone(),
        }
    }
}

impl<M: LanguageModel> TaskClassifier<M> {
    /// Creates a classifier over `model`.
    #[must_use]
    pub const fn new(model: Arc<M>, config: ClassifierConfig) -> Self {
        Self { model, config }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Asks the model for the category, priority, and reasoning of `text`.
    ///
    /// # Errors
    ///
    /// Returns [`ClassificationError::AnalysisUnavailable`] when the model
    /// call fails, the reply is not the expected JSON object, or the
    /// category or priority falls outside the fixed sets.
    pub async fn analyze(&self, text: &str) -> ClassificationResult<TaskAnalysis> {
        let prompt = render(ANALYSIS_TEMPLATE, context! { task => text })
            .map_err(ClassificationError::unavailable)?;
        let request = GenerationRequest::text(&self.config.model, prompt)
            .with_response_schema(analysis_schema());

        let reply = self.model.generate(request).await.map_err(|err| {
            tracing::warn!(error = %err, "task analysis request failed");
            ClassificationError::unavailable(err)
        })?;
        parse_analysis(&reply).inspect_err(|err| {
            tracing::warn!(error = %err, "rejected task analysis reply");
        })
    }

    /// Produces a short productivity insight for `tasks`.
    ///
    /// An empty list is answered locally without calling the model. Model
    /// failures are logged and replaced by a fixed fallback message.
    pub async fn summarize(&self, tasks: &[Task]) -> String {
        if tasks.is_empty() {
            return EMPTY_INSIGHT.to_owned();
        }

        let lines: Vec<InsightLine<'_>> = tasks
            .iter()
            .map(|task| InsightLine {
                title: task.title(),
                category: task.category().as_str(),
                priority: task.priority().as_str(),
            })
            .collect();
        let prompt = match render(
            INSIGHT_TEMPLATE,
            context! { tasks => lines, word_limit => self.config.insight_word_limit },
        ) {
            Ok(prompt) => prompt,
            Err(err) => {
                tracing::warn!(error = %err, "failed to render insight prompt");
                return FALLBACK_INSIGHT.to_owned();
            }
        };

        match self
            .model
            .generate(GenerationRequest::text(&self.config.model, prompt))
            .await
        {
            Ok(reply) => reply.trim().to_owned(),
            Err(err) => {
                tracing::warn!(error = %err, "insight request failed, using fallback");
                FALLBACK_INSIGHT.to_owned()
            }
        }
    }
}

fn render(template: &str, ctx: minijinja::Value) -> Result<String, minijinja::Error> {
    Environment::new().render_str(template, ctx)
}

fn analysis_schema() -> Value {
    let categories: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
    let priorities: Vec<&str> = Priority::ALL.iter().map(|p| p.as_str()).collect();
    json!({
        "type": "object",
        "properties": {
            "category": {
                "type": "string",
                "enum": categories,
                "description": "The best category for the task.",
            },
            "priority": {
                "type": "string",
                "enum": priorities,
                "description": "The priority level of the task.",
            },
            "reasoning": {
                "type": "string",
                "description": "A brief explanation for the chosen category and priority.",
            },
        },
        "required": ["category", "priority", "reasoning"],
    })
}

fn parse_analysis(reply: &str) -> ClassificationResult<TaskAnalysis> {
    let raw: RawAnalysis =
        serde_json::from_str(reply.trim()).map_err(ClassificationError::unavailable)?;
    let category =
        Category::try_from(raw.category.as_str()).map_err(ClassificationError::unavailable)?;
    let priority =
        Priority::try_from(raw.priority.as_str()).map_err(ClassificationError::unavailable)?;
    Ok(TaskAnalysis::new(category, priority, raw.reasoning))
}
