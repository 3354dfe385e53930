//! Task adapter implementations.

pub mod partition;
pub mod scripted;

pub use partition::{TaskPartition, TaskRecord};
pub use scripted::{ScriptedLanguageModel, analysis_reply};
