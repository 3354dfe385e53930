//! Application services for the task board.

mod classifier;
mod store;

pub use classifier::{
    ClassificationError, ClassificationResult, ClassifierConfig, EMPTY_INSIGHT, FALLBACK_INSIGHT,
    TaskClassifier,
};
pub use store::{
    LOGGED_OUT_INSIGHT, NO_PENDING_INSIGHT, TaskStore, TaskStoreError, TaskStoreResult,
};
