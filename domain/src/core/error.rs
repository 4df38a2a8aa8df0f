//! Domain error types

use thiserror::Error;

/// Rejections of a submission that happen before any model is called.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Please select exactly {expected} workers. Currently selected: {actual}")]
    WorkerCountMismatch { expected: usize, actual: usize },

    #[error("Worker count must be between 1 and {max}, got {count}")]
    InvalidWorkerCount { count: usize, max: usize },

    #[error("Judge '{0}' cannot also be selected as a worker")]
    JudgeSelectedAsWorker(String),

    #[error("Worker '{0}' is selected more than once")]
    DuplicateWorker(String),

    #[error("Unknown model key: {0}")]
    UnknownModel(String),

    #[error("Prompt cannot be empty")]
    EmptyPrompt,
}

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid selection: {0}")]
    Selection(#[from] SelectionError),

    #[error("Model registry is empty")]
    EmptyRegistry,

    #[error("Duplicate model key in registry: {0}")]
    DuplicateRegistryKey(String),
}
