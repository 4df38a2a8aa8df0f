//! Application layer for godel-judge
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{BehaviorConfig, TimeoutPolicy};
pub use ports::{
    completion_client::{CompletionClient, CompletionError},
    history_store::{HistoryEntry, HistoryError, HistoryStore, NoHistory},
    progress::{NoProgress, ProgressNotifier},
};
pub use use_cases::deadline::{DeadlineError, run_with_deadline};
pub use use_cases::fan_out::{FanOutCoordinator, FanOutResult};
pub use use_cases::run_judge::{RunJudgeError, RunJudgeInput, RunJudgeUseCase};
