//! Domain layer for godel-judge
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Workers and the Judge
//!
//! A prompt is answered independently by several **workers** (models picked
//! from the [`ModelRegistry`]). A single **judge** model then reads every
//! successful worker answer and writes a soundness/completeness report.
//!
//! ## Quorum
//!
//! The judge only runs when enough workers succeeded. The threshold is
//! decided by [`QuorumGate`]: 2 of 3, 4 of 5, otherwise half rounded up.

pub mod config;
pub mod core;
pub mod orchestration;
pub mod prompt;
pub mod quorum;
pub mod report;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{
    error::{DomainError, SelectionError},
    model::{ModelDescriptor, ModelRegistry},
    prompt::{Attachment, Prompt},
    string::{first_line, truncate},
};
pub use orchestration::{
    entities::{DEFAULT_WORKER_KEYS, Phase, WorkerSelection},
    progress::{ProgressBoard, ProgressSnapshot, WorkerProgress, WorkerStatus},
    selection::reconcile_selection,
    value_objects::{SubmissionResult, WorkerOutcome, WorkerReport, WorkerResult},
};
pub use prompt::PromptTemplate;
pub use quorum::{QuorumGate, QuorumVerdict};
pub use report::ReportBuilder;
