//! Orchestration value objects - immutable result types for a submission.
//!
//! - [`WorkerOutcome`] - how a single worker's call settled
//! - [`WorkerResult`] - a worker's outcome together with who it was and how long it took
//! - [`WorkerReport`] - a successful worker answer handed to the judge
//! - [`SubmissionResult`] - complete result of a judged submission

use crate::core::model::ModelDescriptor;
use serde::{Deserialize, Serialize};

/// How a worker's call settled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum WorkerOutcome {
    /// The model answered before the deadline
    Completed(String),
    /// The deadline passed before an answer arrived
    TimedOut,
    /// The call failed (HTTP, transport or malformed response)
    Failed(String),
}

impl WorkerOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, WorkerOutcome::Completed(_))
    }

    /// The response text, if the worker completed
    pub fn response(&self) -> Option<&str> {
        match self {
            WorkerOutcome::Completed(text) => Some(text),
            _ => None,
        }
    }

    /// The error message, if the worker failed
    pub fn error(&self) -> Option<&str> {
        match self {
            WorkerOutcome::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Settled outcome of one worker (keyed by `model.key`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerResult {
    pub model: ModelDescriptor,
    pub outcome: WorkerOutcome,
    /// Time from dispatch to settlement
    pub elapsed_ms: u64,
}

impl WorkerResult {
    pub fn new(model: ModelDescriptor, outcome: WorkerOutcome, elapsed_ms: u64) -> Self {
        Self {
            model,
            outcome,
            elapsed_ms,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    pub fn key(&self) -> &str {
        &self.model.key
    }

    /// Convert into the form consumed by the judge, if successful
    pub fn to_report(&self) -> Option<WorkerReport> {
        self.outcome.response().map(|text| WorkerReport {
            key: self.model.key.clone(),
            display_name: self.model.display_name.clone(),
            response: text.to_string(),
        })
    }
}

/// A successful worker answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerReport {
    pub key: String,
    pub display_name: String,
    pub response: String,
}

/// Complete result of a judged submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionResult {
    /// The original prompt (without attachments)
    pub prompt: String,
    /// The judge that wrote the synthesis
    pub judge: ModelDescriptor,
    /// Number of workers requested
    pub worker_count: usize,
    /// The judge's synthesized text, exactly as returned
    pub judge_report: String,
    /// Workers whose answers reached the judge, in selection order
    pub workers_used: Vec<WorkerReport>,
    /// Workers that timed out or failed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unsucceeded: Vec<WorkerResult>,
    pub quorum_met: bool,
    /// Final report: header, optional prelude, judge text
    pub report: String,
}

impl SubmissionResult {
    /// Display names of the workers that were used
    pub fn worker_display_names(&self) -> Vec<String> {
        self.workers_used
            .iter()
            .map(|w| w.display_name.clone())
            .collect()
    }
}
