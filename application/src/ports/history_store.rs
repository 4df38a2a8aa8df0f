//! Port for submission history.
//!
//! The history is an append-only, ordered sequence of finished submissions.
//! Use cases only ever append; listing and clearing are offered to the
//! presentation layer.

use chrono::{DateTime, Utc};
use godel_domain::SubmissionResult;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One finished submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    /// The prompt as typed (attachments excluded)
    pub prompt: String,
    /// Judge display name
    pub judge: String,
    /// Display names of the workers whose answers were used
    pub workers: Vec<String>,
    /// Full report text
    pub output: String,
}

impl HistoryEntry {
    /// Build an entry for a finished submission, stamped with the current time
    pub fn from_result(result: &SubmissionResult) -> Self {
        Self {
            timestamp: Utc::now(),
            prompt: result.prompt.clone(),
            judge: result.judge.display_name.clone(),
            workers: result.worker_display_names(),
            output: result.report.clone(),
        }
    }
}

/// Errors from a history backend
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("History I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not serialize history record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Persistence for submission history
pub trait HistoryStore: Send + Sync {
    /// Append one record
    fn append(&self, entry: &HistoryEntry) -> Result<(), HistoryError>;

    /// All records, oldest first
    fn load(&self) -> Result<Vec<HistoryEntry>, HistoryError>;

    /// Remove every record
    fn clear(&self) -> Result<(), HistoryError>;
}

/// No-op implementation for tests and when history is disabled.
pub struct NoHistory;

impl HistoryStore for NoHistory {
    fn append(&self, _entry: &HistoryEntry) -> Result<(), HistoryError> {
        Ok(())
    }

    fn load(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        Ok(Vec::new())
    }

    fn clear(&self) -> Result<(), HistoryError> {
        Ok(())
    }
}
