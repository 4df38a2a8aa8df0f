//! Live worker progress
//!
//! [`ProgressBoard`] is the single owner of per-worker lifecycle state while
//! a fan-out is running. Each worker's entry is settled at most once, from
//! that worker's own outcome; readers only ever see a copied
//! [`ProgressSnapshot`].

use super::value_objects::WorkerOutcome;
use crate::core::model::ModelDescriptor;
use crate::core::string::first_line;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Longest error excerpt shown in a rendered snapshot
const ERROR_EXCERPT_LEN: usize = 120;

/// Lifecycle status of a worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkerStatus {
    Pending,
    Completed,
    Timeout,
    Error,
}

impl WorkerStatus {
    pub fn glyph(&self) -> &'static str {
        match self {
            WorkerStatus::Pending => "⏳",
            WorkerStatus::Completed => "✓",
            WorkerStatus::Timeout => "⏱",
            WorkerStatus::Error => "✗",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkerStatus::Pending => "pending",
            WorkerStatus::Completed => "completed",
            WorkerStatus::Timeout => "timeout",
            WorkerStatus::Error => "error",
        }
    }

    pub fn is_settled(&self) -> bool {
        !matches!(self, WorkerStatus::Pending)
    }
}

impl From<&WorkerOutcome> for WorkerStatus {
    fn from(outcome: &WorkerOutcome) -> Self {
        match outcome {
            WorkerOutcome::Completed(_) => WorkerStatus::Completed,
            WorkerOutcome::TimedOut => WorkerStatus::Timeout,
            WorkerOutcome::Failed(_) => WorkerStatus::Error,
        }
    }
}

/// One worker's line in a [`ProgressSnapshot`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerProgress {
    pub key: String,
    pub display_name: String,
    pub status: WorkerStatus,
    pub elapsed_secs: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WorkerProgress {
    /// `"<glyph> <name>: <n>s"` followed by the error or timeout note
    pub fn render(&self) -> String {
        let mut line = format!(
            "{} {}: {}s",
            self.status.glyph(),
            self.display_name,
            self.elapsed_secs
        );
        match (self.status, &self.error) {
            (WorkerStatus::Timeout, _) => line.push_str(" (timed out)"),
            (WorkerStatus::Error, Some(err)) => {
                line.push_str(" - ");
                line.push_str(&first_line(err, ERROR_EXCERPT_LEN));
            }
            _ => {}
        }
        line
    }
}

/// Point-in-time view of every worker's status
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub workers: Vec<WorkerProgress>,
    pub elapsed_secs: u64,
}

impl ProgressSnapshot {
    pub fn count(&self, status: WorkerStatus) -> usize {
        self.workers.iter().filter(|w| w.status == status).count()
    }

    pub fn pending(&self) -> usize {
        self.count(WorkerStatus::Pending)
    }

    pub fn get(&self, key: &str) -> Option<&WorkerProgress> {
        self.workers.iter().find(|w| w.key == key)
    }

    /// Multi-line, human-readable rendering
    pub fn render(&self) -> String {
        let mut out = format!(
            "Worker progress ({}s elapsed, {}/{} settled):",
            self.elapsed_secs,
            self.workers.len() - self.pending(),
            self.workers.len()
        );
        for worker in &self.workers {
            out.push_str("\n  ");
            out.push_str(&worker.render());
        }
        out
    }
}

#[derive(Debug, Clone)]
struct BoardEntry {
    model: ModelDescriptor,
    status: WorkerStatus,
    settled_after: Option<Duration>,
    error: Option<String>,
}

/// Owner of live per-worker state during a fan-out
#[derive(Debug, Clone)]
pub struct ProgressBoard {
    entries: Vec<BoardEntry>,
}

impl ProgressBoard {
    /// Every worker starts `Pending`
    pub fn new(workers: &[ModelDescriptor]) -> Self {
        Self {
            entries: workers
                .iter()
                .map(|model| BoardEntry {
                    model: model.clone(),
                    status: WorkerStatus::Pending,
                    settled_after: None,
                    error: None,
                })
                .collect(),
        }
    }

    /// Record a worker's outcome.
    ///
    /// Returns `false` (and changes nothing) when the key is unknown or the
    /// worker has already settled.
    pub fn settle(&mut self, key: &str, outcome: &WorkerOutcome, elapsed: Duration) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.model.key == key) else {
            return false;
        };
        if entry.status.is_settled() {
            return false;
        }
        entry.status = WorkerStatus::from(outcome);
        entry.settled_after = Some(elapsed);
        entry.error = outcome.error().map(str::to_string);
        true
    }

    /// Workers still waiting on a response
    pub fn outstanding(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| !e.status.is_settled())
            .count()
    }

    pub fn is_settled(&self) -> bool {
        self.outstanding() == 0
    }

    /// Snapshot at `elapsed` since dispatch; pending workers report `elapsed`.
    pub fn snapshot(&self, elapsed: Duration) -> ProgressSnapshot {
        ProgressSnapshot {
            workers: self
                .entries
                .iter()
                .map(|e| WorkerProgress {
                    key: e.model.key.clone(),
                    display_name: e.model.display_name.clone(),
                    status: e.status,
                    elapsed_secs: e.settled_after.unwrap_or(elapsed).as_secs(),
                    error: e.error.clone(),
                })
                .collect(),
            elapsed_secs: elapsed.as_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::ModelRegistry;

    fn board() -> ProgressBoard {
        let registry = ModelRegistry::builtin();
        let workers: Vec<_> = ["claude", "grok", "kimi"]
            .iter()
            .map(|k| registry.get(k).unwrap().clone())
            .collect();
        ProgressBoard::new(&workers)
    }

    #[test]
    fn test_all_pending_initially() {
        let board = board();
        assert_eq!(board.outstanding(), 3);
        let snap = board.snapshot(Duration::from_secs(4));
        assert_eq!(snap.pending(), 3);
        assert!(snap.workers.iter().all(|w| w.elapsed_secs == 4));
    }

    #[test]
    fn test_settle_is_write_once_per_key() {
        let mut board = board();
        assert!(board.settle(
            "grok",
            &WorkerOutcome::Completed("ok".into()),
            Duration::from_secs(2)
        ));
        assert!(!board.settle(
            "grok",
            &WorkerOutcome::Failed("late".into()),
            Duration::from_secs(3)
        ));
        assert!(!board.settle("llama", &WorkerOutcome::TimedOut, Duration::ZERO));

        let snap = board.snapshot(Duration::from_secs(10));
        let grok = snap.get("grok").unwrap();
        assert_eq!(grok.status, WorkerStatus::Completed);
        assert_eq!(grok.elapsed_secs, 2);
        assert_eq!(grok.error, None);
        // Others keep counting
        assert_eq!(snap.get("claude").unwrap().elapsed_secs, 10);
        assert_eq!(board.outstanding(), 2);
    }

    #[test]
    fn test_render_lines() {
        let mut board = board();
        board.settle(
            "claude",
            &WorkerOutcome::Failed("OpenRouter API error: rate limited\ndetails".into()),
            Duration::from_secs(1),
        );
        board.settle("kimi", &WorkerOutcome::TimedOut, Duration::from_secs(120));

        let text = board.snapshot(Duration::from_secs(120)).render();
        assert!(text.starts_with("Worker progress (120s elapsed, 2/3 settled):"));
        assert!(text.contains("✗ Claude 4.5 Sonnet: 1s - OpenRouter API error: rate limited"));
        assert!(!text.contains("details"));
        assert!(text.contains("⏳ Grok 4: 120s"));
        assert!(text.contains("⏱ Kimi K2 Thinking: 120s (timed out)"));
    }

    #[test]
    fn test_is_settled() {
        let mut board = board();
        for key in ["claude", "grok", "kimi"] {
            board.settle(key, &WorkerOutcome::TimedOut, Duration::from_secs(1));
        }
        assert!(board.is_settled());
        assert_eq!(board.snapshot(Duration::from_secs(1)).count(WorkerStatus::Timeout), 3);
    }
}
