//! Progress notification port
//!
//! Defines the interface for reporting progress while a submission runs.

use godel_domain::{ModelDescriptor, Phase, ProgressSnapshot, WorkerOutcome};

/// Callback for progress updates during a submission
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bars, plain lines, nothing).
pub trait ProgressNotifier: Send + Sync {
    /// Called when a phase starts
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize);

    /// Called once per worker, as soon as its call settles
    fn on_worker_settled(&self, model: &ModelDescriptor, outcome: &WorkerOutcome);

    /// Called when a phase completes
    fn on_phase_complete(&self, phase: &Phase);

    /// Called on every progress tick while workers are outstanding
    fn on_snapshot(&self, _snapshot: &ProgressSnapshot) {}

    /// Called when the judge call settles
    fn on_judge_complete(&self, _judge: &ModelDescriptor, _success: bool) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_phase_start(&self, _phase: &Phase, _total_tasks: usize) {}
    fn on_worker_settled(&self, _model: &ModelDescriptor, _outcome: &WorkerOutcome) {}
    fn on_phase_complete(&self, _phase: &Phase) {}
}
