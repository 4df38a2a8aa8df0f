//! Worker fan-out
//!
//! Dispatches one bounded-time completion call per selected worker and waits
//! for every one of them to settle. A failing or slow worker only ever
//! affects its own outcome.

use crate::config::BehaviorConfig;
use crate::ports::completion_client::CompletionClient;
use crate::ports::progress::ProgressNotifier;
use crate::use_cases::deadline::{DeadlineError, run_with_deadline};
use godel_domain::{
    ModelDescriptor, Phase, ProgressBoard, ProgressSnapshot, PromptTemplate, WorkerOutcome,
    WorkerReport, WorkerResult,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Shortest allowed ticker period
const MIN_PROGRESS_INTERVAL: Duration = Duration::from_millis(10);

/// Every worker's settled outcome, in selection order
#[derive(Debug, Clone)]
pub struct FanOutResult {
    pub results: Vec<WorkerResult>,
    /// Board state after the last worker settled
    pub snapshot: ProgressSnapshot,
}

impl FanOutResult {
    pub fn succeeded(&self) -> impl Iterator<Item = &WorkerResult> {
        self.results.iter().filter(|r| r.is_success())
    }

    pub fn unsucceeded(&self) -> impl Iterator<Item = &WorkerResult> {
        self.results.iter().filter(|r| !r.is_success())
    }

    pub fn success_count(&self) -> usize {
        self.succeeded().count()
    }

    /// Successful answers in the form the judge consumes
    pub fn reports(&self) -> Vec<WorkerReport> {
        self.results.iter().filter_map(|r| r.to_report()).collect()
    }
}

/// Runs the worker phase of a submission
pub struct FanOutCoordinator<C: CompletionClient + 'static> {
    client: Arc<C>,
    behavior: BehaviorConfig,
}

impl<C: CompletionClient + 'static> FanOutCoordinator<C> {
    pub fn new(client: Arc<C>, behavior: BehaviorConfig) -> Self {
        Self { client, behavior }
    }

    /// Query every worker concurrently with `prompt` (already assembled).
    ///
    /// Progress snapshots are emitted on every tick while any worker is
    /// outstanding; the ticker is dropped as soon as the last one settles.
    pub async fn run(
        &self,
        workers: &[ModelDescriptor],
        prompt: &str,
        progress: &dyn ProgressNotifier,
    ) -> FanOutResult {
        info!("Dispatching {} workers", workers.len());
        progress.on_phase_start(&Phase::Workers, workers.len());

        let worker_prompt = PromptTemplate::worker_prompt(prompt);
        debug!("Worker prompt is {} bytes", worker_prompt.len());

        let started = Instant::now();
        let mut board = ProgressBoard::new(workers);
        let mut settled: HashMap<String, WorkerResult> = HashMap::with_capacity(workers.len());
        let mut join_set = JoinSet::new();

        for model in workers {
            let client = Arc::clone(&self.client);
            let model = model.clone();
            let prompt = worker_prompt.clone();
            let deadline = self.behavior.worker_deadline;
            let policy = self.behavior.timeout_policy;

            join_set.spawn(async move {
                let backend_id = model.backend_id.clone();
                let call = async move { client.complete(&backend_id, &prompt).await };
                let outcome = match run_with_deadline(call, deadline, policy).await {
                    Ok(text) => WorkerOutcome::Completed(text),
                    Err(DeadlineError::Timeout(_)) => WorkerOutcome::TimedOut,
                    Err(e) => WorkerOutcome::Failed(e.to_string()),
                };
                (model, outcome, started.elapsed())
            });
        }

        let period = self.behavior.progress_interval.max(MIN_PROGRESS_INTERVAL);
        let mut ticker = tokio::time::interval_at(started + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                joined = join_set.join_next() => match joined {
                    Some(Ok((model, outcome, elapsed))) => {
                        match &outcome {
                            WorkerOutcome::Completed(_) => {
                                info!("Worker {} responded after {:?}", model, elapsed)
                            }
                            WorkerOutcome::TimedOut => {
                                warn!("Worker {} timed out after {:?}", model, elapsed)
                            }
                            WorkerOutcome::Failed(e) => warn!("Worker {} failed: {}", model, e),
                        }
                        if board.settle(&model.key, &outcome, elapsed) {
                            progress.on_worker_settled(&model, &outcome);
                            settled.insert(
                                model.key.clone(),
                                WorkerResult::new(model, outcome, elapsed.as_millis() as u64),
                            );
                        }
                    }
                    Some(Err(e)) => warn!("Worker task join error: {}", e),
                    None => break,
                },
                _ = ticker.tick() => {
                    progress.on_snapshot(&board.snapshot(started.elapsed()));
                }
            }
        }
        drop(ticker);

        let elapsed = started.elapsed();
        let results: Vec<WorkerResult> = workers
            .iter()
            .map(|model| {
                settled.remove(&model.key).unwrap_or_else(|| {
                    let outcome = WorkerOutcome::Failed("worker task ended unexpectedly".into());
                    board.settle(&model.key, &outcome, elapsed);
                    progress.on_worker_settled(model, &outcome);
                    WorkerResult::new(model.clone(), outcome, elapsed.as_millis() as u64)
                })
            })
            .collect();

        progress.on_phase_complete(&Phase::Workers);

        FanOutResult {
            results,
            snapshot: board.snapshot(elapsed),
        }
    }
}
