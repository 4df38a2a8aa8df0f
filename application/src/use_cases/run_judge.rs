//! Run Judge use case
//!
//! Orchestrates a full submission: selection check, worker fan-out, quorum
//! gate, judge synthesis and report assembly.

use crate::config::BehaviorConfig;
use crate::ports::completion_client::{CompletionClient, CompletionError};
use crate::ports::history_store::{HistoryEntry, HistoryStore, NoHistory};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::deadline::{DeadlineError, run_with_deadline};
use crate::use_cases::fan_out::FanOutCoordinator;
use godel_domain::{
    ModelDescriptor, ModelRegistry, Phase, ProgressSnapshot, Prompt, PromptTemplate, QuorumGate,
    ReportBuilder, SelectionError, SubmissionResult, WorkerResult, WorkerSelection,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that end a submission
#[derive(Error, Debug)]
pub enum RunJudgeError {
    #[error(transparent)]
    Validation(#[from] SelectionError),

    #[error("Only {received} of {required} required workers completed; the judge was not run")]
    InsufficientWorkers {
        required: usize,
        received: usize,
        snapshot: ProgressSnapshot,
        /// Workers that timed out or failed, in selection order
        failures: Vec<WorkerResult>,
    },

    #[error("Judge {judge} failed: {source}")]
    JudgeFailed {
        judge: String,
        #[source]
        source: CompletionError,
    },

    #[error("Judge {judge} did not answer within {secs}s")]
    JudgeTimedOut { judge: String, secs: u64 },
}

impl RunJudgeError {
    /// True when no network call was made
    pub fn is_validation(&self) -> bool {
        matches!(self, RunJudgeError::Validation(_))
    }
}

/// Input for the RunJudge use case
#[derive(Debug, Clone)]
pub struct RunJudgeInput {
    pub prompt: Prompt,
    /// Registry key of the judge
    pub judge: String,
    /// Registry keys of the workers, in selection order
    pub workers: Vec<String>,
    pub worker_count: usize,
    /// Include the prelude (prompts and raw worker answers) in the report
    pub extended_report: bool,
}

impl RunJudgeInput {
    /// Worker count defaults to the number of workers given
    pub fn new(prompt: Prompt, judge: impl Into<String>, workers: Vec<String>) -> Self {
        Self {
            prompt,
            judge: judge.into(),
            worker_count: workers.len(),
            workers,
            extended_report: false,
        }
    }

    pub fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    pub fn with_extended_report(mut self, extended: bool) -> Self {
        self.extended_report = extended;
        self
    }
}

/// Use case for running a judged submission
pub struct RunJudgeUseCase<C: CompletionClient + 'static> {
    client: Arc<C>,
    registry: ModelRegistry,
    behavior: BehaviorConfig,
    history: Arc<dyn HistoryStore>,
}

impl<C: CompletionClient + 'static> RunJudgeUseCase<C> {
    pub fn new(client: Arc<C>, registry: ModelRegistry) -> Self {
        Self {
            client,
            registry,
            behavior: BehaviorConfig::default(),
            history: Arc::new(NoHistory),
        }
    }

    pub fn with_behavior(mut self, behavior: BehaviorConfig) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn with_history(mut self, history: Arc<dyn HistoryStore>) -> Self {
        self.history = history;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RunJudgeInput) -> Result<SubmissionResult, RunJudgeError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunJudgeInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<SubmissionResult, RunJudgeError> {
        let selection = WorkerSelection::validate(
            &self.registry,
            &input.judge,
            &input.workers,
            input.worker_count,
        )?;

        info!(
            "Starting submission: judge {} with {} workers",
            selection.judge(),
            selection.worker_count()
        );

        let assembled = input.prompt.assembled();
        debug!(
            "Assembled prompt is {} bytes ({} attachments)",
            assembled.len(),
            input.prompt.attachments().len()
        );

        // Phase 1: every worker answers independently
        let coordinator = FanOutCoordinator::new(Arc::clone(&self.client), self.behavior.clone());
        let fan_out = coordinator
            .run(selection.workers(), &assembled, progress)
            .await;

        // Quorum gate
        let gate = QuorumGate::new(selection.worker_count());
        let verdict = gate.evaluate(fan_out.success_count());
        if !verdict.is_met() {
            warn!(
                "Quorum not met: {} of {} required workers succeeded",
                verdict.received(),
                verdict.required()
            );
            return Err(RunJudgeError::InsufficientWorkers {
                required: verdict.required(),
                received: verdict.received(),
                failures: fan_out.unsucceeded().cloned().collect(),
                snapshot: fan_out.snapshot,
            });
        }
        info!(
            "Quorum met: {} of {} required workers succeeded",
            verdict.received(),
            verdict.required()
        );

        // Phase 2: judge synthesis
        let reports = fan_out.reports();
        let judge_prompt = PromptTemplate::judge_prompt(&assembled, &gate, &reports);
        debug!("Judge prompt is {} bytes", judge_prompt.len());

        let judge = selection.judge();
        progress.on_phase_start(&Phase::Judge, 1);
        let judged = self.call_judge(judge, judge_prompt).await;
        progress.on_judge_complete(judge, judged.is_ok());
        progress.on_phase_complete(&Phase::Judge);
        let judge_report = judged?;

        let worker_prompt = PromptTemplate::worker_prompt(&assembled);
        let mut builder = ReportBuilder::new(judge, &reports);
        if input.extended_report {
            builder = builder.with_prelude(&assembled, &worker_prompt);
        }
        let report = builder.build(&judge_report);

        let result = SubmissionResult {
            prompt: input.prompt.text().to_string(),
            judge: judge.clone(),
            worker_count: selection.worker_count(),
            judge_report,
            workers_used: reports,
            unsucceeded: fan_out.unsucceeded().cloned().collect(),
            quorum_met: true,
            report,
        };

        if let Err(e) = self.history.append(&HistoryEntry::from_result(&result)) {
            warn!("Failed to record submission in history: {}", e);
        }

        info!("Submission complete");
        Ok(result)
    }

    /// One judge call, bounded only when a judge timeout is configured
    async fn call_judge(
        &self,
        judge: &ModelDescriptor,
        prompt: String,
    ) -> Result<String, RunJudgeError> {
        info!("Asking judge {}", judge);
        let client = Arc::clone(&self.client);
        let backend_id = judge.backend_id.clone();

        let Some(limit) = self.behavior.judge_timeout else {
            return client
                .complete(&backend_id, &prompt)
                .await
                .map_err(|source| RunJudgeError::JudgeFailed {
                    judge: judge.key.clone(),
                    source,
                });
        };

        let call = async move { client.complete(&backend_id, &prompt).await };
        match run_with_deadline(call, limit, self.behavior.timeout_policy).await {
            Ok(text) => Ok(text),
            Err(DeadlineError::Timeout(d)) => Err(RunJudgeError::JudgeTimedOut {
                judge: judge.key.clone(),
                secs: d.as_secs(),
            }),
            Err(DeadlineError::Inner(source)) => Err(RunJudgeError::JudgeFailed {
                judge: judge.key.clone(),
                source,
            }),
            Err(DeadlineError::Panicked(msg)) => Err(RunJudgeError::JudgeFailed {
                judge: judge.key.clone(),
                source: CompletionError::Other(msg),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::history_store::HistoryError;
    use crate::use_cases::fan_out::tests::{RecordingProgress, Reply, ScriptedClient};
    use godel_domain::{Attachment, WorkerOutcome, WorkerStatus};
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct MemoryHistory {
        entries: Mutex<Vec<HistoryEntry>>,
    }

    impl HistoryStore for MemoryHistory {
        fn append(&self, entry: &HistoryEntry) -> Result<(), HistoryError> {
            self.entries.lock().unwrap().push(entry.clone());
            Ok(())
        }

        fn load(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
            Ok(self.entries.lock().unwrap().clone())
        }

        fn clear(&self) -> Result<(), HistoryError> {
            self.entries.lock().unwrap().clear();
            Ok(())
        }
    }

    struct BrokenHistory;

    impl HistoryStore for BrokenHistory {
        fn append(&self, _entry: &HistoryEntry) -> Result<(), HistoryError> {
            Err(HistoryError::Io(std::io::Error::other("disk full")))
        }

        fn load(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
            Ok(Vec::new())
        }

        fn clear(&self) -> Result<(), HistoryError> {
            Ok(())
        }
    }

    fn keys(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    fn prompt(text: &str) -> Prompt {
        Prompt::try_new(text).unwrap()
    }

    fn behavior() -> BehaviorConfig {
        BehaviorConfig::default().with_worker_deadline(Duration::from_secs(2))
    }

    fn judge_prompts(client: &ScriptedClient, registry: &ModelRegistry) -> Vec<String> {
        client.prompts_for(&registry.get("gpt").unwrap().backend_id)
    }

    #[tokio::test(start_paused = true)]
    async fn test_two_of_three_runs_judge_with_successful_answers_only() {
        let registry = ModelRegistry::builtin();
        let client = Arc::new(
            ScriptedClient::new()
                .reply(&registry, "claude", Reply::ok(100, "CLAUDE-ANSWER"))
                .reply(&registry, "grok", Reply::ok(200, "GROK-ANSWER"))
                .reply(&registry, "kimi", Reply::err(50, "HTTP 502"))
                .reply(&registry, "gpt", Reply::ok(300, "verdict")),
        );
        let use_case = RunJudgeUseCase::new(Arc::clone(&client), registry.clone())
            .with_behavior(behavior());

        let input = RunJudgeInput::new(prompt("Q"), "gpt", keys(&["claude", "grok", "kimi"]));
        let result = use_case.execute(input).await.unwrap();

        assert!(result.quorum_met);
        assert_eq!(result.judge_report, "verdict");
        assert_eq!(result.workers_used.len(), 2);
        assert_eq!(result.unsucceeded.len(), 1);
        assert_eq!(result.unsucceeded[0].key(), "kimi");

        let judge_prompt = &judge_prompts(&client, &registry)[0];
        assert!(judge_prompt.contains("CLAUDE-ANSWER"));
        assert!(judge_prompt.contains("GROK-ANSWER"));
        assert!(!judge_prompt.contains("HTTP 502"));
        assert!(!judge_prompt.contains("[kimi]"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_workers_fail_quorum_and_skip_judge() {
        let registry = ModelRegistry::builtin();
        let client = Arc::new(
            ScriptedClient::new()
                .reply(&registry, "claude", Reply::ok(10_000, "late"))
                .reply(&registry, "grok", Reply::ok(10_000, "late"))
                .reply(&registry, "kimi", Reply::ok(100, "fast"))
                .reply(&registry, "gpt", Reply::ok(10, "verdict")),
        );
        let use_case = RunJudgeUseCase::new(Arc::clone(&client), registry.clone())
            .with_behavior(behavior());

        let input = RunJudgeInput::new(prompt("Q"), "gpt", keys(&["claude", "grok", "kimi"]));
        let err = use_case.execute(input).await.unwrap_err();

        match err {
            RunJudgeError::InsufficientWorkers {
                required,
                received,
                snapshot,
                failures,
            } => {
                assert_eq!(required, 2);
                assert_eq!(received, 1);
                assert_eq!(snapshot.count(WorkerStatus::Timeout), 2);
                assert_eq!(snapshot.count(WorkerStatus::Completed), 1);
                assert!(failures.iter().all(|f| f.outcome == WorkerOutcome::TimedOut));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(judge_prompts(&client, &registry).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_three_of_five_is_not_enough() {
        let registry = ModelRegistry::builtin();
        let client = Arc::new(
            ScriptedClient::new()
                .reply(&registry, "claude", Reply::ok(10, "a"))
                .reply(&registry, "grok", Reply::ok(10, "b"))
                .reply(&registry, "kimi", Reply::ok(10, "c"))
                .reply(&registry, "gemini", Reply::err(10, "down"))
                .reply(&registry, "qwen", Reply::err(10, "down")),
        );
        let use_case =
            RunJudgeUseCase::new(Arc::clone(&client), registry.clone()).with_behavior(behavior());

        let input = RunJudgeInput::new(
            prompt("Q"),
            "gpt",
            keys(&["claude", "grok", "kimi", "gemini", "qwen"]),
        );
        let err = use_case.execute(input).await.unwrap_err();

        assert!(matches!(
            err,
            RunJudgeError::InsufficientWorkers {
                required: 4,
                received: 3,
                ..
            }
        ));
        assert!(judge_prompts(&client, &registry).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_count_mismatch_rejected_before_any_call() {
        let registry = ModelRegistry::builtin();
        let client = Arc::new(ScriptedClient::new());
        let use_case = RunJudgeUseCase::new(Arc::clone(&client), registry);

        let input = RunJudgeInput::new(prompt("Q"), "gpt", keys(&["claude", "grok"]))
            .with_worker_count(3);
        let err = use_case.execute(input).await.unwrap_err();

        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Please select exactly 3 workers. Currently selected: 2"
        );
        assert!(client.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_judge_failure_is_terminal() {
        let registry = ModelRegistry::builtin();
        let client = Arc::new(
            ScriptedClient::new()
                .reply(&registry, "claude", Reply::ok(10, "a"))
                .reply(&registry, "grok", Reply::ok(10, "b"))
                .reply(&registry, "kimi", Reply::ok(10, "c"))
                .reply(&registry, "gpt", Reply::err(10, "Rate limit exceeded")),
        );
        let history = Arc::new(MemoryHistory::default());
        let use_case = RunJudgeUseCase::new(Arc::clone(&client), registry.clone())
            .with_behavior(behavior())
            .with_history(history.clone());

        let input = RunJudgeInput::new(prompt("Q"), "gpt", keys(&["claude", "grok", "kimi"]));
        let err = use_case.execute(input).await.unwrap_err();

        assert!(matches!(err, RunJudgeError::JudgeFailed { .. }));
        assert_eq!(
            err.to_string(),
            "Judge gpt failed: OpenRouter API error: Rate limit exceeded"
        );
        assert_eq!(judge_prompts(&client, &registry).len(), 1);
        assert!(history.load().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_judge_is_unbounded_by_default() {
        let registry = ModelRegistry::builtin();
        let client = Arc::new(
            ScriptedClient::new()
                .reply(&registry, "claude", Reply::ok(10, "a"))
                .reply(&registry, "grok", Reply::ok(10, "b"))
                .reply(&registry, "kimi", Reply::ok(10, "c"))
                .reply(&registry, "gpt", Reply::ok(600_000, "slow verdict")),
        );
        let use_case = RunJudgeUseCase::new(client, registry).with_behavior(behavior());

        let input = RunJudgeInput::new(prompt("Q"), "gpt", keys(&["claude", "grok", "kimi"]));
        let result = use_case.execute(input).await.unwrap();
        assert_eq!(result.judge_report, "slow verdict");
    }

    #[tokio::test(start_paused = true)]
    async fn test_configured_judge_timeout() {
        let registry = ModelRegistry::builtin();
        let client = Arc::new(
            ScriptedClient::new()
                .reply(&registry, "claude", Reply::ok(10, "a"))
                .reply(&registry, "grok", Reply::ok(10, "b"))
                .reply(&registry, "kimi", Reply::ok(10, "c"))
                .reply(&registry, "gpt", Reply::ok(600_000, "slow verdict")),
        );
        let use_case = RunJudgeUseCase::new(client, registry)
            .with_behavior(behavior().with_judge_timeout_seconds(Some(60)));

        let input = RunJudgeInput::new(prompt("Q"), "gpt", keys(&["claude", "grok", "kimi"]));
        let err = use_case.execute(input).await.unwrap_err();
        assert!(matches!(
            err,
            RunJudgeError::JudgeTimedOut { ref judge, secs: 60 } if judge == "gpt"
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_prelude_only_with_extended_report() {
        let registry = ModelRegistry::builtin();
        let client = Arc::new(
            ScriptedClient::new()
                .reply(&registry, "claude", Reply::ok(10, "a"))
                .reply(&registry, "grok", Reply::ok(10, "b"))
                .reply(&registry, "kimi", Reply::ok(10, "c"))
                .reply(&registry, "gpt", Reply::ok(10, "JUDGE TEXT")),
        );
        let use_case = RunJudgeUseCase::new(client, registry).with_behavior(behavior());

        let plain = use_case
            .execute(RunJudgeInput::new(
                prompt("Q"),
                "gpt",
                keys(&["claude", "grok", "kimi"]),
            ))
            .await
            .unwrap();
        let extended = use_case
            .execute(
                RunJudgeInput::new(prompt("Q"), "gpt", keys(&["claude", "grok", "kimi"]))
                    .with_extended_report(true),
            )
            .await
            .unwrap();

        assert!(!plain.report.contains("## PRELUDE"));
        assert!(extended.report.contains("## PRELUDE"));
        assert!(
            extended
                .report
                .contains(&PromptTemplate::worker_prompt("Q"))
        );
        assert!(plain.report.ends_with("JUDGE TEXT"));
        assert!(extended.report.ends_with("JUDGE TEXT"));
        assert_eq!(plain.judge_report, extended.judge_report);
    }

    #[tokio::test(start_paused = true)]
    async fn test_attachments_reach_workers_and_history_keeps_typed_prompt() {
        let registry = ModelRegistry::builtin();
        let client = Arc::new(
            ScriptedClient::new()
                .reply(&registry, "claude", Reply::ok(10, "a"))
                .reply(&registry, "grok", Reply::ok(10, "b"))
                .reply(&registry, "gpt", Reply::ok(10, "verdict")),
        );
        let history = Arc::new(MemoryHistory::default());
        let use_case = RunJudgeUseCase::new(Arc::clone(&client), registry.clone())
            .with_behavior(behavior())
            .with_history(history.clone());

        let prompt = prompt("Review this").with_attachments(vec![Attachment::new(
            "main.rs",
            "fn main() {}",
        )]);
        let input = RunJudgeInput::new(prompt, "gpt", keys(&["claude", "grok"]));
        use_case.execute(input).await.unwrap();

        let claude_prompt = &client.prompts_for(&registry.get("claude").unwrap().backend_id)[0];
        assert!(claude_prompt.contains("--- Attached Files ---"));
        assert!(claude_prompt.contains("File: main.rs"));

        let entries = history.load().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].prompt, "Review this");
        assert_eq!(entries[0].judge, registry.get("gpt").unwrap().display_name);
        assert_eq!(entries[0].workers.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_history_failure_does_not_fail_submission() {
        let registry = ModelRegistry::builtin();
        let client = Arc::new(
            ScriptedClient::new()
                .reply(&registry, "claude", Reply::ok(10, "a"))
                .reply(&registry, "grok", Reply::ok(10, "b"))
                .reply(&registry, "kimi", Reply::ok(10, "c"))
                .reply(&registry, "gpt", Reply::ok(10, "verdict")),
        );
        let use_case = RunJudgeUseCase::new(client, registry)
            .with_behavior(behavior())
            .with_history(Arc::new(BrokenHistory));

        let input = RunJudgeInput::new(prompt("Q"), "gpt", keys(&["claude", "grok", "kimi"]));
        assert!(use_case.execute(input).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_judge_phase_is_reported() {
        let registry = ModelRegistry::builtin();
        let client = Arc::new(
            ScriptedClient::new()
                .reply(&registry, "claude", Reply::ok(10, "a"))
                .reply(&registry, "grok", Reply::ok(10, "b"))
                .reply(&registry, "kimi", Reply::ok(10, "c"))
                .reply(&registry, "gpt", Reply::ok(10, "verdict")),
        );
        let use_case = RunJudgeUseCase::new(client, registry).with_behavior(behavior());
        let progress = RecordingProgress::default();

        let input = RunJudgeInput::new(prompt("Q"), "gpt", keys(&["claude", "grok", "kimi"]));
        use_case.execute_with_progress(input, &progress).await.unwrap();

        let phases = progress.phases.lock().unwrap().clone();
        assert_eq!(
            phases,
            vec!["start:workers", "done:workers", "start:judge", "done:judge"]
        );
    }
}
