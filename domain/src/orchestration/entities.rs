//! Orchestration domain entities

use crate::core::error::SelectionError;
use crate::core::model::{ModelDescriptor, ModelRegistry};
use serde::{Deserialize, Serialize};

/// Workers used when nothing else has been chosen
pub const DEFAULT_WORKER_KEYS: [&str; 3] = ["claude", "grok", "kimi"];

/// Phase of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Every selected worker answers the prompt
    Workers,
    /// The judge synthesizes the worker answers
    Judge,
}

impl Phase {
    pub fn as_str(&self) -> &str {
        match self {
            Phase::Workers => "workers",
            Phase::Judge => "judge",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Phase::Workers => "Worker Fan-Out",
            Phase::Judge => "Judge Synthesis",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A validated judge + workers combination (Entity)
///
/// Invariants: the judge is not a worker, no worker appears twice, every
/// key exists in the registry and there are exactly `worker_count` workers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerSelection {
    judge: ModelDescriptor,
    workers: Vec<ModelDescriptor>,
}

impl WorkerSelection {
    /// Validate a requested selection against the registry.
    pub fn validate(
        registry: &ModelRegistry,
        judge: &str,
        workers: &[String],
        worker_count: usize,
    ) -> Result<Self, SelectionError> {
        let max = registry.max_workers();
        if worker_count == 0 || worker_count > max {
            return Err(SelectionError::InvalidWorkerCount {
                count: worker_count,
                max,
            });
        }

        let judge = registry.require(judge)?.clone();

        let mut resolved: Vec<ModelDescriptor> = Vec::with_capacity(workers.len());
        for key in workers {
            let model = registry.require(key)?;
            if model.key == judge.key {
                return Err(SelectionError::JudgeSelectedAsWorker(key.clone()));
            }
            if resolved.iter().any(|m| m.key == model.key) {
                return Err(SelectionError::DuplicateWorker(key.clone()));
            }
            resolved.push(model.clone());
        }

        if resolved.len() != worker_count {
            return Err(SelectionError::WorkerCountMismatch {
                expected: worker_count,
                actual: resolved.len(),
            });
        }

        Ok(Self {
            judge,
            workers: resolved,
        })
    }

    pub fn judge(&self) -> &ModelDescriptor {
        &self.judge
    }

    pub fn workers(&self) -> &[ModelDescriptor] {
        &self.workers
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_valid_selection() {
        let registry = ModelRegistry::builtin();
        let sel =
            WorkerSelection::validate(&registry, "gpt", &keys(&DEFAULT_WORKER_KEYS), 3).unwrap();
        assert_eq!(sel.judge().key, "gpt");
        let workers: Vec<_> = sel.workers().iter().map(|m| m.key.as_str()).collect();
        assert_eq!(workers, vec!["claude", "grok", "kimi"]);
        assert_eq!(sel.worker_count(), 3);
    }

    #[test]
    fn test_count_mismatch_rejected() {
        let registry = ModelRegistry::builtin();
        let err =
            WorkerSelection::validate(&registry, "gpt", &keys(&["claude", "grok"]), 3).unwrap_err();
        assert_eq!(
            err,
            SelectionError::WorkerCountMismatch {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_judge_as_worker_rejected() {
        let registry = ModelRegistry::builtin();
        let err = WorkerSelection::validate(&registry, "claude", &keys(&DEFAULT_WORKER_KEYS), 3)
            .unwrap_err();
        assert_eq!(err, SelectionError::JudgeSelectedAsWorker("claude".into()));
    }

    #[test]
    fn test_duplicate_and_unknown_rejected() {
        let registry = ModelRegistry::builtin();
        let err = WorkerSelection::validate(&registry, "gpt", &keys(&["grok", "grok", "kimi"]), 3)
            .unwrap_err();
        assert_eq!(err, SelectionError::DuplicateWorker("grok".into()));

        let err = WorkerSelection::validate(&registry, "gpt", &keys(&["grok", "llama", "kimi"]), 3)
            .unwrap_err();
        assert_eq!(err, SelectionError::UnknownModel("llama".into()));

        let err = WorkerSelection::validate(&registry, "nobody", &keys(&DEFAULT_WORKER_KEYS), 3)
            .unwrap_err();
        assert_eq!(err, SelectionError::UnknownModel("nobody".into()));
    }

    #[test]
    fn test_worker_count_bounds() {
        let registry = ModelRegistry::builtin();
        assert_eq!(
            WorkerSelection::validate(&registry, "gpt", &[], 0).unwrap_err(),
            SelectionError::InvalidWorkerCount { count: 0, max: 5 }
        );
        assert_eq!(
            WorkerSelection::validate(&registry, "gpt", &[], 6).unwrap_err(),
            SelectionError::InvalidWorkerCount { count: 6, max: 5 }
        );
    }

    #[test]
    fn test_phase_names() {
        assert_eq!(Phase::Workers.as_str(), "workers");
        assert_eq!(Phase::Judge.to_string(), "Judge Synthesis");
    }
}
