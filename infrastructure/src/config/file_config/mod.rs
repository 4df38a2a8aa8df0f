//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod behavior;
mod history;
mod judge;
mod models;
mod openrouter;
mod output;

pub use behavior::FileBehaviorConfig;
pub use history::FileHistoryConfig;
pub use judge::{DEFAULT_JUDGE, DEFAULT_WORKER_COUNT, FileJudgeConfig};
pub use models::{FileModelEntry, build_registry};
pub use openrouter::{DEFAULT_OPENROUTER_BASE_URL, FileOpenRouterConfig};
pub use output::FileOutputConfig;

use godel_domain::{ConfigIssue, ConfigIssueCode, ModelRegistry};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Judge and worker selection
    pub judge: FileJudgeConfig,
    /// Deadlines and progress timing
    pub behavior: FileBehaviorConfig,
    /// OpenRouter connection
    pub openrouter: FileOpenRouterConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Submission history
    pub history: FileHistoryConfig,
    /// Registry override (`[[models]]`)
    pub models: Vec<FileModelEntry>,
}

impl FileConfig {
    /// The model registry this configuration describes
    pub fn registry(&self) -> ModelRegistry {
        build_registry(&self.models).0
    }

    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Checks, in order:
    /// 1. The `[[models]]` registry override
    /// 2. The judge key and the worker count against that registry
    /// 3. Preferred worker keys (unknown ones are dropped at startup)
    /// 4. `[behavior]` durations and timeout policy
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let (registry, mut issues) = build_registry(&self.models);

        // 2. Judge and count
        if !registry.contains(&self.judge.model) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::UnknownModel {
                    field: "judge.model".to_string(),
                    key: self.judge.model.clone(),
                },
                format!("judge.model: unknown model '{}'", self.judge.model),
            ));
        }

        let count = self.judge.worker_count;
        let max = registry.max_workers();
        if count == 0 || count > max {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidWorkerCount { count, max },
                format!("judge.worker_count: must be between 1 and {max}, got {count}"),
            ));
        } else if count != 3 && count != 5 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::UntunedWorkerCount { count },
                format!(
                    "judge.worker_count: {count} workers use a simple majority quorum; \
                     3 and 5 have tuned thresholds"
                ),
            ));
        }

        // 3. Preferred workers
        for key in &self.judge.workers {
            if !registry.contains(key) {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::UnknownModel {
                        field: "judge.workers".to_string(),
                        key: key.clone(),
                    },
                    format!("judge.workers: unknown model '{key}' will be ignored"),
                ));
            }
        }

        // 4. Behavior
        issues.extend(self.behavior.duration_issues());
        issues.extend(self.behavior.parse_timeout_policy().1);

        issues
    }
}
