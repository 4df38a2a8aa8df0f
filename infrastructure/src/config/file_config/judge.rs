//! Judge and worker selection from TOML (`[judge]` section)
//!
//! ```toml
//! [judge]
//! model = "gpt"
//! worker_count = 3
//! workers = ["claude", "grok", "kimi"]
//! extended_report = false
//! ```

use godel_domain::DEFAULT_WORKER_KEYS;
use serde::{Deserialize, Serialize};

/// Default judge key
pub const DEFAULT_JUDGE: &str = "gpt";

/// Default number of workers
pub const DEFAULT_WORKER_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileJudgeConfig {
    /// Registry key of the judge
    pub model: String,
    /// How many workers answer each prompt
    pub worker_count: usize,
    /// Preferred workers; reconciled against the judge and the count at startup
    pub workers: Vec<String>,
    /// Include the prelude in every report
    pub extended_report: bool,
}

impl Default for FileJudgeConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_JUDGE.to_string(),
            worker_count: DEFAULT_WORKER_COUNT,
            workers: DEFAULT_WORKER_KEYS.iter().map(|k| k.to_string()).collect(),
            extended_report: false,
        }
    }
}
