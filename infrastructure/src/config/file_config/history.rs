//! Submission history settings from TOML (`[history]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileHistoryConfig {
    pub enabled: bool,
    /// JSONL file; defaults to `<data dir>/godel-judge/history.jsonl`
    pub path: Option<PathBuf>,
}

impl Default for FileHistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}

impl FileHistoryConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("godel-judge").join("history.jsonl"))
    }

    /// Configured path, else the platform default
    pub fn resolve_path(&self) -> Option<PathBuf> {
        self.path.clone().or_else(Self::default_path)
    }
}
