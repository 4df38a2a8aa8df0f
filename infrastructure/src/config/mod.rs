//! Configuration file loading for godel-judge
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./godel.toml` or `./.godel.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/godel-judge/config.toml`
//! 4. Default values

mod file_config;
mod loader;

pub use file_config::{
    DEFAULT_JUDGE, DEFAULT_OPENROUTER_BASE_URL, DEFAULT_WORKER_COUNT, FileBehaviorConfig,
    FileConfig, FileHistoryConfig, FileJudgeConfig, FileModelEntry, FileOpenRouterConfig,
    FileOutputConfig, build_registry,
};
pub use loader::ConfigLoader;
