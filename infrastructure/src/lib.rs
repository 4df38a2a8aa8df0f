//! Infrastructure layer for godel-judge
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod files;
pub mod history;
pub mod openrouter;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileBehaviorConfig, FileConfig, FileHistoryConfig, FileJudgeConfig,
    FileModelEntry, FileOpenRouterConfig, FileOutputConfig,
};
pub use files::{FileError, ReportWriter, read_attachments, report_filename};
pub use history::JsonlHistoryStore;
pub use openrouter::{OpenRouterClient, OpenRouterError};
