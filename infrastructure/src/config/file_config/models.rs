//! Model registry overrides from TOML (`[[models]]` tables)
//!
//! When at least one `[[models]]` table is present it replaces the built-in
//! registry entirely:
//!
//! ```toml
//! [[models]]
//! key = "gpt"
//! id = "openai/gpt-5.1"
//! name = "ChatGPT 5.1"
//! provider = "OpenAI"
//! ```

use godel_domain::{ConfigIssue, ConfigIssueCode, ModelDescriptor, ModelRegistry};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileModelEntry {
    /// Short key used on the command line
    pub key: String,
    /// OpenRouter model identifier
    pub id: String,
    /// Display name (defaults to the key)
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
}

impl FileModelEntry {
    pub fn to_descriptor(&self) -> ModelDescriptor {
        ModelDescriptor::new(
            self.key.clone(),
            self.provider.clone().unwrap_or_default(),
            self.name.clone().unwrap_or_else(|| self.key.clone()),
            self.id.clone(),
        )
    }
}

/// Build the registry from `[[models]]`, falling back to the built-in one.
pub fn build_registry(entries: &[FileModelEntry]) -> (ModelRegistry, Vec<ConfigIssue>) {
    if entries.is_empty() {
        return (ModelRegistry::builtin(), vec![]);
    }

    if let Some(blank) = entries
        .iter()
        .find(|e| e.key.trim().is_empty() || e.id.trim().is_empty())
    {
        return (
            ModelRegistry::builtin(),
            vec![ConfigIssue::error(
                ConfigIssueCode::InvalidRegistry,
                format!(
                    "models: entry '{}' needs both a key and an id, using built-in models",
                    blank.key
                ),
            )],
        );
    }

    match ModelRegistry::new(entries.iter().map(FileModelEntry::to_descriptor).collect()) {
        Ok(registry) => (registry, vec![]),
        Err(e) => (
            ModelRegistry::builtin(),
            vec![ConfigIssue::error(
                ConfigIssueCode::InvalidRegistry,
                format!("models: {e}, using built-in models"),
            )],
        ),
    }
}
