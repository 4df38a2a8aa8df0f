//! Model registry: which models can be asked to work or judge

use super::error::{DomainError, SelectionError};
use serde::{Deserialize, Serialize};

/// A model that can participate as worker or judge (Value Object)
///
/// `key` is the short identifier used on the command line and in the
/// judge's bracketed tags (`[gpt]`, `[gemini,claude]`). `backend_id` is the
/// identifier sent to the completion API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub key: String,
    #[serde(default)]
    pub provider: String,
    pub display_name: String,
    pub backend_id: String,
}

impl ModelDescriptor {
    pub fn new(
        key: impl Into<String>,
        provider: impl Into<String>,
        display_name: impl Into<String>,
        backend_id: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            provider: provider.into(),
            display_name: display_name.into(),
            backend_id: backend_id.into(),
        }
    }

    /// `"<display name> (<key>)"`, as used in report headers
    pub fn labelled(&self) -> String {
        format!("{} ({})", self.display_name, self.key)
    }
}

impl std::fmt::Display for ModelDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key)
    }
}

/// Ordered, immutable set of [`ModelDescriptor`]s keyed by short key.
///
/// Order matters: it is the order in which free slots are filled when a
/// worker selection is reconciled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRegistry {
    models: Vec<ModelDescriptor>,
}

impl ModelRegistry {
    /// Build a registry, rejecting empty input and duplicate keys.
    pub fn new(models: Vec<ModelDescriptor>) -> Result<Self, DomainError> {
        if models.is_empty() {
            return Err(DomainError::EmptyRegistry);
        }
        for (i, model) in models.iter().enumerate() {
            if models[..i].iter().any(|m| m.key == model.key) {
                return Err(DomainError::DuplicateRegistryKey(model.key.clone()));
            }
        }
        Ok(Self { models })
    }

    /// The models shipped with godel-judge (OpenRouter identifiers)
    pub fn builtin() -> Self {
        Self {
            models: vec![
                ModelDescriptor::new("gpt", "OpenAI", "ChatGPT 5.1", "openai/gpt-5.1"),
                ModelDescriptor::new(
                    "gemini",
                    "Google",
                    "Gemini 3 Pro Preview",
                    "google/gemini-3-pro-preview",
                ),
                ModelDescriptor::new(
                    "claude",
                    "Anthropic",
                    "Claude 4.5 Sonnet",
                    "anthropic/claude-sonnet-4.5",
                ),
                ModelDescriptor::new("grok", "Grok", "Grok 4", "x-ai/grok-4"),
                ModelDescriptor::new(
                    "kimi",
                    "Kimi",
                    "Kimi K2 Thinking",
                    "moonshotai/kimi-k2-thinking",
                ),
                ModelDescriptor::new(
                    "qwen",
                    "Qwen",
                    "Qwen3 VL 235B A22B Thinking",
                    "qwen/qwen3-vl-235b-a22b-thinking",
                ),
            ],
        }
    }

    pub fn get(&self, key: &str) -> Option<&ModelDescriptor> {
        self.models.iter().find(|m| m.key == key)
    }

    /// Look up a key, failing with [`SelectionError::UnknownModel`]
    pub fn require(&self, key: &str) -> Result<&ModelDescriptor, SelectionError> {
        self.get(key)
            .ok_or_else(|| SelectionError::UnknownModel(key.to_string()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModelDescriptor> {
        self.models.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(|m| m.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Keys that may serve as workers under the given judge, in registry order
    pub fn available_workers<'a>(&'a self, judge: &'a str) -> impl Iterator<Item = &'a str> {
        self.keys().filter(move |k| *k != judge)
    }

    /// Largest worker count the registry can satisfy (everyone but the judge)
    pub fn max_workers(&self) -> usize {
        self.models.len().saturating_sub(1)
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
