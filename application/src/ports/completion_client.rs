//! Completion client port
//!
//! Defines the interface for asking a hosted model for a text completion.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during a completion call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transport error: {0}")]
    Transport(String),

    /// Non-success HTTP status; `message` is the provider's nested error
    /// message when one was returned, otherwise the status text.
    #[error("{provider} API error: {message}")]
    Api {
        provider: String,
        status: u16,
        message: String,
    },

    #[error("Invalid response from {0} API")]
    InvalidResponse(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Client for a remote text-completion API
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send `prompt` as a single user message to `model_id` and return the
    /// generated text.
    async fn complete(&self, model_id: &str, prompt: &str) -> Result<String, CompletionError>;
}
