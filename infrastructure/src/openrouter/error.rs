//! Error types for the OpenRouter adapter

use godel_application::CompletionError;
use thiserror::Error;

/// Errors raised while setting up the OpenRouter client
#[derive(Error, Debug)]
pub enum OpenRouterError {
    #[error("OpenRouter API key not found. Set {env} or openrouter.api_key in the config file.")]
    MissingApiKey { env: String },

    #[error("Invalid API key format")]
    InvalidApiKey,

    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),
}

impl From<OpenRouterError> for CompletionError {
    fn from(err: OpenRouterError) -> Self {
        CompletionError::Config(err.to_string())
    }
}
