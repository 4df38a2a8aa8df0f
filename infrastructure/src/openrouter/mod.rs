//! OpenRouter adapter
//!
//! Implements the [`CompletionClient`](godel_application::CompletionClient)
//! port against the OpenRouter chat completions API.

mod client;
mod error;

pub use client::OpenRouterClient;
pub use error::OpenRouterError;
