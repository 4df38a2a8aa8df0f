//! OpenRouter chat completions client.

use super::error::OpenRouterError;
use crate::config::{DEFAULT_OPENROUTER_BASE_URL, FileOpenRouterConfig};
use async_trait::async_trait;
use godel_application::{CompletionClient, CompletionError};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const PROVIDER: &str = "OpenRouter";

/// Client for `POST {base_url}/chat/completions`
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    client: reqwest::Client,
    base_url: String,
}

impl OpenRouterClient {
    /// Create from an API key with the default endpoint.
    pub fn new(api_key: impl Into<String>) -> Result<Self, OpenRouterError> {
        Self::with_config(
            api_key,
            DEFAULT_OPENROUTER_BASE_URL,
            None,
            Some("Gödel Judge".to_string()),
        )
    }

    /// Create from the `[openrouter]` config section.
    ///
    /// Fails before any request is made when no API key can be resolved.
    pub fn from_config(config: &FileOpenRouterConfig) -> Result<Self, OpenRouterError> {
        let api_key = config
            .resolve_api_key()
            .ok_or_else(|| OpenRouterError::MissingApiKey {
                env: config.api_key_env.clone(),
            })?;
        Self::with_config(
            api_key,
            config.base_url.clone(),
            config.referer.clone(),
            Some(config.app_title.clone()),
        )
    }

    /// Create with custom configuration.
    pub fn with_config(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        referer: Option<String>,
        app_title: Option<String>,
    ) -> Result<Self, OpenRouterError> {
        let api_key = api_key.into();
        let base_url = base_url.into().trim_end_matches('/').to_string();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let auth_value = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|_| OpenRouterError::InvalidApiKey)?;
        headers.insert(AUTHORIZATION, auth_value);

        if let Some(r) = referer.as_deref()
            && let Ok(v) = HeaderValue::from_str(r)
        {
            headers.insert("HTTP-Referer", v);
        }

        // from_bytes keeps a non-ASCII title such as "Gödel Judge"
        if let Some(t) = app_title.as_deref()
            && let Ok(v) = HeaderValue::from_bytes(t.as_bytes())
        {
            headers.insert("X-Title", v);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self { client, base_url })
    }

    fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

// =============================================================================
// API TYPES
// =============================================================================

#[derive(Serialize)]
struct ChatApiRequest<'a> {
    model: &'a str,
    messages: [ApiMessage<'a>; 1],
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatApiResponse {
    choices: Option<Vec<Choice>>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct ApiError {
    message: Option<String>,
}

// =============================================================================
// COMPLETION CLIENT IMPL
// =============================================================================

#[async_trait]
impl CompletionClient for OpenRouterClient {
    async fn complete(&self, model_id: &str, prompt: &str) -> Result<String, CompletionError> {
        debug!("[OpenRouter] Calling model: {}", model_id);

        let request = ChatApiRequest {
            model: model_id,
            messages: [ApiMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(self.chat_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        let status = response.status();
        debug!("[OpenRouter] Response status for {}: {}", model_id, status);

        let body = response
            .text()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .ok()
                .and_then(|env| env.error)
                .and_then(|e| e.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
                });
            warn!("[OpenRouter] Error for {}: {}", model_id, message);
            return Err(CompletionError::Api {
                provider: PROVIDER.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatApiResponse = serde_json::from_str(&body).map_err(|e| {
            warn!("[OpenRouter] Unparseable body for {}: {}", model_id, e);
            CompletionError::InvalidResponse(PROVIDER.to_string())
        })?;

        let message = parsed
            .choices
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.message)
            .ok_or_else(|| {
                warn!("[OpenRouter] Invalid response structure for {}", model_id);
                CompletionError::InvalidResponse(PROVIDER.to_string())
            })?;

        debug!("[OpenRouter] Successfully received data for {}", model_id);
        Ok(message.content.unwrap_or_default())
    }
}
