//! OpenAI Provider Implementation
//!
//! Provides integration with the OpenAI chat-completions API.
//!
//! # Features
//!
//! - Async HTTP communication
//! - Configurable endpoint, model and timeout
//! - JSON-object response mode for structured extraction
//!
//! Requests are sent once; retrying is left to the caller issuing a new request.
//!
//! # Examples
//!
//! ```no_run
//! use kitgen_llm::OpenAiProvider;
//!
//! let provider = OpenAiProvider::new("sk-...", "gpt-4o-mini").unwrap();
//! ```

use crate::LlmError;
use async_trait::async_trait;
use kitgen_domain::traits::LlmProvider as LlmProviderTrait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default OpenAI API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

/// Default model for field extraction
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default timeout for LLM requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// OpenAI API provider
pub struct OpenAiProvider {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
}

/// Request body for the chat-completions API
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

/// Response from the chat-completions API
#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider against the default endpoint
    ///
    /// # Errors
    ///
    /// Returns error if the API key is empty or the HTTP client cannot be built
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        Self::with_options(api_key, model, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS)
    }

    /// Create a provider with an explicit endpoint and timeout
    pub fn with_options(
        api_key: impl Into<String>,
        model: impl Into<String>,
        endpoint: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LlmError::Authentication("API key is not configured".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key,
            client,
        })
    }

    /// Model used for completions
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str, json_mode: bool) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.endpoint);

        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            response_format: json_mode.then_some(ResponseFormat { kind: "json_object" }),
        };

        debug!("Sending request to {} (model {})", url, self.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout
                } else {
                    LlmError::Communication(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(LlmError::Authentication(format!("HTTP {}", status)));
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimitExceeded);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LlmError::ModelNotAvailable(self.model.clone()));
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Communication(format!("HTTP {}: {}", status, error_text)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| LlmError::Communication(format!("Failed to read response: {}", e)))?;

        parse_chat_response(&body)
    }
}

/// Pull the first choice's content out of a chat-completions body
fn parse_chat_response(body: &str) -> Result<String, LlmError> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

    if let Some(error) = parsed.error {
        let message = if error.message.is_empty() {
            "Unknown error".to_string()
        } else {
            error.message
        };
        return Err(LlmError::InvalidResponse(message));
    }

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| LlmError::InvalidResponse("Empty response".to_string()))
}

#[async_trait]
impl LlmProviderTrait for OpenAiProvider {
    type Error = LlmError;

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.complete(prompt, false).await
    }

    async fn generate_json(&self, prompt: &str) -> Result<String, Self::Error> {
        self.complete(prompt, true).await
    }
}
