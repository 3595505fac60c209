//! Kitgen LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `kitgen-domain`, used to turn
//! the extracted contract segment into structured client data.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OpenAiProvider`: OpenAI chat-completions API integration
//!
//! # Examples
//!
//! ```
//! use kitgen_llm::MockProvider;
//!
//! let provider = MockProvider::new(r#"{"nome_completo": "A", "qualificacao": "B"}"#);
//! assert_eq!(provider.call_count(), 0);
//! assert!(provider.last_prompt().is_none());
//! ```

#![warn(missing_docs)]

pub mod openai;

use async_trait::async_trait;
use kitgen_domain::traits::LlmProvider as LlmProviderTrait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

pub use openai::OpenAiProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// API key rejected or missing
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Mock LLM provider for deterministic testing
///
/// This provider returns pre-configured responses without making any network calls.
/// Clones share their response table, call count and prompt log.
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, String>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    call_count: Arc<AtomicUsize>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        lock(&self.responses).insert(prompt.into(), response.into());
    }

    /// Configure to return an error for a specific prompt
    pub fn add_error(&mut self, prompt: impl Into<String>) {
        lock(&self.responses).insert(prompt.into(), "ERROR".to_string());
    }

    /// Get the number of times the provider was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        self.call_count.store(0, Ordering::SeqCst);
    }

    /// The most recent prompt received
    pub fn last_prompt(&self) -> Option<String> {
        lock(&self.prompts).last().cloned()
    }

    fn respond(&self, prompt: &str) -> Result<String, LlmError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        lock(&self.prompts).push(prompt.to_string());

        let responses = lock(&self.responses);
        if let Some(response) = responses.get(prompt) {
            if response == "ERROR" {
                return Err(LlmError::Other("Mock error".to_string()));
            }
            return Ok(response.clone());
        }

        Ok(self.default_response.clone())
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.respond(prompt)
    }

    async fn generate_json(&self, prompt: &str) -> Result<String, Self::Error> {
        self.respond(prompt)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
