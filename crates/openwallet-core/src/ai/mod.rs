//! Pluggable local model backend abstraction
//!
//! Backend-agnostic interface for the language model used by the trend
//! summarizer and the spending report generator. All backends run locally
//! (no cloud APIs).
//!
//! # Configuration
//!
//! Environment variables:
//! - `AI_BACKEND`: Backend to use (ollama, mock). Default: ollama
//! - `OLLAMA_HOST`: Ollama server URL (required for ollama backend)
//! - `OLLAMA_MODEL`: Default model name (default: qwen2.5:1.5b)

mod mock;
mod ollama;
pub mod parsing;

pub use mock::MockBackend;
pub use ollama::OllamaBackend;

use std::sync::OnceLock;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::ChatMessage;

/// Trait defining the interface for all model backends
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Run a chat completion and return only the generated text
    ///
    /// The transport returns the completion message alone; echoed prompt
    /// tokens are never part of the result.
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String>;

    /// Check if the backend is available
    async fn health_check(&self) -> bool;

    /// Get the model name (for response metadata)
    fn model(&self) -> &str;

    /// Get the host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete model client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum AIClient {
    /// Ollama backend (HTTP API)
    Ollama(OllamaBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl AIClient {
    /// Create a model client from environment variables
    ///
    /// Returns None if the required environment variables are not set.
    pub fn from_env() -> Option<Self> {
        let backend = std::env::var("AI_BACKEND").unwrap_or_else(|_| "ollama".to_string());

        match backend.to_lowercase().as_str() {
            "ollama" => OllamaBackend::from_env().map(AIClient::Ollama),
            "mock" => Some(AIClient::Mock(MockBackend::new())),
            _ => {
                tracing::warn!(backend = %backend, "Unknown AI_BACKEND, falling back to ollama");
                OllamaBackend::from_env().map(AIClient::Ollama)
            }
        }
    }

    /// Create an Ollama backend directly
    pub fn ollama(host: &str, model: &str) -> Self {
        AIClient::Ollama(OllamaBackend::new(host, model))
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        AIClient::Mock(MockBackend::new())
    }

    /// Create a new instance with a different model
    ///
    /// Used for per-request model override (e.g. the trends endpoint accepts
    /// a model name in the request body).
    pub fn with_model(&self, model: &str) -> Self {
        match self {
            AIClient::Ollama(b) => AIClient::Ollama(b.with_model(model)),
            AIClient::Mock(b) => AIClient::Mock(b.with_model(model)),
        }
    }
}

#[async_trait]
impl ModelBackend for AIClient {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String> {
        match self {
            AIClient::Ollama(b) => b.chat(messages).await,
            AIClient::Mock(b) => b.chat(messages).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            AIClient::Ollama(b) => b.health_check().await,
            AIClient::Mock(b) => b.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            AIClient::Ollama(b) => b.model(),
            AIClient::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            AIClient::Ollama(b) => b.host(),
            AIClient::Mock(b) => b.host(),
        }
    }
}

/// Process-wide model client, initialized from the environment on first use
///
/// The holder guarantees a single initialization even under concurrent first
/// callers; the client is retained for the remainder of the process lifetime
/// and never evicted. Read-only after initialization.
static MODEL_CLIENT: OnceLock<Option<AIClient>> = OnceLock::new();

/// Get the shared model client, lazily creating it from the environment
pub fn global_client() -> Option<&'static AIClient> {
    MODEL_CLIENT.get_or_init(AIClient::from_env).as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_client_mock() {
        let client = AIClient::mock();
        assert_eq!(client.model(), "mock");
        assert_eq!(client.host(), "mock://localhost");
    }

    #[tokio::test]
    async fn test_mock_health_check() {
        let client = AIClient::mock();
        assert!(client.health_check().await);
    }

    #[test]
    fn test_with_model_override() {
        let client = AIClient::mock().with_model("qwen2.5:7b");
        assert_eq!(client.model(), "qwen2.5:7b");
    }
}
