//! OpenAI Provider Implementation
//!
//! Provides integration with the OpenAI Chat Completions API, or any server
//! exposing the same `/chat/completions` route.
//!
//! # Features
//!
//! - Async HTTP communication behind the synchronous `LlmProvider` trait
//! - Configurable endpoint, model and timeout
//! - Bounded request time: an expired request is an error, never a hang
//!
//! # Examples
//!
//! ```no_run
//! use synopsis_llm::OpenAiProvider;
//! use synopsis_domain::traits::LlmProvider;
//! use synopsis_domain::ChatMessage;
//!
//! let provider = OpenAiProvider::new("sk-...", "gpt-3.5-turbo")
//!     .unwrap()
//!     .with_timeout_secs(30);
//! let reply = provider.complete(&[ChatMessage::user("Say hello")]).unwrap();
//! println!("{:?}", reply);
//! ```

use crate::LlmError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use synopsis_domain::traits::LlmProvider as LlmProviderTrait;
use synopsis_domain::ChatMessage;
use tokio::runtime::Runtime;
use tokio::time::timeout;
use tracing::debug;

/// Default OpenAI API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

/// Default chat model
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Default timeout for LLM requests (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// OpenAI Chat Completions provider
///
/// Owns a single-threaded tokio runtime so callers stay synchronous. The API
/// key is passed in explicitly; the provider never reads the environment.
pub struct OpenAiProvider {
    endpoint: String,
    model: String,
    api_key: String,
    timeout_secs: u64,
    client: reqwest::Client,
    runtime: Runtime,
}

/// Request body for the chat completions API
#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Response from the chat completions API
#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider
    ///
    /// # Parameters
    ///
    /// - `api_key`: bearer token sent with every request
    /// - `model`: Model to use (e.g., "gpt-3.5-turbo")
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client or the runtime cannot be built.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| LlmError::Communication(format!("Failed to build HTTP client: {}", e)))?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to start runtime: {}", e)))?;

        Ok(Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: model.into(),
            api_key: api_key.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            client,
            runtime,
        })
    }

    /// Point the provider at a different API base URL
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the request timeout in seconds
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Base URL requests are sent to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Request timeout in seconds
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Send a chat exchange and return the first choice's content
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The server is unreachable or answers with an error status
    /// - The request exceeds the timeout
    /// - The response body is not a chat completion
    pub async fn complete_async(&self, messages: &[ChatMessage]) -> Result<Option<String>, LlmError> {
        timeout(Duration::from_secs(self.timeout_secs), self.send(messages))
            .await
            .map_err(|_| LlmError::Timeout(self.timeout_secs))?
    }

    async fn send(&self, messages: &[ChatMessage]) -> Result<Option<String>, LlmError> {
        let url = format!("{}/chat/completions", self.endpoint.trim_end_matches('/'));

        let request_body = ChatCompletionRequest {
            model: &self.model,
            messages: messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
        };

        debug!("POST {} ({} messages)", url, messages.len());

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(match status {
                reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                    LlmError::Authentication(format!("HTTP {}: {}", status, error_text))
                }
                reqwest::StatusCode::NOT_FOUND => LlmError::ModelNotAvailable(self.model.clone()),
                reqwest::StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimitExceeded,
                _ => LlmError::Communication(format!("HTTP {}: {}", status, error_text)),
            });
        }

        let completion = response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        Ok(completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content))
    }
}

impl fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .finish_non_exhaustive()
    }
}

impl LlmProviderTrait for OpenAiProvider {
    type Error = LlmError;

    fn complete(&self, messages: &[ChatMessage]) -> Result<Option<String>, Self::Error> {
        self.runtime.block_on(self.complete_async(messages))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
