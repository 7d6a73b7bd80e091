//! Synopsis LLM Provider Layer
//!
//! Pluggable LLM provider implementations.
//!
//! # Architecture
//!
//! This crate provides implementations of the `LlmProvider` trait from `synopsis-domain`.
//! It supports multiple LLM backends with a common interface.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OpenAiProvider`: OpenAI-compatible Chat Completions API
//!
//! # Examples
//!
//! ```
//! use synopsis_llm::MockProvider;
//! use synopsis_domain::traits::LlmProvider;
//! use synopsis_domain::ChatMessage;
//!
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = provider.complete(&[ChatMessage::user("test prompt")]).unwrap();
//! assert_eq!(result.as_deref(), Some("Hello from LLM!"));
//! ```

#![warn(missing_docs)]

pub mod openai;

use synopsis_domain::traits::LlmProvider as LlmProviderTrait;
use synopsis_domain::{ChatMessage, Role};
use std::sync::{Arc, Mutex};
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

    /// Request did not finish within the configured timeout
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// API key missing or rejected
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

/// Canned reply returned by [`MockProvider`]
#[derive(Debug, Clone, PartialEq, Eq)]
enum MockReply {
    Text(String),
    Empty,
    Error,
}

/// Mock LLM provider for deterministic testing
///
/// This provider returns pre-configured replies without making any network calls.
/// Replies are chosen by matching a key against the last user message: the first
/// registered key contained in that message wins, otherwise the default reply is used.
/// Every request is recorded for later inspection.
///
/// # Examples
///
/// ```
/// use synopsis_llm::MockProvider;
/// use synopsis_domain::traits::LlmProvider;
/// use synopsis_domain::ChatMessage;
///
/// let mut provider = MockProvider::new("fallback");
/// provider.add_response("invoice", "An invoice.");
/// provider.add_empty("blank");
///
/// let reply = provider.complete(&[ChatMessage::user("the invoice text")]).unwrap();
/// assert_eq!(reply.as_deref(), Some("An invoice."));
///
/// let reply = provider.complete(&[ChatMessage::user("blank page")]).unwrap();
/// assert_eq!(reply, None);
/// assert_eq!(provider.call_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_reply: MockReply,
    responses: Arc<Mutex<Vec<(String, MockReply)>>>,
    requests: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self::with_default(MockReply::Text(response.into()))
    }

    /// Create a MockProvider that answers every prompt with no usable result
    pub fn empty() -> Self {
        Self::with_default(MockReply::Empty)
    }

    /// Create a MockProvider that fails every prompt
    pub fn failing() -> Self {
        Self::with_default(MockReply::Error)
    }

    fn with_default(default_reply: MockReply) -> Self {
        Self {
            default_reply,
            responses: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answer prompts containing `key` with the given response
    pub fn add_response(&mut self, key: impl Into<String>, response: impl Into<String>) {
        self.push_reply(key.into(), MockReply::Text(response.into()));
    }

    /// Answer prompts containing `key` with no usable result
    pub fn add_empty(&mut self, key: impl Into<String>) {
        self.push_reply(key.into(), MockReply::Empty);
    }

    /// Configure to return an error for prompts containing `key`
    pub fn add_error(&mut self, key: impl Into<String>) {
        self.push_reply(key.into(), MockReply::Error);
    }

    fn push_reply(&mut self, key: String, reply: MockReply) {
        self.responses.lock().unwrap().push((key, reply));
    }

    /// Get the number of times complete was called
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Reset the call count and forget recorded requests
    pub fn reset_call_count(&self) {
        self.requests.lock().unwrap().clear();
    }

    /// All recorded requests, oldest first
    pub fn requests(&self) -> Vec<Vec<ChatMessage>> {
        self.requests.lock().unwrap().clone()
    }

    /// Content of the last user message of every recorded request
    pub fn user_prompts(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter_map(|messages| last_user_content(messages).map(str::to_string))
            .collect()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

fn last_user_content(messages: &[ChatMessage]) -> Option<&str> {
    messages
        .iter()
        .rev()
        .find(|message| message.role == Role::User)
        .map(|message| message.content.as_str())
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn complete(&self, messages: &[ChatMessage]) -> Result<Option<String>, Self::Error> {
        self.requests.lock().unwrap().push(messages.to_vec());

        let prompt = last_user_content(messages).unwrap_or_default();
        let responses = self.responses.lock().unwrap();
        let reply = responses
            .iter()
            .find(|(key, _)| prompt.contains(key.as_str()))
            .map(|(_, reply)| reply)
            .unwrap_or(&self.default_reply);

        match reply {
            MockReply::Text(text) => Ok(Some(text.clone())),
            MockReply::Empty => Ok(None),
            MockReply::Error => Err(LlmError::Other("Mock error".to_string())),
        }
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
