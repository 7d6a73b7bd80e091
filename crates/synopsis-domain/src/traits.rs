//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{ChatMessage, Ledger};
use std::path::Path;

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (synopsis-llm)
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Send a chat exchange and return the model's reply
    ///
    /// `Ok(None)` means the call succeeded but produced no usable text.
    fn complete(&self, messages: &[ChatMessage]) -> Result<Option<String>, Self::Error>;

    /// Identifier of the model answering requests
    fn model_name(&self) -> &str;
}

/// Trait for turning a document on disk into plain text
///
/// Implemented by the infrastructure layer (synopsis-extractor)
pub trait TextExtractor {
    /// Error type for extraction operations
    type Error;

    /// Extract the document's text in reading order
    fn extract_text(&self, path: &Path) -> Result<String, Self::Error>;
}

/// Trait for persisting the ledger
///
/// Implemented by the infrastructure layer (synopsis-ledger)
pub trait LedgerStore {
    /// Error type for store operations
    type Error;

    /// Whether a ledger has been persisted yet
    fn exists(&self) -> bool;

    /// Load the persisted ledger
    fn load(&self) -> Result<Ledger, Self::Error>;

    /// Replace the persisted ledger with the given one
    fn save(&self, ledger: &Ledger) -> Result<(), Self::Error>;

    /// Where the ledger lives
    fn location(&self) -> &Path;
}
