//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No ledger has been created yet
    #[error("No ledger at {0}. Run 'synopsis init' first")]
    MissingLedger(String),

    /// Pipeline error
    #[error(transparent)]
    Pipeline(#[from] synopsis_pipeline::PipelineError),

    /// Ledger storage error
    #[error("Ledger error: {0}")]
    Ledger(#[from] synopsis_ledger::LedgerError),

    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(#[from] synopsis_llm::LlmError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
