//! Error types for pipeline operations

use std::path::PathBuf;
use synopsis_domain::LedgerViolation;
use thiserror::Error;

/// Errors that can occur while building or processing the ledger
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Source directory missing or unreadable
    #[error("Cannot read directory {}: {source}", path.display())]
    Scan {
        /// Directory that was scanned
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Ledger storage layer error
    #[error("Store error: {0}")]
    Store(String),

    /// Rows break the ledger invariants
    #[error("Invalid ledger: {0}")]
    Ledger(#[from] LedgerViolation),

    /// A document's text could not be extracted
    #[error("Extraction failed: {0}")]
    Extraction(String),

    /// The language model call failed
    #[error("Summarization failed: {0}")]
    Summarization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
