//! Outcome of one summarization pass

use crate::error::PipelineError;
use std::path::PathBuf;

/// Step of row processing that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureStage {
    /// Reading the document's text
    Extraction,

    /// Calling the language model
    Summarization,
}

impl FailureStage {
    /// Stage name for display
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureStage::Extraction => "extraction",
            FailureStage::Summarization => "summarization",
        }
    }
}

/// A row that could not be completed in this pass
///
/// The row stays pending and is retried by the next pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFailure {
    /// File name from the ledger
    pub file: String,

    /// Where processing stopped
    pub stage: FailureStage,

    /// Human-readable cause
    pub reason: String,
}

impl RowFailure {
    /// Classify a row-level pipeline error
    pub(crate) fn from_error(file: &str, error: &PipelineError) -> Self {
        let stage = match error {
            PipelineError::Extraction(_) => FailureStage::Extraction,
            _ => FailureStage::Summarization,
        };
        Self {
            file: file.to_string(),
            stage,
            reason: error.to_string(),
        }
    }
}

/// Counters and diagnostics collected during a pass
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Rows without a summary when the pass started
    pub pending: usize,

    /// Rows that received a real summary
    pub summarized: usize,

    /// Rows that received the placeholder summary
    pub placeholders: usize,

    /// Files listed in the ledger but absent on disk
    pub missing: Vec<PathBuf>,

    /// Rows that failed to extract or summarize
    pub failures: Vec<RowFailure>,

    /// Number of times the ledger was written
    pub saves: usize,

    /// Wall-clock duration of the pass in milliseconds
    pub elapsed_ms: u64,
}

impl RunReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a file that no longer exists
    pub fn record_missing(&mut self, path: PathBuf) {
        self.missing.push(path);
    }

    /// Record a row that could not be completed
    pub fn record_failure(&mut self, failure: RowFailure) {
        self.failures.push(failure);
    }

    /// Rows completed in this pass, placeholders included
    pub fn completed(&self) -> usize {
        self.summarized + self.placeholders
    }

    /// Rows for which a summarization attempt was made
    pub fn attempted(&self) -> usize {
        self.completed()
            + self
                .failures
                .iter()
                .filter(|f| f.stage == FailureStage::Summarization)
                .count()
    }

    /// Whether nothing was missing and nothing failed
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.failures.is_empty()
    }

    /// Generate a summary report of the pass
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Summarization Pass".to_string(),
            "==================".to_string(),
            format!("Pending at start: {}", self.pending),
            format!("Summarized: {}", self.summarized),
            format!("Placeholders: {}", self.placeholders),
            format!("Missing files: {}", self.missing.len()),
            format!("Failures: {}", self.failures.len()),
            format!("Ledger saves: {}", self.saves),
            format!("Elapsed: {}ms", self.elapsed_ms),
        ];

        if !self.failures.is_empty() {
            lines.push(String::new());
            lines.push("Failed rows:".to_string());
            for failure in &self.failures {
                lines.push(format!(
                    "  {} ({}): {}",
                    failure.file,
                    failure.stage.as_str(),
                    failure.reason
                ));
            }
        }

        lines.join("\n")
    }
}
