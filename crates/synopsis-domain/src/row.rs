//! Row module - a single document's entry in the ledger

/// Summary stored when the language model returned no usable result.
///
/// A row carrying this text counts as complete and is skipped by later runs.
pub const PLACEHOLDER_SUMMARY: &str = "Summary not available.";

/// One document tracked by the ledger
///
/// The `file` is a name relative to the source directory. A row is pending
/// while `summary` is `None` and complete once it holds any text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// File name, relative to the source directory
    pub file: String,

    /// Summary text, absent until produced
    pub summary: Option<String>,
}

impl Row {
    /// Create a pending row for the given file
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            summary: None,
        }
    }

    /// Create a row that already carries a summary
    pub fn with_summary(file: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            summary: Some(summary.into()),
        }
    }

    /// Whether this row still needs a summary
    pub fn is_pending(&self) -> bool {
        self.summary.is_none()
    }

    /// Whether this row holds the placeholder rather than a real summary
    pub fn is_placeholder(&self) -> bool {
        self.summary.as_deref() == Some(PLACEHOLDER_SUMMARY)
    }
}
