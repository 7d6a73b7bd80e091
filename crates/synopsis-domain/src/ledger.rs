//! Ledger module - the ordered record of documents and their summaries

use crate::row::Row;
use std::collections::HashSet;
use std::fmt;

/// Reasons a set of rows cannot form a ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerViolation {
    /// A row has an empty file name
    EmptyFileName {
        /// Position of the offending row
        index: usize,
    },

    /// The same file name appears twice
    DuplicateFile(String),
}

impl fmt::Display for LedgerViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerViolation::EmptyFileName { index } => {
                write!(f, "row {} has an empty file name", index)
            }
            LedgerViolation::DuplicateFile(file) => {
                write!(f, "file '{}' appears more than once", file)
            }
        }
    }
}

impl std::error::Error for LedgerViolation {}

/// Counts of rows by state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerStats {
    /// All rows
    pub total: usize,

    /// Rows with a real summary
    pub summarized: usize,

    /// Rows holding the placeholder summary
    pub placeholders: usize,

    /// Rows without a summary
    pub pending: usize,
}

/// Ordered set of rows keyed by file name
///
/// # Invariants
///
/// - File names are non-empty
/// - File names are unique
/// - Row order is preserved as given
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    rows: Vec<Row>,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from rows, enforcing the ledger invariants
    pub fn from_rows(rows: Vec<Row>) -> Result<Self, LedgerViolation> {
        let mut seen = HashSet::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            if row.file.is_empty() {
                return Err(LedgerViolation::EmptyFileName { index });
            }
            if !seen.insert(row.file.as_str()) {
                return Err(LedgerViolation::DuplicateFile(row.file.clone()));
            }
        }
        Ok(Self { rows })
    }

    /// Build a ledger of pending rows, one per file name
    pub fn from_files<I, S>(files: I) -> Result<Self, LedgerViolation>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_rows(files.into_iter().map(Row::new).collect())
    }

    /// Append a row at the end of the ledger
    pub fn push(&mut self, row: Row) -> Result<(), LedgerViolation> {
        if row.file.is_empty() {
            return Err(LedgerViolation::EmptyFileName {
                index: self.rows.len(),
            });
        }
        if self.contains(&row.file) {
            return Err(LedgerViolation::DuplicateFile(row.file));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the ledger has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows in ledger order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Iterate rows in ledger order
    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Whether a row exists for the given file
    pub fn contains(&self, file: &str) -> bool {
        self.rows.iter().any(|row| row.file == file)
    }

    /// Row at the given position
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Positions of pending rows, in ledger order
    pub fn pending_indices(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.is_pending())
            .map(|(index, _)| index)
            .collect()
    }

    /// Set the summary of the row at the given position
    ///
    /// Returns `false` if there is no such row.
    pub fn set_summary(&mut self, index: usize, summary: impl Into<String>) -> bool {
        match self.rows.get_mut(index) {
            Some(row) => {
                row.summary = Some(summary.into());
                true
            }
            None => false,
        }
    }

    /// Count rows by state
    pub fn stats(&self) -> LedgerStats {
        let mut stats = LedgerStats {
            total: self.rows.len(),
            ..LedgerStats::default()
        };
        for row in &self.rows {
            if row.is_pending() {
                stats.pending += 1;
            } else if row.is_placeholder() {
                stats.placeholders += 1;
            } else {
                stats.summarized += 1;
            }
        }
        stats
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
