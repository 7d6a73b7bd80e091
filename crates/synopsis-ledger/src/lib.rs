//! Synopsis Ledger Storage
//!
//! Implements the `LedgerStore` trait on top of a CSV file.
//!
//! # File format
//!
//! - Header row exactly `file,summary`
//! - One record per row, in ledger order, `\n`-terminated
//! - An empty `summary` field means the row is still pending
//!
//! Loading validates the file and fails fast on a wrong header, a record with
//! the wrong number of fields, an empty file name or a duplicated file name.
//! Saving writes a temporary file next to the ledger and renames it into
//! place, so the ledger on disk is always either the old or the new version.
//!
//! # Examples
//!
//! ```no_run
//! use synopsis_domain::traits::LedgerStore;
//! use synopsis_domain::Ledger;
//! use synopsis_ledger::CsvLedgerStore;
//!
//! let store = CsvLedgerStore::new("directives/summaries.csv");
//! if !store.exists() {
//!     store.save(&Ledger::from_files(["a.pdf"]).unwrap()).unwrap();
//! }
//! let ledger = store.load().unwrap();
//! println!("{} rows", ledger.len());
//! ```

#![warn(missing_docs)]

use std::fs;
use std::path::{Path, PathBuf};
use synopsis_domain::traits::LedgerStore;
use synopsis_domain::{Ledger, LedgerViolation, Row};
use tempfile::Builder;
use thiserror::Error;
use tracing::debug;

/// Column names of the ledger file, in order
pub const HEADER: [&str; 2] = ["file", "summary"];

/// Errors that can occur during ledger storage operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Header row is not `file,summary`
    #[error("Unexpected ledger header: {0}")]
    Schema(String),

    /// Rows break the ledger invariants
    #[error("Invalid ledger: {0}")]
    Invalid(#[from] LedgerViolation),
}

/// CSV-backed implementation of LedgerStore
#[derive(Debug, Clone)]
pub struct CsvLedgerStore {
    path: PathBuf,
}

impl CsvLedgerStore {
    /// Create a store for the ledger file at `path`
    ///
    /// Nothing is read or written until `load` or `save` is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the ledger file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Ledger, LedgerError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)?;

        let headers = reader.headers()?;
        if headers.iter().ne(HEADER.iter().copied()) {
            return Err(LedgerError::Schema(format!(
                "expected '{}', found '{}'",
                HEADER.join(","),
                headers.iter().collect::<Vec<_>>().join(",")
            )));
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let file = record.get(0).unwrap_or_default();
            let summary = record.get(1).filter(|s| !s.is_empty());
            rows.push(Row {
                file: file.to_string(),
                summary: summary.map(str::to_string),
            });
        }

        let ledger = Ledger::from_rows(rows)?;
        debug!("Loaded {} row(s) from {}", ledger.len(), self.path.display());
        Ok(ledger)
    }

    fn write(&self, ledger: &Ledger) -> Result<(), LedgerError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut builder = Builder::new();
        // A new ledger gets the same mode a plain create would (0666 less umask)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(0o666));
        }
        let staged = builder.tempfile_in(dir)?;

        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .terminator(csv::Terminator::Any(b'\n'))
                .from_writer(staged.as_file());
            writer.write_record(HEADER)?;
            for row in ledger {
                writer.write_record([row.file.as_str(), row.summary.as_deref().unwrap_or("")])?;
            }
            writer.flush()?;
        }
        staged.as_file().sync_all()?;

        // Keep the permissions of the file being replaced
        if let Ok(metadata) = fs::metadata(&self.path) {
            fs::set_permissions(staged.path(), metadata.permissions())?;
        }

        staged.persist(&self.path).map_err(|e| LedgerError::Io(e.error))?;
        debug!("Saved {} row(s) to {}", ledger.len(), self.path.display());
        Ok(())
    }
}

impl LedgerStore for CsvLedgerStore {
    type Error = LedgerError;

    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn load(&self) -> Result<Ledger, Self::Error> {
        self.read()
    }

    fn save(&self, ledger: &Ledger) -> Result<(), Self::Error> {
        self.write(ledger)
    }

    fn location(&self) -> &Path {
        &self.path
    }
}
