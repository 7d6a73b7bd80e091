//! Ledger Initializer: discovers documents and seeds the ledger

use crate::error::PipelineError;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use synopsis_domain::traits::LedgerStore;
use synopsis_domain::{DocumentKind, Ledger, Row};
use tracing::{info, warn};

/// What `create_if_missing` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// A new ledger was written with this many rows
    Created {
        /// Rows in the new ledger
        rows: usize,
    },

    /// A ledger already existed and was left alone
    Existing,
}

/// Scans a source directory for supported documents
///
/// # Examples
///
/// ```no_run
/// use synopsis_pipeline::LedgerInitializer;
///
/// let initializer = LedgerInitializer::new("directives");
/// let files = initializer.scan().unwrap();
/// println!("{} document(s)", files.len());
/// ```
#[derive(Debug, Clone)]
pub struct LedgerInitializer {
    directory: PathBuf,
}

impl LedgerInitializer {
    /// Create an initializer for the given source directory
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// The source directory
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// List supported documents in the directory, sorted by name
    ///
    /// Only regular files (or symlinks to them) with a supported extension
    /// are listed. Subdirectories are not descended into.
    pub fn scan(&self) -> Result<Vec<String>, PipelineError> {
        let scan_error = |source| PipelineError::Scan {
            path: self.directory.clone(),
            source,
        };

        let mut files = Vec::new();
        for entry in fs::read_dir(&self.directory).map_err(scan_error)? {
            let entry = entry.map_err(scan_error)?;
            let path = entry.path();
            if !path.is_file() || DocumentKind::from_path(&path).is_none() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => files.push(name),
                Err(name) => warn!("Skipping non UTF-8 file name {:?}", name),
            }
        }

        files.sort();
        Ok(files)
    }

    /// Write a ledger with one pending row per document, unless one exists
    pub fn create_if_missing<S>(&self, store: &S) -> Result<InitOutcome, PipelineError>
    where
        S: LedgerStore,
        S::Error: Display,
    {
        if store.exists() {
            return Ok(InitOutcome::Existing);
        }

        let ledger = Ledger::from_files(self.scan()?)?;
        store
            .save(&ledger)
            .map_err(|e| PipelineError::Store(e.to_string()))?;

        info!(
            "Created ledger {} with {} file(s) from {}",
            store.location().display(),
            ledger.len(),
            self.directory.display()
        );
        Ok(InitOutcome::Created { rows: ledger.len() })
    }

    /// Append pending rows for documents the ledger does not know yet
    ///
    /// Existing rows are never removed or reordered. Returns the added names.
    pub fn reconcile(&self, ledger: &mut Ledger) -> Result<Vec<String>, PipelineError> {
        let mut added = Vec::new();
        for file in self.scan()? {
            if ledger.contains(&file) {
                continue;
            }
            ledger.push(Row::new(file.clone()))?;
            added.push(file);
        }
        Ok(added)
    }

    /// Load the ledger, reconcile it with the directory and save it if it grew
    pub fn sync<S>(&self, store: &S) -> Result<Vec<String>, PipelineError>
    where
        S: LedgerStore,
        S::Error: Display,
    {
        let mut ledger = store
            .load()
            .map_err(|e| PipelineError::Store(e.to_string()))?;
        let added = self.reconcile(&mut ledger)?;
        if !added.is_empty() {
            store
                .save(&ledger)
                .map_err(|e| PipelineError::Store(e.to_string()))?;
            info!(
                "Added {} new file(s) to ledger {}",
                added.len(),
                store.location().display()
            );
        }
        Ok(added)
    }

    /// Files a pass would try to summarize, without writing anything
    ///
    /// With no ledger yet this is every supported document. Otherwise it is
    /// the pending rows, plus new documents when `rescan` is set.
    pub fn preview<S>(&self, store: &S, rescan: bool) -> Result<Vec<String>, PipelineError>
    where
        S: LedgerStore,
        S::Error: Display,
    {
        if !store.exists() {
            return self.scan();
        }

        let mut ledger = store
            .load()
            .map_err(|e| PipelineError::Store(e.to_string()))?;
        if rescan {
            self.reconcile(&mut ledger)?;
        }
        Ok(ledger
            .iter()
            .filter(|row| row.is_pending())
            .map(|row| row.file.clone())
            .collect())
    }
}
