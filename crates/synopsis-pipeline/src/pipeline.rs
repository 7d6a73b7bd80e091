//! The full pass: initialize the ledger, then summarize what is pending

use crate::driver::SummarizationDriver;
use crate::error::PipelineError;
use crate::initializer::{InitOutcome, LedgerInitializer};
use crate::report::RunReport;
use crate::PipelineConfig;
use std::fmt::Display;
use std::path::PathBuf;
use synopsis_domain::traits::{LedgerStore, LlmProvider, TextExtractor};

/// Result of [`Pipeline::run`]
#[derive(Debug, Clone)]
pub struct PassOutcome {
    /// Whether the ledger was created by this pass
    pub init: InitOutcome,

    /// Documents appended to an existing ledger by rescanning
    pub added: Vec<String>,

    /// What the driver did
    pub report: RunReport,
}

/// Ledger Initializer followed by Summarization Driver
pub struct Pipeline<L, X> {
    initializer: LedgerInitializer,
    driver: SummarizationDriver<L, X>,
}

impl<L, X> Pipeline<L, X>
where
    L: LlmProvider,
    L::Error: Display,
    X: TextExtractor,
    X::Error: Display,
{
    /// Create a pipeline over the documents in `directory`
    pub fn new(
        provider: L,
        extractor: X,
        directory: impl Into<PathBuf>,
        config: PipelineConfig,
    ) -> Self {
        let directory = directory.into();
        Self {
            initializer: LedgerInitializer::new(directory.clone()),
            driver: SummarizationDriver::new(provider, extractor, directory, config),
        }
    }

    /// The Ledger Initializer
    pub fn initializer(&self) -> &LedgerInitializer {
        &self.initializer
    }

    /// The Summarization Driver
    pub fn driver(&self) -> &SummarizationDriver<L, X> {
        &self.driver
    }

    /// Create the ledger if needed, or append new documents when rescanning
    pub fn initialize<S>(&self, store: &S) -> Result<(InitOutcome, Vec<String>), PipelineError>
    where
        S: LedgerStore,
        S::Error: Display,
    {
        self.driver
            .config()
            .validate()
            .map_err(PipelineError::Config)?;

        let init = self.initializer.create_if_missing(store)?;
        let added = match init {
            InitOutcome::Existing if self.driver.config().rescan => self.initializer.sync(store)?,
            _ => Vec::new(),
        };
        Ok((init, added))
    }

    /// Files the next pass would try to summarize, without writing anything
    pub fn preview<S>(&self, store: &S) -> Result<Vec<String>, PipelineError>
    where
        S: LedgerStore,
        S::Error: Display,
    {
        self.initializer
            .preview(store, self.driver.config().rescan)
    }

    /// Run a complete pass
    pub fn run<S>(&self, store: &S) -> Result<PassOutcome, PipelineError>
    where
        S: LedgerStore,
        S::Error: Display,
    {
        let (init, added) = self.initialize(store)?;
        let report = self.driver.run(store)?;
        Ok(PassOutcome {
            init,
            added,
            report,
        })
    }
}
