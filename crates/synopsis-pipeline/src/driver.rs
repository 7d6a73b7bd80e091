//! Summarization Driver: fills in summaries for pending ledger rows

use crate::error::PipelineError;
use crate::prompt::PromptBuilder;
use crate::report::{RowFailure, RunReport};
use crate::PipelineConfig;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::time::Instant;
use synopsis_domain::traits::{LedgerStore, LlmProvider, TextExtractor};
use synopsis_domain::{Ledger, PLACEHOLDER_SUMMARY};
use tracing::{debug, info, warn};

/// Drives one summarization pass over a ledger
///
/// Rows are processed one at a time in ledger order. The ledger is saved
/// after every `checkpoint_every` completed rows and once more at the end
/// if anything is still unsaved.
///
/// # Examples
///
/// ```no_run
/// use synopsis_pipeline::{PipelineConfig, SummarizationDriver};
/// use synopsis_extractor::DocumentExtractor;
/// use synopsis_ledger::CsvLedgerStore;
/// use synopsis_llm::MockProvider;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let driver = SummarizationDriver::new(
///     MockProvider::new("A short summary."),
///     DocumentExtractor::new(),
///     "directives",
///     PipelineConfig::default(),
/// );
/// let report = driver.run(&CsvLedgerStore::new("directives/summaries.csv"))?;
/// println!("{}", report.summary());
/// # Ok(())
/// # }
/// ```
pub struct SummarizationDriver<L, X> {
    provider: L,
    extractor: X,
    directory: PathBuf,
    config: PipelineConfig,
}

impl<L, X> SummarizationDriver<L, X>
where
    L: LlmProvider,
    L::Error: Display,
    X: TextExtractor,
    X::Error: Display,
{
    /// Create a driver for documents in `directory`
    pub fn new(
        provider: L,
        extractor: X,
        directory: impl Into<PathBuf>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            provider,
            extractor,
            directory: directory.into(),
            config,
        }
    }

    /// The language model provider
    pub fn provider(&self) -> &L {
        &self.provider
    }

    /// The source directory
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// The pipeline configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Summarize a single document
    ///
    /// `Ok(None)` means the model gave no usable text and the caller should
    /// store the placeholder summary.
    pub fn summarize_file(&self, path: &Path) -> Result<Option<String>, PipelineError> {
        let text = self
            .extractor
            .extract_text(path)
            .map_err(|e| PipelineError::Extraction(e.to_string()))?;

        let messages = PromptBuilder::new(&text)
            .with_char_budget(self.config.char_budget)
            .build();
        debug!(
            "Prompting {} for {} ({} chars extracted)",
            self.provider.model_name(),
            path.display(),
            text.chars().count()
        );

        let reply = self
            .provider
            .complete(&messages)
            .map_err(|e| PipelineError::Summarization(e.to_string()))?;

        Ok(reply.filter(|summary| !summary.trim().is_empty()))
    }

    /// File names of rows still waiting for a summary, in ledger order
    pub fn pending<S>(&self, store: &S) -> Result<Vec<String>, PipelineError>
    where
        S: LedgerStore,
        S::Error: Display,
    {
        let ledger = load(store)?;
        Ok(ledger
            .pending_indices()
            .into_iter()
            .filter_map(|index| ledger.row(index).map(|row| row.file.clone()))
            .collect())
    }

    /// Run one pass over the persisted ledger
    pub fn run<S>(&self, store: &S) -> Result<RunReport, PipelineError>
    where
        S: LedgerStore,
        S::Error: Display,
    {
        self.config.validate().map_err(PipelineError::Config)?;

        let start = Instant::now();
        let mut ledger = load(store)?;
        let pending = ledger.pending_indices();

        let mut report = RunReport::new();
        report.pending = pending.len();
        info!(
            "Summarizing {} of {} row(s) from {}",
            pending.len(),
            ledger.len(),
            store.location().display()
        );

        let mut unsaved = 0;
        for index in pending {
            let Some(file) = ledger.row(index).map(|row| row.file.clone()) else {
                continue;
            };

            let path = self.directory.join(&file);
            if !path.exists() {
                warn!("File not found: {}", path.display());
                report.record_missing(path);
                continue;
            }

            let summary = match self.summarize_file(&path) {
                Ok(Some(summary)) => {
                    report.summarized += 1;
                    summary
                }
                Ok(None) => {
                    warn!("No summary returned for {}, storing placeholder", file);
                    report.placeholders += 1;
                    PLACEHOLDER_SUMMARY.to_string()
                }
                Err(e) => {
                    warn!("Skipping {}: {}", file, e);
                    report.record_failure(RowFailure::from_error(&file, &e));
                    continue;
                }
            };

            ledger.set_summary(index, summary);
            unsaved += 1;

            if self.config.checkpoint_every > 0 && unsaved >= self.config.checkpoint_every {
                save(store, &ledger)?;
                report.saves += 1;
                unsaved = 0;
            }
        }

        if unsaved > 0 {
            save(store, &ledger)?;
            report.saves += 1;
        }

        report.elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(
            "Pass complete: {} summarized, {} placeholder(s), {} missing, {} failed",
            report.summarized,
            report.placeholders,
            report.missing.len(),
            report.failures.len()
        );
        Ok(report)
    }
}

fn load<S>(store: &S) -> Result<Ledger, PipelineError>
where
    S: LedgerStore,
    S::Error: Display,
{
    store
        .load()
        .map_err(|e| PipelineError::Store(e.to_string()))
}

fn save<S>(store: &S, ledger: &Ledger) -> Result<(), PipelineError>
where
    S: LedgerStore,
    S::Error: Display,
{
    store
        .save(ledger)
        .map_err(|e| PipelineError::Store(e.to_string()))
}
