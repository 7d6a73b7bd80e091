//! Synopsis Pipeline
//!
//! The incremental summarization pipeline: discover documents, keep a ledger
//! of them, and fill in a summary for every row that lacks one.
//!
//! # Overview
//!
//! Two components run one after the other, on one thread:
//!
//! - **Ledger Initializer**: scans the source directory and writes a ledger
//!   with one pending row per supported document. It only creates a ledger
//!   when none exists; with `rescan` enabled it also appends documents that
//!   appeared since.
//! - **Summarization Driver**: loads the ledger and, for every pending row,
//!   extracts the document's text, truncates it to the character budget,
//!   asks the language model for a summary and writes the result back.
//!
//! Rows whose file is gone are reported and left pending. Rows that fail to
//! extract or summarize are reported and left pending, and the pass goes on.
//! The ledger is saved after completed rows (see `checkpoint_every`), so an
//! interrupted pass keeps the work already done.
//!
//! # Usage
//!
//! ```no_run
//! use synopsis_pipeline::{Pipeline, PipelineConfig};
//! use synopsis_extractor::DocumentExtractor;
//! use synopsis_ledger::CsvLedgerStore;
//! use synopsis_llm::OpenAiProvider;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = OpenAiProvider::new("sk-...", "gpt-3.5-turbo")?;
//! let store = CsvLedgerStore::new("directives/summaries.csv");
//! let pipeline = Pipeline::new(
//!     provider,
//!     DocumentExtractor::new(),
//!     "directives",
//!     PipelineConfig::default(),
//! );
//!
//! let outcome = pipeline.run(&store)?;
//! println!("{}", outcome.report.summary());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! ```toml
//! [pipeline]
//! char_budget = 1000
//! checkpoint_every = 1
//! rescan = true
//! ```

#![warn(missing_docs)]

mod config;
mod driver;
mod error;
mod initializer;
mod pipeline;
pub mod prompt;
mod report;

pub use config::PipelineConfig;
pub use driver::SummarizationDriver;
pub use error::PipelineError;
pub use initializer::{InitOutcome, LedgerInitializer};
pub use pipeline::{PassOutcome, Pipeline};
pub use prompt::PromptBuilder;
pub use report::{FailureStage, RowFailure, RunReport};
