//! Run command implementation.

use crate::cli::RunArgs;
use crate::commands::init::created_message;
use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::output::Formatter;
use synopsis_domain::traits::LlmProvider;
use synopsis_extractor::DocumentExtractor;
use synopsis_ledger::CsvLedgerStore;
use synopsis_llm::OpenAiProvider;
use synopsis_pipeline::{InitOutcome, LedgerInitializer, Pipeline};
use tracing::info;

/// Execute the run command.
pub fn execute_run(args: RunArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let dir = config.source_dir()?;
    let store = CsvLedgerStore::new(config.ledger_path());

    if args.dry_run {
        let files = LedgerInitializer::new(dir).preview(&store, config.pipeline.rescan)?;
        println!("{}", formatter.format_preview(&files)?);
        return Ok(());
    }

    let provider = OpenAiProvider::new(config.api_key()?, &config.llm.model)?
        .with_endpoint(&config.llm.endpoint)
        .with_timeout_secs(config.llm.timeout_secs);
    let pipeline = Pipeline::new(
        provider,
        DocumentExtractor::new(),
        dir,
        config.pipeline.clone(),
    );
    info!(
        "Summarizing {} with {}",
        pipeline.initializer().directory().display(),
        pipeline.driver().provider().model_name()
    );

    let outcome = pipeline.run(&store)?;
    info!("\n{}", outcome.report.summary());

    match formatter.format() {
        OutputFormat::Json => println!("{}", formatter.format_pass_json(&outcome)?),
        OutputFormat::Quiet => {}
        OutputFormat::Table => {
            if let InitOutcome::Created { rows } = outcome.init {
                println!("{}", created_message(&store, rows, pipeline.initializer()));
            }
            if !outcome.added.is_empty() {
                println!(
                    "{}",
                    formatter.info(&format!(
                        "Added {} new file(s) to the ledger",
                        outcome.added.len()
                    ))
                );
            }
            for path in &outcome.report.missing {
                println!("File not found: {}", path.display());
            }
            for failure in &outcome.report.failures {
                println!(
                    "{}",
                    formatter.warning(&format!(
                        "Could not summarize {} ({}): {}",
                        failure.file,
                        failure.stage.as_str(),
                        failure.reason
                    ))
                );
            }
            println!("Ledger updated with summaries.");
        }
    }

    Ok(())
}
