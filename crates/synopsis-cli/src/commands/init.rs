//! Init command implementation.

use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use synopsis_ledger::CsvLedgerStore;
use synopsis_pipeline::{InitOutcome, LedgerInitializer};

/// Execute the init command.
///
/// Creates the ledger when it is missing. An existing ledger is only
/// extended with new documents, and only when rescanning is enabled.
pub fn execute_init(config: &Config, formatter: &Formatter) -> Result<()> {
    let dir = config.source_dir()?;
    let store = CsvLedgerStore::new(config.ledger_path());
    let initializer = LedgerInitializer::new(dir);

    match initializer.create_if_missing(&store)? {
        InitOutcome::Created { rows } => {
            println!("{}", created_message(&store, rows, &initializer));
        }
        InitOutcome::Existing if config.pipeline.rescan => {
            let added = initializer.sync(&store)?;
            if added.is_empty() {
                println!(
                    "{}",
                    formatter.info(&format!("Ledger {} is up to date", store.path().display()))
                );
            } else {
                println!(
                    "{}",
                    formatter.success(&format!(
                        "Added {} new file(s) to {}",
                        added.len(),
                        store.path().display()
                    ))
                );
            }
        }
        InitOutcome::Existing => {
            println!(
                "{}",
                formatter.info(&format!("Ledger {} already exists", store.path().display()))
            );
        }
    }

    Ok(())
}

/// Line printed when a new ledger is written.
pub fn created_message(store: &CsvLedgerStore, rows: usize, initializer: &LedgerInitializer) -> String {
    format!(
        "Created ledger {} with {} file(s) from {}",
        store.path().display(),
        rows,
        initializer.directory().display()
    )
}
