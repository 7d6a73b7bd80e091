//! Status command implementation.

use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use synopsis_domain::traits::LedgerStore;
use synopsis_ledger::CsvLedgerStore;

/// Execute the status command.
pub fn execute_status(config: &Config, formatter: &Formatter) -> Result<()> {
    let store = CsvLedgerStore::new(config.ledger_path());
    if !store.exists() {
        return Err(CliError::MissingLedger(store.path().display().to_string()));
    }

    let ledger = store.load()?;
    println!("{}", formatter.format_ledger(&ledger)?);
    Ok(())
}
