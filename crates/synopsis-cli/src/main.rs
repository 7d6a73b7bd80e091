//! Synopsis CLI - Batch summarization of PDF and DOCX documents.

use clap::Parser;
use synopsis_cli::cli::RunArgs;
use synopsis_cli::commands;
use synopsis_cli::{Cli, Command, Config, Formatter};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> synopsis_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    synopsis_cli::init_tracing(cli.log_level());

    // Configuration errors are fatal before any ledger work
    let config = Config::load(cli.config.as_deref())?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.output.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.output.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        None => commands::execute_run(RunArgs::default(), &config, &formatter)?,
        Some(Command::Run(args)) => commands::execute_run(args, &config, &formatter)?,
        Some(Command::Init) => commands::execute_init(&config, &formatter)?,
        Some(Command::Status) => commands::execute_status(&config, &formatter)?,
    }

    Ok(())
}
