//! Contador: command-line companion for contar tally stores
//!
//! ## Usage
//!
//! ```bash
//! contador summary                # Print the last run's category totals
//! contador report --force        # Write the Markdown report regardless of spread
//! contador dump                  # Print the raw store JSON
//! contador reset                 # Delete the store file
//! ```

use clap::Parser;
use contador::{handlers, Cli, CliConfig, CliResult, Commands, Verbosity};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);
    init_tracing(config.verbosity);

    match cli.command {
        Commands::Summary(args) => handlers::execute_summary(&config, &args),
        Commands::Report(args) => handlers::execute_report(&config, &args),
        Commands::Dump(args) => handlers::execute_dump(&config, &args),
        Commands::Reset(args) => handlers::execute_reset(&config, &args),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        match cli.verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    };

    CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(cli.color.clone().into())
}

fn init_tracing(verbosity: Verbosity) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(verbosity.default_filter())),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
