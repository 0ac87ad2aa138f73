//! Contador CLI Library
//!
//! Command-line companion for contar tally stores: inspect, report on, and
//! reset the JSON tally files that instrumented test runs leave behind.

#![warn(missing_docs)]

mod commands;
mod config;
mod error;
pub mod handlers;
mod output;

pub use commands::{Cli, ColorArg, Commands, DumpArgs, ReportArgs, ResetArgs, SummaryArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::StatusReporter;
