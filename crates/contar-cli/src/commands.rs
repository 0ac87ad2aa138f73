//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Contador: inspect and manage contar log call tally stores
#[derive(Parser, Debug)]
#[command(name = "contador")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the tally summary for the last recorded run
    Summary(SummaryArgs),

    /// Write the Markdown tally report
    Report(ReportArgs),

    /// Print the raw tally store as JSON
    Dump(DumpArgs),

    /// Delete the tally store file
    Reset(ResetArgs),
}

/// Arguments for the summary command
#[derive(Parser, Debug)]
pub struct SummaryArgs {
    /// Tally store file (defaults to CONTAR_TALLY_FILE or the system temp dir)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Category to highlight with its top message (first two are honored)
    #[arg(long, value_name = "CATEGORY")]
    pub highlight: Vec<String>,
}

/// Arguments for the report command
#[derive(Parser, Debug)]
pub struct ReportArgs {
    /// Tally store file (defaults to CONTAR_TALLY_FILE or the system temp dir)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Output directory for the report
    #[arg(short, long, default_value = "target/contar")]
    pub output: PathBuf,

    /// Ranked messages to list per category
    #[arg(long, default_value = "5")]
    pub top: usize,

    /// Write the report even when the tally spans too few files
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the dump command
#[derive(Parser, Debug)]
pub struct DumpArgs {
    /// Tally store file (defaults to CONTAR_TALLY_FILE or the system temp dir)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Write the JSON to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the reset command
#[derive(Parser, Debug)]
pub struct ResetArgs {
    /// Tally store file (defaults to CONTAR_TALLY_FILE or the system temp dir)
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

/// Color output argument
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
