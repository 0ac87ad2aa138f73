//! Reset command handler

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::StatusReporter;
use crate::ResetArgs;

/// Execute the reset command
///
/// Deletes the store file. Resetting a store that does not exist is fine.
///
/// # Errors
///
/// Returns an error when the file exists but cannot be removed.
pub fn execute_reset(config: &CliConfig, args: &ResetArgs) -> CliResult<()> {
    let store = super::store_from(args.file.as_deref());
    store.reset()?;

    let out = StatusReporter::new(config.color.should_color(), config.verbosity.is_quiet());
    out.success(&format!("tally store cleared: {}", store.path().display()));
    Ok(())
}
