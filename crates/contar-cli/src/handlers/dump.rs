//! Dump command handler

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::StatusReporter;
use crate::DumpArgs;

/// Execute the dump command
///
/// Prints the store contents as pretty JSON, re-serialized through the
/// normalized snapshot so duplicate raw keys collapse. An absent store
/// dumps as an empty document.
///
/// # Errors
///
/// Returns an error when the store exists but cannot be parsed, or when
/// `--output` cannot be written.
pub fn execute_dump(config: &CliConfig, args: &DumpArgs) -> CliResult<()> {
    let store = super::store_from(args.file.as_deref());
    let loaded = store.load();
    if let Some(err) = loaded.error {
        return Err(err.into());
    }

    let json = serde_json::to_string_pretty(&loaded.snapshot)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, &json)?;
            let out =
                StatusReporter::new(config.color.should_color(), config.verbosity.is_quiet());
            out.success(&format!("tally written to {}", path.display()));
        }
        None => println!("{json}"),
    }
    Ok(())
}
