//! Report command handler

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::StatusReporter;
use crate::ReportArgs;
use contar::{MarkdownReport, TallyConfig};

/// Execute the report command
///
/// Writes the Markdown report when the tally spans enough source files, or
/// unconditionally with `--force`. An unreadable store produces a report
/// carrying an error notice instead of counts.
///
/// # Errors
///
/// Returns an error when the report directory or file cannot be written.
pub fn execute_report(config: &CliConfig, args: &ReportArgs) -> CliResult<()> {
    let store = super::store_from(args.file.as_deref());
    let out = StatusReporter::new(config.color.should_color(), config.verbosity.is_quiet());

    let loaded = store.load();
    if let Some(err) = &loaded.error {
        out.warning(&format!("{err}; the report will carry an error notice"));
    }

    let tally_config = TallyConfig::builder()
        .store_path(store.path())
        .report_dir(&args.output)
        .top_limit(args.top)
        .build();

    let report = MarkdownReport::new(&loaded, &tally_config);
    if !args.force && !report.should_write() {
        out.info(&format!(
            "tally spans {} source files, below the report threshold of {}; pass --force to write anyway",
            loaded.snapshot.distinct_origin_count(),
            tally_config.report_threshold
        ));
        return Ok(());
    }

    let path = report
        .save()
        .map_err(|e| CliError::report_generation(e.to_string()))?;
    out.success(&format!("report written to {}", path.display()));
    Ok(())
}
