//! Summary command handler

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::StatusReporter;
use crate::SummaryArgs;
use contar::{Category, TallyConfig, TerminalSummary};

/// Execute the summary command
///
/// Prints the category totals to stdout. An unreadable store still prints
/// its placeholder line, then surfaces the load error through the exit code.
///
/// # Errors
///
/// Returns an error when the store file exists but cannot be parsed.
pub fn execute_summary(config: &CliConfig, args: &SummaryArgs) -> CliResult<()> {
    let store = super::store_from(args.file.as_deref());
    let out = StatusReporter::new(config.color.should_color(), config.verbosity.is_quiet());
    if config.verbosity.is_verbose() {
        out.info(&format!("reading {}", store.path().display()));
    }

    let loaded = store.load();
    let mut builder = TallyConfig::builder()
        .store_path(store.path())
        .use_color(config.color.should_color());
    if !args.highlight.is_empty() {
        let categories = args
            .highlight
            .iter()
            .map(|name| Category::new(name.as_str()))
            .collect();
        builder = builder.highlighted(categories);
    }
    let tally_config = builder.build();

    println!("{}", TerminalSummary::new(&loaded, &tally_config).render(None));

    match loaded.error {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::ColorChoice;
    use crate::error::CliError;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const FIXTURE: &str = r#"{
        "counts": {
            "error: Payment gateway timeout": 3,
            "warn: Retrying request": 1
        },
        "files": {
            "error: Payment gateway timeout": {
                "tests/payments.rs": 2,
                "tests/checkout.rs": 1
            },
            "warn: Retrying request": {
                "tests/payments.rs": 1
            }
        }
    }"#;

    fn quiet_config() -> CliConfig {
        CliConfig::new().with_color(ColorChoice::Never)
    }

    fn args_for(file: PathBuf) -> SummaryArgs {
        SummaryArgs {
            file: Some(file),
            highlight: Vec::new(),
        }
    }

    #[test]
    fn test_missing_store_succeeds() {
        let temp = TempDir::new().unwrap();
        let args = args_for(temp.path().join("absent.json"));

        assert!(execute_summary(&quiet_config(), &args).is_ok());
    }

    #[test]
    fn test_valid_store_succeeds() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tally.json");
        std::fs::write(&path, FIXTURE).unwrap();

        assert!(execute_summary(&quiet_config(), &args_for(path)).is_ok());
    }

    #[test]
    fn test_highlight_flags_succeed() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tally.json");
        std::fs::write(&path, FIXTURE).unwrap();

        let args = SummaryArgs {
            file: Some(path),
            highlight: vec!["warn".to_string(), "error".to_string()],
        };
        assert!(execute_summary(&quiet_config(), &args).is_ok());
    }

    #[test]
    fn test_corrupt_store_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tally.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = execute_summary(&quiet_config(), &args_for(path)).unwrap_err();
        assert!(matches!(
            err,
            CliError::Tally(contar::ContarError::StoreUnreadable { .. })
        ));
    }
}
