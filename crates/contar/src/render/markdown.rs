//! Detailed Markdown report.
//!
//! Written at run end when calls were spread across enough distinct origin
//! files to make a per-file breakdown worth reading. When the aggregate
//! store could not be read, the report body is an error notice instead of
//! tables, and the origin threshold does not apply.

use std::fs;
use std::path::PathBuf;

use crate::config::TallyConfig;
use crate::result::{ContarError, ContarResult};
use crate::store::LoadedTally;
use crate::summary::{category_totals, top_keys, top_origins};

/// File name of the report inside the configured report directory.
pub const REPORT_FILE_NAME: &str = "log-summary.md";

/// Markdown report generator over a loaded aggregate.
#[derive(Debug)]
pub struct MarkdownReport<'a> {
    loaded: &'a LoadedTally,
    config: &'a TallyConfig,
}

impl<'a> MarkdownReport<'a> {
    /// Creates a report generator.
    #[must_use]
    pub fn new(loaded: &'a LoadedTally, config: &'a TallyConfig) -> Self {
        Self { loaded, config }
    }

    /// Whether this aggregate warrants a report file.
    ///
    /// True when distinct origins reach the configured threshold, or
    /// unconditionally when the store read failed: data loss is the one
    /// thing always worth a persistent artifact.
    #[must_use]
    pub fn should_write(&self) -> bool {
        self.loaded.error.is_some()
            || self.loaded.snapshot.distinct_origin_count() >= self.config.report_threshold
    }

    /// Generates the full Markdown document.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut out = String::new();
        out.push_str("# Log call summary\n\n");
        out.push_str(&format!(
            "Generated: {}\n\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        ));

        if let Some(err) = &self.loaded.error {
            self.write_error_notice(&mut out, err);
            return out;
        }

        let snapshot = &self.loaded.snapshot;
        out.push_str(&format!(
            "{} tracked calls across {} files.\n\n",
            snapshot.total_calls(),
            snapshot.distinct_origin_count()
        ));

        let totals = category_totals(snapshot);
        out.push_str("## Totals\n\n");
        out.push_str("| Category | Calls |\n");
        out.push_str("|---|---|\n");
        for (category, total) in &totals {
            out.push_str(&format!("| {} | {total} |\n", escape_cell(category.as_str())));
        }
        out.push('\n');

        for category in totals.keys() {
            out.push_str(&format!("## {category}\n\n"));
            out.push_str("| # | Message | Calls |\n");
            out.push_str("|---|---|---|\n");
            for (rank, (key, count)) in top_keys(snapshot, category, self.config.top_limit)
                .iter()
                .enumerate()
            {
                out.push_str(&format!(
                    "| {} | {} | {count} |\n",
                    rank + 1,
                    escape_cell(&key.signature)
                ));
                let (origins, hidden) = top_origins(snapshot, key, self.config.origin_limit);
                for (origin, origin_count) in origins {
                    out.push_str(&format!(
                        "| \u{21b3} | {} | {origin_count} |\n",
                        escape_cell(origin.as_str())
                    ));
                }
                if hidden > 0 {
                    out.push_str(&format!("| \u{21b3} | + {hidden} more files |  |\n"));
                }
            }
            out.push('\n');
        }

        out
    }

    /// Writes the report to `<report_dir>/log-summary.md`, creating the
    /// directory first, and returns the file path.
    ///
    /// # Errors
    ///
    /// [`ContarError::ReportDirFailed`] when the report directory cannot be
    /// created; an I/O error when the file itself cannot be written.
    pub fn save(&self) -> ContarResult<PathBuf> {
        fs::create_dir_all(&self.config.report_dir).map_err(|err| {
            ContarError::ReportDirFailed {
                path: self.config.report_dir.display().to_string(),
                message: err.to_string(),
            }
        })?;
        let path = self.config.report_dir.join(REPORT_FILE_NAME);
        fs::write(&path, self.generate())?;
        Ok(path)
    }

    fn write_error_notice(&self, out: &mut String, err: &ContarError) {
        out.push_str("## Tally unavailable\n\n");
        out.push_str("The aggregate store could not be read:\n\n");
        out.push_str(&format!("```\n{err}\n```\n\n"));
        out.push_str("Counts for this run are incomplete or lost.\n");
    }
}

/// Escapes the table delimiter so cell text cannot add or split columns.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::key::{Category, EventKey};
    use crate::origin::Origin;
    use crate::snapshot::TallySnapshot;

    fn key(category: &str, signature: &str) -> EventKey {
        EventKey::new(Category::new(category), signature)
    }

    fn loaded(snapshot: TallySnapshot) -> LoadedTally {
        LoadedTally {
            snapshot,
            error: None,
        }
    }

    fn spread_snapshot(origin_count: usize) -> TallySnapshot {
        let mut snapshot = TallySnapshot::new();
        for i in 0..origin_count {
            snapshot.record(
                key("error", "timeout"),
                Origin::new(format!("suite/{i}.test.js")),
            );
        }
        snapshot
    }

    mod threshold_tests {
        use super::*;

        #[test]
        fn four_origins_is_below_threshold() {
            let loaded = loaded(spread_snapshot(4));
            let config = TallyConfig::default();
            assert!(!MarkdownReport::new(&loaded, &config).should_write());
        }

        #[test]
        fn five_origins_meets_threshold() {
            let loaded = loaded(spread_snapshot(5));
            let config = TallyConfig::default();
            assert!(MarkdownReport::new(&loaded, &config).should_write());
        }

        #[test]
        fn store_error_bypasses_threshold() {
            let broken = LoadedTally {
                snapshot: TallySnapshot::new(),
                error: Some(ContarError::store_unreadable("/tmp/tally.json", "bad JSON")),
            };
            let config = TallyConfig::default();
            assert!(MarkdownReport::new(&broken, &config).should_write());
        }
    }

    mod table_tests {
        use super::*;

        fn report_text(snapshot: TallySnapshot) -> String {
            let loaded = loaded(snapshot);
            let config = TallyConfig::default();
            MarkdownReport::new(&loaded, &config).generate()
        }

        #[test]
        fn totals_table_lists_category_sums() {
            let mut snapshot = TallySnapshot::new();
            for _ in 0..3 {
                snapshot.record(
                    key("error", "Payment gateway timeout"),
                    Origin::new("payments/checkout.test.js"),
                );
            }
            snapshot.record(
                key("warn", "Retrying payment"),
                Origin::new("payments/retry.test.js"),
            );

            let text = report_text(snapshot);
            assert!(text.contains("| error | 3 |"));
            assert!(text.contains("| warn | 1 |"));
            assert!(text.contains("Generated: "));
        }

        #[test]
        fn ranked_rows_cap_at_top_limit() {
            let mut snapshot = TallySnapshot::new();
            for i in 0..6 {
                for _ in 0..(6 - i) {
                    snapshot.record(
                        key("error", &format!("message {i}")),
                        Origin::new("suite/a.test.js"),
                    );
                }
            }

            let text = report_text(snapshot);
            assert!(text.contains("| 1 | message 0 | 6 |"));
            assert!(text.contains("| 5 | message 4 | 2 |"));
            assert!(!text.contains("message 5"));
        }

        #[test]
        fn origin_rows_follow_their_message() {
            let mut snapshot = TallySnapshot::new();
            for _ in 0..2 {
                snapshot.record(key("error", "timeout"), Origin::new("suite/a.test.js"));
            }
            snapshot.record(key("error", "timeout"), Origin::new("suite/b.test.js"));

            let text = report_text(snapshot);
            let message_at = text.find("| 1 | timeout | 3 |").unwrap();
            let origin_at = text.find("| \u{21b3} | suite/a.test.js | 2 |").unwrap();
            assert!(origin_at > message_at);
            assert!(text.contains("| \u{21b3} | suite/b.test.js | 1 |"));
        }

        #[test]
        fn seven_origins_roll_up_to_five_plus_more() {
            let text = report_text(spread_snapshot(7));
            let origin_rows = text
                .lines()
                .filter(|line| line.starts_with("| \u{21b3} | suite/"))
                .count();
            assert_eq!(origin_rows, 5);
            assert!(text.contains("| \u{21b3} | + 2 more files |"));
        }

        #[test]
        fn key_without_origins_renders_bare() {
            let snapshot: TallySnapshot =
                serde_json::from_str(r#"{"counts": {"info: hi": 2}}"#).unwrap();
            let text = report_text(snapshot);
            assert!(text.contains("| 1 | hi | 2 |"));
            assert!(!text.contains("\u{21b3}"));
        }
    }

    mod escaping_tests {
        use super::*;

        #[test]
        fn pipe_in_message_is_escaped() {
            let mut snapshot = TallySnapshot::new();
            snapshot.record(key("error", "bad | pipe"), Origin::new("suite/a.test.js"));

            let loaded = loaded(snapshot);
            let config = TallyConfig::default();
            let text = MarkdownReport::new(&loaded, &config).generate();
            assert!(text.contains("| 1 | bad \\| pipe | 1 |"));
        }

        #[test]
        fn escaping_keeps_table_row_count() {
            let build = |signature: &str| {
                let mut snapshot = TallySnapshot::new();
                snapshot.record(key("error", signature), Origin::new("suite/a.test.js"));
                snapshot
            };
            let config = TallyConfig::default();

            let plain = loaded(build("plain message"));
            let piped = loaded(build("plain | message"));
            let rows = |l: &LoadedTally| {
                MarkdownReport::new(l, &config)
                    .generate()
                    .lines()
                    .filter(|line| line.starts_with('|'))
                    .count()
            };
            assert_eq!(rows(&plain), rows(&piped));
        }
    }

    mod error_notice_tests {
        use super::*;

        #[test]
        fn store_failure_produces_notice_instead_of_tables() {
            let broken = LoadedTally {
                snapshot: TallySnapshot::new(),
                error: Some(ContarError::store_unreadable("/tmp/tally.json", "bad JSON")),
            };
            let config = TallyConfig::default();
            let text = MarkdownReport::new(&broken, &config).generate();
            assert!(text.contains("## Tally unavailable"));
            assert!(text.contains("/tmp/tally.json"));
            assert!(!text.contains("## Totals"));
        }
    }

    mod save_tests {
        use super::*;

        #[test]
        fn save_creates_directory_and_file() {
            let dir = tempfile::tempdir().unwrap();
            let config = TallyConfig::builder()
                .report_dir(dir.path().join("nested").join("reports"))
                .build();
            let loaded = loaded(spread_snapshot(5));

            let path = MarkdownReport::new(&loaded, &config).save().unwrap();
            assert!(path.ends_with("log-summary.md"));
            let written = std::fs::read_to_string(&path).unwrap();
            assert!(written.contains("# Log call summary"));
        }

        #[test]
        fn blocked_directory_fails_with_report_dir_error() {
            let dir = tempfile::tempdir().unwrap();
            let blocker = dir.path().join("blocker");
            std::fs::write(&blocker, "file in the way").unwrap();

            let config = TallyConfig::builder()
                .report_dir(blocker.join("reports"))
                .build();
            let loaded = loaded(spread_snapshot(5));

            let err = MarkdownReport::new(&loaded, &config).save().unwrap_err();
            assert!(matches!(err, ContarError::ReportDirFailed { .. }));
        }
    }
}
