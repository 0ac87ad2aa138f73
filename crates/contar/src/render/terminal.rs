//! Terminal summary rendering.

use std::path::Path;

use console::Style;

use crate::config::TallyConfig;
use crate::key::Category;
use crate::store::LoadedTally;
use crate::summary::{category_totals, top_key};

/// Compact end-of-run view: one line per category, the top message spelled
/// out for the highlighted categories, and the report path when one was
/// written.
#[derive(Debug)]
pub struct TerminalSummary<'a> {
    loaded: &'a LoadedTally,
    config: &'a TallyConfig,
}

impl<'a> TerminalSummary<'a> {
    /// Creates a renderer over a loaded aggregate.
    #[must_use]
    pub fn new(loaded: &'a LoadedTally, config: &'a TallyConfig) -> Self {
        Self { loaded, config }
    }

    /// Renders the summary as plain or color-coded text.
    ///
    /// `report_path` is the detailed report just written, if any; when
    /// `None` the output does not mention a report at all.
    #[must_use]
    pub fn render(&self, report_path: Option<&Path>) -> String {
        let mut lines = Vec::new();

        if let Some(err) = &self.loaded.error {
            let prefix = if self.config.use_color {
                Style::new().red().bold().apply_to("log call tally unavailable").to_string()
            } else {
                "log call tally unavailable".to_string()
            };
            lines.push(format!("{prefix}: {err}"));
        } else if self.loaded.snapshot.is_empty() {
            lines.push("log call tally: no calls recorded".to_string());
        } else {
            lines.push(self.styled_header());
            for (category, total) in category_totals(&self.loaded.snapshot) {
                lines.push(self.category_line(&category, total));
            }
        }

        if let Some(path) = report_path {
            lines.push(format!("  report: {}", path.display()));
        }

        lines.join("\n")
    }

    fn styled_header(&self) -> String {
        if self.config.use_color {
            Style::new().bold().apply_to("log call tally").to_string()
        } else {
            "log call tally".to_string()
        }
    }

    fn category_line(&self, category: &Category, total: u64) -> String {
        let noun = if total == 1 { "call" } else { "calls" };
        let name = if self.config.use_color {
            category_style(category.as_str()).apply_to(category.as_str()).to_string()
        } else {
            category.as_str().to_string()
        };
        let mut line = format!("  {name}: {total} {noun}");

        let highlighted = self
            .config
            .highlighted
            .iter()
            .take(2)
            .any(|c| c == category);
        if highlighted {
            if let Some((key, count)) = top_key(&self.loaded.snapshot, category) {
                line.push_str(&format!(", top \"{}\" ({count})", key.signature));
            }
        }
        line
    }
}

/// Style used for a category name, keyed on the common logger method names.
fn category_style(name: &str) -> Style {
    match name {
        "error" => Style::new().red().bold(),
        "warn" => Style::new().yellow().bold(),
        "info" => Style::new().blue(),
        "debug" => Style::new().magenta(),
        "trace" => Style::new().dim(),
        _ => Style::new().cyan(),
    }
}
