//! Run lifecycle hooks.
//!
//! The host test framework owns the run; this crate only reacts to it:
//!
//! ```text
//!  on_run_start            on_worker_complete (xN)        on_run_complete
//!       |                           |                            |
//!   store.reset()          merge worker buffer            load once, render
//!                           into the store                terminal + report
//! ```
//!
//! Worker flushes are best-effort: a failed merge is logged and dropped so
//! the host's run is never failed by its tally. Only the report write at run
//! end can surface an error.

use std::path::PathBuf;

use console::Term;
use tracing::warn;

use crate::config::TallyConfig;
use crate::render::{MarkdownReport, TerminalSummary};
use crate::result::ContarResult;
use crate::store::TallyStore;
use crate::tracker::EventTracker;

/// What the run-end hook produced, for hosts that embed the output.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// The terminal summary exactly as printed
    pub summary_text: String,
    /// Path of the Markdown report, when one was written
    pub report_path: Option<PathBuf>,
}

/// Binds a config and store to the host framework's run hooks.
///
/// When tallying is disabled every hook is a no-op, leaving any stale store
/// file from previous runs untouched.
#[derive(Debug)]
pub struct RunCoordinator {
    config: TallyConfig,
    store: TallyStore,
}

impl RunCoordinator {
    /// Creates a coordinator for one run.
    #[must_use]
    pub fn new(config: TallyConfig) -> Self {
        let store = TallyStore::new(config.store_path.clone());
        Self { config, store }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &TallyConfig {
        &self.config
    }

    /// The store this coordinator flushes into.
    #[must_use]
    pub fn store(&self) -> &TallyStore {
        &self.store
    }

    /// Run start: clear leftovers from the previous run.
    ///
    /// # Errors
    ///
    /// Propagates store deletion failures other than the file being absent.
    pub fn on_run_start(&self) -> ContarResult<()> {
        if !self.config.enabled {
            return Ok(());
        }
        self.store.reset()
    }

    /// Worker completion: take the worker's buffer and merge it into the
    /// store. The buffer is left empty, so calling this twice for one
    /// worker flushes only what accumulated in between.
    ///
    /// Merge failures are logged at `warn` and swallowed; there is no
    /// retry and the aggregate may end up incomplete.
    pub fn on_worker_complete(&self, tracker: &mut EventTracker) {
        if !self.config.enabled {
            return;
        }
        let buffer = tracker.take_buffer();
        if buffer.is_empty() {
            return;
        }
        if let Err(err) = self.store.merge(&buffer) {
            warn!(
                error = %err,
                path = %self.store.path().display(),
                "dropping worker tally, store merge failed"
            );
        }
    }

    /// Run end: read the aggregate once, print the terminal summary, and
    /// write the Markdown report when it is warranted.
    ///
    /// # Errors
    ///
    /// Propagates report directory creation and report write failures.
    /// Store read problems are not errors here; they surface inside the
    /// rendered output instead.
    pub fn on_run_complete(&self) -> ContarResult<RunOutcome> {
        if !self.config.enabled {
            return Ok(RunOutcome {
                summary_text: String::new(),
                report_path: None,
            });
        }

        let loaded = self.store.load();

        let report = MarkdownReport::new(&loaded, &self.config);
        let report_path = if report.should_write() {
            Some(report.save()?)
        } else {
            None
        };

        let summary_text =
            TerminalSummary::new(&loaded, &self.config).render(report_path.as_deref());
        let term = Term::stderr();
        for line in summary_text.lines() {
            let _ = term.write_line(line);
        }

        Ok(RunOutcome {
            summary_text,
            report_path,
        })
    }
}
