//! Contar: cross-process log-call tally for parallel test runs.
//!
//! Contar (Spanish: "to count") wraps a logger's methods in each test worker,
//! counts every call by category and message signature, and merges the
//! per-worker tallies through one shared JSON file into a single end-of-run
//! summary: a compact terminal view plus an optional ranked Markdown report.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐      ┌──────────────┐      ┌──────────────┐
//! │ EventTracker │  ..  │ EventTracker │      │  Summarizer  │
//! │  (worker 1)  │      │  (worker N)  │      │  (run end)   │
//! └──────┬───────┘      └──────┬───────┘      └──────▲───────┘
//!        │ flush               │ flush               │ load once
//!        ▼                     ▼                     │
//! ┌────────────────────────────────────────────────────────────┐
//! │         TallyStore (shared JSON document on disk)          │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Workers flush by unsynchronized read-merge-write; the store is advisory
//! and may undercount under concurrent flushes, never crash a run.
//!
//! # Example
//!
//! ```
//! use contar::{Category, EventTracker, FixedOrigin, Origin};
//!
//! let resolver = FixedOrigin::new(Origin::new("payments/checkout.test.js"));
//! let mut tracker = EventTracker::new(resolver, true);
//! tracker.wrap(Category::new("error"), |args: &[&str]| {
//!     eprintln!("{}", args.join(" "));
//! });
//!
//! tracker.emit("error", &["Payment gateway timeout"])?;
//! assert_eq!(tracker.buffer().total_calls(), 1);
//! # Ok::<(), contar::ContarError>(())
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

pub mod config;
pub mod key;
pub mod lifecycle;
pub mod origin;
pub mod render;
pub mod result;
pub mod snapshot;
pub mod store;
pub mod summary;
pub mod tracker;

pub use config::{TallyConfig, TallyConfigBuilder, ENV_TALLY_FILE, ENV_TRACK};
pub use key::{signature_of, Category, EventKey, EMPTY_SIGNATURE};
pub use lifecycle::{RunCoordinator, RunOutcome};
pub use origin::{CallbackResolver, FixedOrigin, Origin, OriginResolver, UNKNOWN_ORIGIN};
pub use render::{MarkdownReport, TerminalSummary, REPORT_FILE_NAME};
pub use result::{ContarError, ContarResult};
pub use snapshot::TallySnapshot;
pub use store::{LoadedTally, TallyStore, DEFAULT_STORE_FILE};
pub use tracker::{EventTracker, SourceFn};
