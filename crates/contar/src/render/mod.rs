//! Summary rendering: terminal view and Markdown report.

pub mod markdown;
pub mod terminal;

pub use markdown::{MarkdownReport, REPORT_FILE_NAME};
pub use terminal::TerminalSummary;
