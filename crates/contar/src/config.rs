//! Tally configuration.

use std::path::PathBuf;

use crate::key::Category;
use crate::store::TallyStore;

/// Environment flag that turns tracking on (`1` or `true`).
pub const ENV_TRACK: &str = "CONTAR_TRACK";

/// Environment override for the aggregate file location.
pub const ENV_TALLY_FILE: &str = "CONTAR_TALLY_FILE";

/// Keys shown per category in the detailed report.
pub const DEFAULT_TOP_LIMIT: usize = 5;

/// Origins shown per key in the detailed report.
pub const DEFAULT_ORIGIN_LIMIT: usize = 5;

/// Minimum distinct origins before the detailed report is written.
pub const DEFAULT_REPORT_THRESHOLD: usize = 5;

/// Default directory for the Markdown report.
pub const DEFAULT_REPORT_DIR: &str = "target/contar";

/// Tally behavior knobs for one run.
#[derive(Debug, Clone)]
pub struct TallyConfig {
    /// Whether interception tallies at all
    pub enabled: bool,
    /// Aggregate file location
    pub store_path: PathBuf,
    /// Directory the Markdown report is written into
    pub report_dir: PathBuf,
    /// Keys listed per category in the report
    pub top_limit: usize,
    /// Origins listed per key in the report
    pub origin_limit: usize,
    /// Distinct origins required before a report is written
    pub report_threshold: usize,
    /// Categories whose top message the terminal summary spells out.
    /// Only the first two are honored.
    pub highlighted: Vec<Category>,
    /// Whether terminal output uses color
    pub use_color: bool,
}

impl TallyConfig {
    /// Create a builder for tally config
    #[must_use]
    pub fn builder() -> TallyConfigBuilder {
        TallyConfigBuilder::default()
    }

    /// Defaults plus environment overrides: [`ENV_TRACK`] gates tracking,
    /// [`ENV_TALLY_FILE`] relocates the aggregate file.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(value) = std::env::var(ENV_TRACK) {
            config.enabled = value == "1" || value.eq_ignore_ascii_case("true");
        }
        if let Ok(path) = std::env::var(ENV_TALLY_FILE) {
            if !path.is_empty() {
                config.store_path = PathBuf::from(path);
            }
        }
        config
    }
}

impl Default for TallyConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            store_path: TallyStore::default_path(),
            report_dir: PathBuf::from(DEFAULT_REPORT_DIR),
            top_limit: DEFAULT_TOP_LIMIT,
            origin_limit: DEFAULT_ORIGIN_LIMIT,
            report_threshold: DEFAULT_REPORT_THRESHOLD,
            highlighted: vec![Category::new("error"), Category::new("warn")],
            use_color: true,
        }
    }
}

/// Builder for tally configuration
#[derive(Debug)]
pub struct TallyConfigBuilder {
    enabled: bool,
    store_path: PathBuf,
    report_dir: PathBuf,
    top_limit: usize,
    origin_limit: usize,
    report_threshold: usize,
    highlighted: Vec<Category>,
    use_color: bool,
}

impl Default for TallyConfigBuilder {
    fn default() -> Self {
        let base = TallyConfig::default();
        Self {
            enabled: base.enabled,
            store_path: base.store_path,
            report_dir: base.report_dir,
            top_limit: base.top_limit,
            origin_limit: base.origin_limit,
            report_threshold: base.report_threshold,
            highlighted: base.highlighted,
            use_color: base.use_color,
        }
    }
}

impl TallyConfigBuilder {
    /// Turn tallying on or off
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the aggregate file location
    #[must_use]
    pub fn store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = path.into();
        self
    }

    /// Set the report directory
    #[must_use]
    pub fn report_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.report_dir = dir.into();
        self
    }

    /// Set how many keys each category lists in the report
    #[must_use]
    pub fn top_limit(mut self, limit: usize) -> Self {
        self.top_limit = limit;
        self
    }

    /// Set how many origins each key lists in the report
    #[must_use]
    pub fn origin_limit(mut self, limit: usize) -> Self {
        self.origin_limit = limit;
        self
    }

    /// Set the distinct-origin threshold for writing the report
    #[must_use]
    pub fn report_threshold(mut self, threshold: usize) -> Self {
        self.report_threshold = threshold;
        self
    }

    /// Replace the highlighted categories
    #[must_use]
    pub fn highlighted(mut self, categories: Vec<Category>) -> Self {
        self.highlighted = categories;
        self
    }

    /// Toggle colored terminal output
    #[must_use]
    pub fn use_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    /// Build the configuration
    #[must_use]
    pub fn build(self) -> TallyConfig {
        TallyConfig {
            enabled: self.enabled,
            store_path: self.store_path,
            report_dir: self.report_dir,
            top_limit: if self.top_limit == 0 {
                DEFAULT_TOP_LIMIT
            } else {
                self.top_limit
            },
            origin_limit: if self.origin_limit == 0 {
                DEFAULT_ORIGIN_LIMIT
            } else {
                self.origin_limit
            },
            report_threshold: self.report_threshold,
            highlighted: self.highlighted,
            use_color: self.use_color,
        }
    }
}
