//! Command handlers - extracted from main.rs for testability
//!
//! Each handler module contains the execution logic for one CLI command
//! plus its tests.

use contar::{TallyConfig, TallyStore};
use std::path::Path;
use tracing::debug;

pub mod dump;
pub mod report;
pub mod reset;
pub mod summary;

// Re-export handlers for convenient access
pub use dump::execute_dump;
pub use report::execute_report;
pub use reset::execute_reset;
pub use summary::execute_summary;

/// Resolve the tally store from an explicit flag or the ambient configuration
///
/// An explicit `--file` wins; otherwise the `CONTAR_TALLY_FILE` environment
/// variable and the temp-dir default apply, in that order.
#[must_use]
pub fn store_from(file: Option<&Path>) -> TallyStore {
    let store = match file {
        Some(path) => TallyStore::new(path),
        None => TallyStore::new(TallyConfig::from_env().store_path),
    };
    debug!(path = %store.path().display(), "resolved tally store");
    store
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_explicit_file_wins() {
        let store = store_from(Some(Path::new("/tmp/custom-tally.json")));
        assert_eq!(store.path(), Path::new("/tmp/custom-tally.json"));
    }

    #[test]
    fn test_env_var_fallback() {
        // The only test in this crate that touches the environment.
        std::env::set_var(contar::ENV_TALLY_FILE, "/tmp/env-tally.json");
        let store = store_from(None);
        std::env::remove_var(contar::ENV_TALLY_FILE);

        assert_eq!(store.path(), PathBuf::from("/tmp/env-tally.json"));
    }
}
