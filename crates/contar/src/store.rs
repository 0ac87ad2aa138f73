//! File-backed aggregate store.
//!
//! One JSON document on shared disk accumulates the tallies of every worker
//! process in a run. Workers append by read-merge-write at flush time; the
//! summarizer reads the document once after all workers are done.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::result::{ContarError, ContarResult};
use crate::snapshot::TallySnapshot;

/// File name used under the system temp directory by default.
pub const DEFAULT_STORE_FILE: &str = "contar-tally.json";

/// Result of reading the store: always a snapshot, plus the read failure
/// (if any) for the summarizer to surface.
#[derive(Debug)]
pub struct LoadedTally {
    /// Parsed aggregate, empty when the file was absent or unreadable
    pub snapshot: TallySnapshot,
    /// Captured read or parse failure
    pub error: Option<ContarError>,
}

/// Handle to the shared on-disk tally document.
#[derive(Debug, Clone)]
pub struct TallyStore {
    path: PathBuf,
}

impl TallyStore {
    /// Creates a store handle for a specific file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default store location: `contar-tally.json` in the system temp dir.
    #[must_use]
    pub fn default_path() -> PathBuf {
        std::env::temp_dir().join(DEFAULT_STORE_FILE)
    }

    /// The file this store reads and writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Deletes the store file. Idempotent: a missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns any deletion failure other than the file being absent.
    pub fn reset(&self) -> ContarResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Reads the current aggregate.
    ///
    /// Never fails: an absent file is an empty aggregate; an unreadable or
    /// unparseable file yields an empty aggregate with the failure captured
    /// in [`LoadedTally::error`] for the summarizer to report.
    #[must_use]
    pub fn load(&self) -> LoadedTally {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return LoadedTally {
                    snapshot: TallySnapshot::new(),
                    error: None,
                };
            }
            Err(err) => {
                return LoadedTally {
                    snapshot: TallySnapshot::new(),
                    error: Some(ContarError::store_unreadable(
                        self.path.display().to_string(),
                        err.to_string(),
                    )),
                };
            }
        };
        match serde_json::from_str(&text) {
            Ok(snapshot) => LoadedTally {
                snapshot,
                error: None,
            },
            Err(err) => LoadedTally {
                snapshot: TallySnapshot::new(),
                error: Some(ContarError::store_unreadable(
                    self.path.display().to_string(),
                    err.to_string(),
                )),
            },
        }
    }

    /// Merges a worker's local buffer into the document on disk.
    ///
    /// Not atomic across processes: two workers flushing at the same time
    /// can both read the same baseline, and the later write overwrites the
    /// earlier one's increments. There is no locking and no retry; under
    /// concurrent flushes the aggregate may undercount. Each completed
    /// merge leaves a parseable document whose per-key origin sums match
    /// its totals.
    ///
    /// An unreadable existing document is treated as empty, so a corrupt
    /// store heals to the merging worker's counts.
    ///
    /// # Errors
    ///
    /// Returns serialization or write failures; callers on the worker path
    /// log and swallow these.
    pub fn merge(&self, local: &TallySnapshot) -> ContarResult<()> {
        let mut current = self.load().snapshot;
        current.merge(local);
        let text = serde_json::to_string_pretty(&current)?;
        fs::write(&self.path, text)?;
        debug!(
            path = %self.path.display(),
            keys = current.counts().len(),
            "merged local tally into store"
        );
        Ok(())
    }
}

impl Default for TallyStore {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}
