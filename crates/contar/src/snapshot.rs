//! Aggregate tally snapshot.
//!
//! One [`TallySnapshot`] is both the worker-local buffer (owned by a single
//! worker between flushes) and the merged cross-worker aggregate (what the
//! store file holds). Counts only ever grow within a run.
//!
//! Invariant: for every key present in the origin map, the per-origin counts
//! sum to that key's total. `record` and `merge` preserve it by construction;
//! [`TallySnapshot::is_consistent`] checks it for data read back from disk.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::key::EventKey;
use crate::origin::Origin;

/// Tallied call counts plus per-origin breakdowns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "RawSnapshot", from = "RawSnapshot")]
pub struct TallySnapshot {
    /// Total count per key
    counts: BTreeMap<EventKey, u64>,
    /// Per-origin counts per key
    origins: BTreeMap<EventKey, BTreeMap<Origin, u64>>,
}

impl TallySnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Records one call under `key`, attributed to `origin`.
    pub fn record(&mut self, key: EventKey, origin: Origin) {
        *self.counts.entry(key.clone()).or_insert(0) += 1;
        *self
            .origins
            .entry(key)
            .or_default()
            .entry(origin)
            .or_insert(0) += 1;
    }

    /// Merges another snapshot into this one, key-wise.
    ///
    /// Counts sum, origin counts sum per key per origin, keys and origins
    /// union. Merging the same snapshot twice therefore counts it twice.
    pub fn merge(&mut self, other: &TallySnapshot) {
        for (key, count) in &other.counts {
            *self.counts.entry(key.clone()).or_insert(0) += count;
        }
        for (key, origin_counts) in &other.origins {
            let mine = self.origins.entry(key.clone()).or_default();
            for (origin, count) in origin_counts {
                *mine.entry(origin.clone()).or_insert(0) += count;
            }
        }
    }

    /// Total count recorded for a key, zero when absent.
    #[must_use]
    pub fn count_of(&self, key: &EventKey) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Sum of all counts across all keys.
    #[must_use]
    pub fn total_calls(&self) -> u64 {
        self.counts.values().sum()
    }

    /// All keyed totals, in key order.
    #[must_use]
    pub fn counts(&self) -> &BTreeMap<EventKey, u64> {
        &self.counts
    }

    /// Per-origin counts for a key, if any were recorded.
    #[must_use]
    pub fn origins_of(&self, key: &EventKey) -> Option<&BTreeMap<Origin, u64>> {
        self.origins.get(key)
    }

    /// Number of distinct origins across the whole snapshot.
    #[must_use]
    pub fn distinct_origin_count(&self) -> usize {
        let mut seen: BTreeSet<&Origin> = BTreeSet::new();
        for origin_counts in self.origins.values() {
            seen.extend(origin_counts.keys());
        }
        seen.len()
    }

    /// Checks the count/origin-sum invariant for every key with origins.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.origins.iter().all(|(key, origin_counts)| {
            origin_counts.values().sum::<u64>() == self.count_of(key)
        })
    }
}

/// Wire form of the snapshot: flat string keys, exactly as stored on disk.
///
/// ```json
/// { "counts": { "error: Payment gateway timeout": 3 },
///   "files":  { "error: Payment gateway timeout": { "payments/checkout.test.js": 3 } } }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    counts: BTreeMap<String, u64>,
    #[serde(default)]
    files: BTreeMap<String, BTreeMap<String, u64>>,
}

impl From<TallySnapshot> for RawSnapshot {
    fn from(snapshot: TallySnapshot) -> Self {
        let counts = snapshot
            .counts
            .iter()
            .map(|(key, count)| (key.storage_key(), *count))
            .collect();
        let files = snapshot
            .origins
            .iter()
            .map(|(key, origin_counts)| {
                let flat = origin_counts
                    .iter()
                    .map(|(origin, count)| (origin.as_str().to_string(), *count))
                    .collect();
                (key.storage_key(), flat)
            })
            .collect();
        Self { counts, files }
    }
}

impl From<RawSnapshot> for TallySnapshot {
    fn from(raw: RawSnapshot) -> Self {
        let mut snapshot = Self::new();
        // Distinct raw keys can normalize to the same parsed key, so sum
        // instead of insert.
        for (raw_key, count) in raw.counts {
            let key = EventKey::parse_storage_key(&raw_key);
            *snapshot.counts.entry(key).or_insert(0) += count;
        }
        for (raw_key, origin_counts) in raw.files {
            let key = EventKey::parse_storage_key(&raw_key);
            let mine = snapshot.origins.entry(key).or_default();
            for (raw_origin, count) in origin_counts {
                *mine.entry(Origin::new(raw_origin)).or_insert(0) += count;
            }
        }
        snapshot
    }
}
