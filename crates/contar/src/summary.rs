//! Summarization over a final aggregate snapshot.
//!
//! Pure functions: the summarizer reads one snapshot and ranks it. Rendering
//! lives in [`crate::render`].

use std::collections::BTreeMap;

use crate::key::{Category, EventKey};
use crate::origin::Origin;
use crate::snapshot::TallySnapshot;

/// Sums call counts per category, in category order.
#[must_use]
pub fn category_totals(snapshot: &TallySnapshot) -> BTreeMap<Category, u64> {
    let mut totals = BTreeMap::new();
    for (key, count) in snapshot.counts() {
        *totals.entry(key.category.clone()).or_insert(0) += count;
    }
    totals
}

/// The `limit` keys of `category` with the highest counts, descending.
///
/// Ties keep the snapshot's key order. That order is stable across runs but
/// not part of the contract; callers must not depend on it.
#[must_use]
pub fn top_keys<'a>(
    snapshot: &'a TallySnapshot,
    category: &Category,
    limit: usize,
) -> Vec<(&'a EventKey, u64)> {
    let mut ranked: Vec<(&EventKey, u64)> = snapshot
        .counts()
        .iter()
        .filter(|(key, _)| &key.category == category)
        .map(|(key, count)| (key, *count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(limit);
    ranked
}

/// The single highest-count key of `category`, if the category occurred.
#[must_use]
pub fn top_key<'a>(
    snapshot: &'a TallySnapshot,
    category: &Category,
) -> Option<(&'a EventKey, u64)> {
    top_keys(snapshot, category, 1).into_iter().next()
}

/// Origins of `key` ranked by count descending, truncated to `limit`, plus
/// how many origins the truncation hid.
#[must_use]
pub fn top_origins<'a>(
    snapshot: &'a TallySnapshot,
    key: &EventKey,
    limit: usize,
) -> (Vec<(&'a Origin, u64)>, usize) {
    let Some(origin_counts) = snapshot.origins_of(key) else {
        return (Vec::new(), 0);
    };
    let mut ranked: Vec<(&Origin, u64)> = origin_counts
        .iter()
        .map(|(origin, count)| (origin, *count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    let hidden = ranked.len().saturating_sub(limit);
    ranked.truncate(limit);
    (ranked, hidden)
}
