//! Commit classifier: partitions two branch histories into the commits
//! unique to each side within a date window.

use std::collections::HashSet;

use super::types::{Commit, DateWindow};

/// Partition two ordered commit lists into (source-only, dest-only).
///
/// A commit is emitted for a side when its date lies inside `window` and its
/// hash does not appear anywhere in the other side's history. Commits with
/// identical hashes on both sides are shared history and appear in neither
/// output. The adapter's newest-first ordering is preserved.
///
/// An inverted window (`from > to`) selects nothing for either side.
#[must_use]
pub fn classify(source: &[Commit], dest: &[Commit], window: DateWindow) -> (Vec<Commit>, Vec<Commit>) {
    let source_hashes: HashSet<&str> = source.iter().map(|c| c.hash.as_str()).collect();
    let dest_hashes: HashSet<&str> = dest.iter().map(|c| c.hash.as_str()).collect();

    let source_only = unique_within(source, &dest_hashes, window);
    let dest_only = unique_within(dest, &source_hashes, window);
    (source_only, dest_only)
}

fn unique_within(commits: &[Commit], other: &HashSet<&str>, window: DateWindow) -> Vec<Commit> {
    commits
        .iter()
        .filter(|c| window.contains(c.date) && !other.contains(c.hash.as_str()))
        .cloned()
        .collect()
}
