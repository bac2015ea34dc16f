//! Entity types produced and consumed by the comparison engine.
//!
//! Everything here is request-scoped: values are decoded from the GitLab
//! API at the adapter boundary, flow through the classifiers, and live only
//! for the duration of one response. Nothing is persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single commit as reported by the GitLab API. Identity is the hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Full commit SHA.
    pub hash: String,
    /// Commit title line.
    pub message: String,
    /// Author name.
    pub author: String,
    /// Commit timestamp.
    pub date: DateTime<Utc>,
}

/// A branch known to the remote repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchRef {
    /// Branch name without any `origin/` prefix.
    pub name: String,
    /// Whether this is the repository's default branch.
    pub default: bool,
}

/// How a file changed between the two branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChangeType {
    /// Present on the source branch only.
    Added,
    /// Present on both branches with different content.
    Modified,
    /// Present on the destination branch only.
    Deleted,
}

/// One changed file between the two branches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    /// Repository-relative path.
    pub path: String,
    /// Three-way change classification.
    pub change_type: ChangeType,
}

/// Kind of one aligned line in a file diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiffKind {
    /// Line present in both files at the aligned position.
    Equal,
    /// Line present only in the destination file.
    Insert,
    /// Line present only in the source file.
    Delete,
}

/// One line of an aligned, side-by-side renderable diff.
///
/// Line numbers are 1-based. `Equal` lines carry both numbers, `Delete`
/// lines only `source_line`, `Insert` lines only `dest_line`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffLine {
    /// Edit classification of this line.
    pub kind: DiffKind,
    /// Line number in the source file, when present there.
    pub source_line: Option<usize>,
    /// Line number in the destination file, when present there.
    pub dest_line: Option<usize>,
    /// Line content with the trailing line ending stripped.
    pub text: String,
}

/// The assembled outcome of comparing two branches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Commits reachable from the source branch only, newest first.
    pub source_only_commits: Vec<Commit>,
    /// Commits reachable from the destination branch only, newest first.
    pub dest_only_commits: Vec<Commit>,
    /// Changed files between the branches, in path order.
    pub file_changes: Vec<FileChange>,
    /// Set when the changed-file report could not be retrieved even after a
    /// retry; the commit sections are still valid. Degraded, not failed.
    pub file_changes_unavailable: bool,
}

impl ComparisonResult {
    /// An empty result, used when the date window selects nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            source_only_commits: Vec::new(),
            dest_only_commits: Vec::new(),
            file_changes: Vec::new(),
            file_changes_unavailable: false,
        }
    }
}

/// Inclusive instant bounds for filtering commits and file changes.
///
/// A window with `from > to` is legal and selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    /// Earliest instant included.
    pub from: DateTime<Utc>,
    /// Latest instant included.
    pub to: DateTime<Utc>,
}

impl DateWindow {
    /// A window spanning all representable time.
    #[must_use]
    pub fn unbounded() -> Self {
        Self { from: DateTime::<Utc>::MIN_UTC, to: DateTime::<Utc>::MAX_UTC }
    }

    /// Whether `instant` lies within the window, bounds included.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.from <= instant && instant <= self.to
    }

    /// Whether the window selects nothing (`from > to`).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.from > self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let window = DateWindow { from: at("2024-01-01T00:00:00Z"), to: at("2024-01-31T00:00:00Z") };
        assert!(window.contains(at("2024-01-01T00:00:00Z")));
        assert!(window.contains(at("2024-01-31T00:00:00Z")));
        assert!(window.contains(at("2024-01-15T12:00:00Z")));
        assert!(!window.contains(at("2023-12-31T23:59:59Z")));
        assert!(!window.contains(at("2024-01-31T00:00:01Z")));
    }

    #[test]
    fn inverted_window_is_empty() {
        let window = DateWindow { from: at("2024-02-01T00:00:00Z"), to: at("2024-01-01T00:00:00Z") };
        assert!(window.is_empty());
        assert!(!window.contains(at("2024-01-15T00:00:00Z")));
    }

    #[test]
    fn single_instant_window_contains_exactly_that_instant() {
        let instant = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let window = DateWindow { from: instant, to: instant };
        assert!(!window.is_empty());
        assert!(window.contains(instant));
        assert!(!window.contains(instant + chrono::Duration::seconds(1)));
    }

    #[test]
    fn unbounded_window_contains_everything() {
        let window = DateWindow::unbounded();
        assert!(window.contains(at("1970-01-01T00:00:00Z")));
        assert!(window.contains(at("2099-12-31T23:59:59Z")));
    }
}
