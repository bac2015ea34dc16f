//! In-memory [`GitLabHost`] serving canned data.
//!
//! Used by unit and integration tests to drive the engine deterministically
//! without a network. Failures can be injected to exercise the retry and
//! degraded-result paths.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::compare::types::{BranchRef, Commit};
use crate::error::Error;
use crate::ports::gitlab::{GitLabHost, HostFuture, RawDiffEntry};

/// Canned-data host. Construct with [`FixtureHost::new`] and the
/// `with_*` builders.
#[derive(Default)]
pub struct FixtureHost {
    branches: Vec<BranchRef>,
    commits: HashMap<String, Vec<Commit>>,
    diffs: HashMap<(String, String), Vec<RawDiffEntry>>,
    files: HashMap<(String, String), String>,
    diff_failures: AtomicUsize,
}

impl FixtureHost {
    /// An empty host: no branches, no commits, no diffs, no files.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a branch and the commits reachable from it (newest first).
    #[must_use]
    pub fn with_branch(mut self, name: &str, default: bool, commits: Vec<Commit>) -> Self {
        self.branches.push(BranchRef { name: name.to_string(), default });
        self.commits.insert(name.to_string(), commits);
        self
    }

    /// Registers the changed-path report for a `(from, to)` ref pair.
    #[must_use]
    pub fn with_diff(mut self, from: &str, to: &str, entries: Vec<RawDiffEntry>) -> Self {
        self.diffs.insert((from.to_string(), to.to_string()), entries);
        self
    }

    /// Registers file content at `(reference, path)`.
    #[must_use]
    pub fn with_file(mut self, reference: &str, path: &str, content: &str) -> Self {
        self.files.insert((reference.to_string(), path.to_string()), content.to_string());
        self
    }

    /// Makes the next `count` calls to `diff_paths` fail with an upstream
    /// error before the canned report becomes available.
    #[must_use]
    pub fn failing_diff_paths(self, count: usize) -> Self {
        self.diff_failures.store(count, Ordering::SeqCst);
        self
    }

    fn take_diff_failure(&self) -> bool {
        self.diff_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

impl GitLabHost for FixtureHost {
    fn list_branches(&self) -> HostFuture<'_, Vec<BranchRef>> {
        let branches = self.branches.clone();
        Box::pin(async move { Ok(branches) })
    }

    fn list_commits(&self, branch: &str) -> HostFuture<'_, Vec<Commit>> {
        let result = self
            .commits
            .get(branch)
            .cloned()
            .ok_or_else(|| Error::Upstream(format!("unknown ref: {branch}")));
        Box::pin(async move { result })
    }

    fn diff_paths(&self, from: &str, to: &str) -> HostFuture<'_, Vec<RawDiffEntry>> {
        let result = if self.take_diff_failure() {
            Err(Error::Upstream("injected diff failure".to_string()))
        } else {
            Ok(self.diffs.get(&(from.to_string(), to.to_string())).cloned().unwrap_or_default())
        };
        Box::pin(async move { result })
    }

    fn file_content(&self, reference: &str, path: &str) -> HostFuture<'_, Option<String>> {
        let content = self.files.get(&(reference.to_string(), path.to_string())).cloned();
        Box::pin(async move { Ok(content) })
    }
}
