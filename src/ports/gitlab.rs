//! GitLab host port: the four repository capabilities the engine consumes.

use std::future::Future;
use std::pin::Pin;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::compare::types::{BranchRef, Commit};
use crate::error::Result;

/// Boxed future type alias used by [`GitLabHost`] to keep the trait
/// dyn-compatible.
pub type HostFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// One changed path between two refs, as reported by the host.
///
/// The raw change indicators mirror the GitLab compare report; mapping them
/// to the three-way [`ChangeType`](crate::compare::types::ChangeType) is the
/// file classifier's job, not the adapter's. `touched_at` is the date of the
/// newest commit touching the path, or `None` when the adapter could not
/// date it; undated entries are retained downstream rather than dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDiffEntry {
    /// Path before the change.
    pub old_path: String,
    /// Path after the change (differs from `old_path` only for renames).
    pub new_path: String,
    /// The path was created.
    pub new_file: bool,
    /// The path was renamed.
    pub renamed_file: bool,
    /// The path was deleted.
    pub deleted_file: bool,
    /// Date of the newest commit touching this path, when known.
    pub touched_at: Option<DateTime<Utc>>,
}

/// Read access to one GitLab repository.
///
/// Implementations are constructed per request with the repository URL and
/// optional token already bound, so the engine never handles credentials.
/// Wire-protocol details (pagination, rate limits, API versioning) stay
/// behind this trait.
pub trait GitLabHost: Send + Sync {
    /// Lists the branches of the repository.
    ///
    /// # Errors
    ///
    /// Returns `Auth` for rejected credentials and `Upstream` for any other
    /// API failure.
    fn list_branches(&self) -> HostFuture<'_, Vec<BranchRef>>;

    /// Lists the commits reachable from `branch`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `Auth` for rejected credentials and `Upstream` for any other
    /// API failure, including an unknown branch.
    fn list_commits(&self, branch: &str) -> HostFuture<'_, Vec<Commit>>;

    /// Reports the paths that differ between `from` and `to`, i.e. what `to`
    /// changes relative to `from`.
    ///
    /// # Errors
    ///
    /// Returns `Auth` for rejected credentials and `Upstream` for any other
    /// API failure.
    fn diff_paths(&self, from: &str, to: &str) -> HostFuture<'_, Vec<RawDiffEntry>>;

    /// Fetches the raw content of `path` at `reference`, or `None` when the
    /// path does not exist there.
    ///
    /// # Errors
    ///
    /// Returns `Decode` for content that is not valid text, `Auth` for
    /// rejected credentials, and `Upstream` for any other API failure.
    fn file_content(&self, reference: &str, path: &str) -> HostFuture<'_, Option<String>>;
}
