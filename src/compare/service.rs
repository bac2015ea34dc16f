//! Comparison orchestrator: validates a request, fans out the independent
//! host fetches, and composes the classifiers into a single result.

use std::time::Duration;

use tokio::time::{sleep, timeout};

use super::types::{BranchRef, ComparisonResult, DateWindow, DiffLine};
use super::{commits, files, line_diff};
use crate::error::{Error, Result};
use crate::ports::gitlab::{GitLabHost, HostFuture};

/// Upper bound on any single host call, retry included.
const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Pause before the single retry of a failed upstream call.
const RETRY_BACKOFF: Duration = Duration::from_millis(250);

/// Request-scoped comparison engine over one repository.
///
/// Owns the host it talks to; construct one per request together with its
/// adapter, so nothing is shared across concurrent requests. Dropping the
/// future returned by any operation cancels all in-flight host calls.
pub struct CompareService {
    host: Box<dyn GitLabHost>,
    call_timeout: Duration,
}

impl std::fmt::Debug for CompareService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompareService")
            .field("call_timeout", &self.call_timeout)
            .finish_non_exhaustive()
    }
}

impl CompareService {
    /// Creates a service over `host` with the default per-call timeout.
    #[must_use]
    pub fn new(host: Box<dyn GitLabHost>) -> Self {
        Self { host, call_timeout: DEFAULT_CALL_TIMEOUT }
    }

    /// Overrides the per-call timeout.
    #[must_use]
    pub fn with_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    /// Compare two branches: commits unique to each side within `window`,
    /// plus the changed files between the branches.
    ///
    /// The two commit fetches and the changed-path fetch are independent and
    /// run concurrently. An inverted window returns an empty result without
    /// touching the host. If the changed-path report cannot be retrieved
    /// even after a retry while both commit fetches succeeded, the result
    /// carries the commit sections with an empty file section and
    /// `file_changes_unavailable` set: degraded, not failed.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for empty or identical branch names, `Auth` for
    /// rejected credentials, `Upstream` when a commit fetch fails after the
    /// retry.
    pub async fn compare(
        &self,
        source: &str,
        dest: &str,
        window: DateWindow,
    ) -> Result<ComparisonResult> {
        validate_branches(source, dest)?;
        if window.is_empty() {
            return Ok(ComparisonResult::empty());
        }

        // The report describes what `source` changes relative to `dest`.
        let (source_commits, dest_commits, report) = tokio::join!(
            self.call(|| self.host.list_commits(source)),
            self.call(|| self.host.list_commits(dest)),
            self.call(|| self.host.diff_paths(dest, source)),
        );
        let source_commits = source_commits?;
        let dest_commits = dest_commits?;

        let (source_only_commits, dest_only_commits) =
            commits::classify(&source_commits, &dest_commits, window);

        let (file_changes, file_changes_unavailable) = match report {
            Ok(entries) => (files::classify(&entries, window), false),
            Err(_) => (Vec::new(), true),
        };

        Ok(ComparisonResult {
            source_only_commits,
            dest_only_commits,
            file_changes,
            file_changes_unavailable,
        })
    }

    /// Produce the aligned line diff of one file between two branches.
    ///
    /// Both blobs are fetched concurrently. A path absent on one side diffs
    /// against empty content (a pure addition or deletion); absent on both
    /// sides is `NotFound`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a missing path or bad branch names, `NotFound`
    /// when the path exists on neither ref, `Decode` for non-text content,
    /// `Auth`/`Upstream` as for [`compare`](Self::compare).
    pub async fn diff_file(&self, path: &str, source: &str, dest: &str) -> Result<Vec<DiffLine>> {
        validate_branches(source, dest)?;
        if path.trim().is_empty() {
            return Err(Error::InvalidInput("file path must be non-empty".to_string()));
        }

        let (source_blob, dest_blob) = tokio::join!(
            self.call(|| self.host.file_content(source, path)),
            self.call(|| self.host.file_content(dest, path)),
        );
        let source_blob = source_blob?;
        let dest_blob = dest_blob?;

        if source_blob.is_none() && dest_blob.is_none() {
            return Err(Error::NotFound(format!("{path} exists on neither branch")));
        }

        let source_text = source_blob.unwrap_or_default();
        let dest_text = dest_blob.unwrap_or_default();
        Ok(line_diff::diff_lines(&source_text, &dest_text))
    }

    /// List the repository's branches, default branch first, the rest in
    /// name order.
    ///
    /// # Errors
    ///
    /// `Auth` for rejected credentials, `Upstream` when the host call fails
    /// after the retry.
    pub async fn branches(&self) -> Result<Vec<BranchRef>> {
        let mut branches = self.call(|| self.host.list_branches()).await?;
        branches.sort_by(|a, b| a.name.cmp(&b.name));
        branches.sort_by_key(|b| !b.default);
        Ok(branches)
    }

    /// Run one host call under the timeout, retrying once with backoff when
    /// the failure is retryable. Non-retryable errors surface immediately.
    async fn call<'a, T>(&self, op: impl Fn() -> HostFuture<'a, T>) -> Result<T> {
        match timeout(self.call_timeout, op()).await {
            Ok(Ok(value)) => return Ok(value),
            Ok(Err(err)) if !err.is_retryable() => return Err(err),
            Ok(Err(_)) | Err(_) => {}
        }

        sleep(RETRY_BACKOFF).await;
        match timeout(self.call_timeout, op()).await {
            Ok(result) => result,
            Err(_) => Err(Error::Upstream(format!(
                "host call timed out after {}s (retry included)",
                self.call_timeout.as_secs()
            ))),
        }
    }
}

fn validate_branches(source: &str, dest: &str) -> Result<()> {
    if source.trim().is_empty() || dest.trim().is_empty() {
        return Err(Error::InvalidInput("branch names must be non-empty".to_string()));
    }
    if source == dest {
        return Err(Error::InvalidInput(format!(
            "source and destination are both '{source}'"
        )));
    }
    Ok(())
}
