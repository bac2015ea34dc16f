//! Crate-wide error type and result alias.

/// Errors surfaced by the comparison engine and its adapters.
///
/// Each variant carries a distinct handling policy: `InvalidInput` and
/// `Auth` are surfaced to the caller immediately and never retried,
/// `Upstream` (including timeouts) may be retried once by the orchestrator,
/// `NotFound` and `Decode` are per-resource failures that do not abort an
/// unrelated part of a comparison.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Caller-supplied parameters are malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The token was missing or rejected for a private resource.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The GitLab API call failed (network error, 5xx, timeout).
    #[error("upstream error: {0}")]
    Upstream(String),

    /// The requested resource does not exist on either ref.
    #[error("not found: {0}")]
    NotFound(String),

    /// File content is not diffable as text.
    #[error("cannot decode as text: {0}")]
    Decode(String),
}

impl Error {
    /// Whether the orchestrator may retry the failed operation once.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Upstream(_))
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
