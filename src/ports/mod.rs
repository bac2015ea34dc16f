//! Port traits defining external boundaries.
//!
//! The engine reaches the GitLab API only through the trait in `gitlab`,
//! so adapters can be swapped per request and tests can run on canned data.
//! Implementations live in `src/adapters/`.

pub mod gitlab;

pub use gitlab::{GitLabHost, HostFuture, RawDiffEntry};
