//! The branch comparison engine.
//!
//! Pure classifiers (`commits`, `files`, `line_diff`) over the entity types
//! in [`types`], composed by the request-scoped orchestrator in [`service`].

pub mod commits;
pub mod files;
pub mod line_diff;
pub mod service;
pub mod types;

pub use service::CompareService;
pub use types::{
    BranchRef, ChangeType, Commit, ComparisonResult, DateWindow, DiffKind, DiffLine, FileChange,
};
