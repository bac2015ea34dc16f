//! Adapter implementations of the port traits.

pub mod fixture;
pub mod gitlab_api;

pub use fixture::FixtureHost;
pub use gitlab_api::GitLabApi;
