// GitHub API module.
// Provides the client and types for the events and repository endpoints.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::{GITHUB_API_BASE, GitHubClient};
pub use types::{Event, RepoDetails};
