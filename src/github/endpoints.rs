// GitHub API endpoint functions.
// Typed methods for the two read-only endpoints the activity pipeline consumes.

use crate::error::Result;

use super::client::GitHubClient;
use super::types::{Event, RepoMetadata};

impl GitHubClient {
    /// Get the public event feed of a user (first page only).
    pub async fn get_user_events(&mut self, username: &str) -> Result<Vec<Event>> {
        self.get_json(&format!("/users/{}/events", username)).await
    }

    /// Get repository metadata by full name (`owner/repo`).
    pub async fn get_repo(&mut self, full_name: &str) -> Result<RepoMetadata> {
        self.get_json(&format!("/repos/{}", full_name)).await
    }
}
