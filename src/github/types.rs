// GitHub API response types.
// Defines the event record, repository metadata, and rate limit structs.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry of a user's public event feed.
///
/// Only the fields the pipeline reads are typed; everything else the API
/// returns (`id`, `actor`, `payload`, ...) is kept in `extra` so cached and
/// structured output carry the full record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub event_type: String,
    pub repo: RepoRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_details: Option<RepoDetails>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Event {
    /// Message text, empty if the event has none.
    pub fn message_text(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
impl Event {
    pub fn new(event_type: &str, repo_name: &str) -> Self {
        Self {
            event_type: event_type.to_string(),
            repo: RepoRef {
                name: repo_name.to_string(),
                extra: Map::new(),
            },
            created_at: None,
            message: None,
            repo_details: None,
            extra: Map::new(),
        }
    }

    pub fn with_created_at(mut self, created_at: &str) -> Self {
        self.created_at = Some(created_at.to_string());
        self
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }
}

/// Repository reference embedded in an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoRef {
    /// Full name, `owner/repo`.
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Enrichment result attached to an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RepoDetails {
    // Must come first: untagged decoding tries variants in order.
    Error {
        error: String,
    },
    Summary {
        stars: u64,
        forks: u64,
        description: Option<String>,
    },
}

/// Subset of `GET /repos/{owner}/{repo}` used for enrichment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoMetadata {
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub description: Option<String>,
}

impl From<RepoMetadata> for RepoDetails {
    fn from(meta: RepoMetadata) -> Self {
        RepoDetails::Summary {
            stars: meta.stargazers_count,
            forks: meta.forks_count,
            description: meta.description,
        }
    }
}

/// Rate limit information from response headers.
/// A field is `None` when the matching header was not returned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateLimit {
    pub limit: Option<u64>,
    pub remaining: Option<u64>,
    pub reset: Option<u64>,
}

impl RateLimit {
    pub fn is_exhausted(&self) -> bool {
        self.remaining == Some(0)
    }
}
