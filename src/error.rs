// Error types for gh-activity.
// Classifies GitHub API, cache, and output failures for the top-level exit boundary.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ActivityError {
    #[error("API Error: {status} {reason}")]
    Http { status: u16, reason: String },

    #[error("API Error: {status} {reason}\nRate limit exceeded. Reset at {reset_at}")]
    RateLimited {
        status: u16,
        reason: String,
        reset_at: String,
    },

    #[error("Connection Error: {0}")]
    Connection(#[source] reqwest::Error),

    #[error("Error processing API response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Cache error: {0}")]
    Cache(#[from] rusqlite::Error),

    #[error("Invalid timestamp {value:?}: expected YYYY-MM-DDTHH:MM:SSZ")]
    InvalidTimestamp { value: String },

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl ActivityError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        1
    }
}

impl From<serde_yaml::Error> for ActivityError {
    fn from(err: serde_yaml::Error) -> Self {
        ActivityError::Serialize(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ActivityError>;
