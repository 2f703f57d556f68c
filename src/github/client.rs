// GitHub API HTTP client.
// Handles optional authentication, rate limit tracking, and status classification.

use chrono::{DateTime, Local};
use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};
use tracing::debug;

use crate::error::{ActivityError, Result};

use super::types::RateLimit;

pub const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_API_VERSION: &str = "2022-11-28";
const CLIENT_USER_AGENT: &str = "GitHub-Activity-CLI/2.0";

/// GitHub API client with optional authentication and rate limit tracking.
pub struct GitHubClient {
    client: Client,
    base_url: String,
    rate_limit: RateLimit,
}

impl GitHubClient {
    /// Create a new client against `base_url`, authenticating if a token is given.
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();

        if let Some(token) = token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|e| ActivityError::Other(format!("Invalid token: {}", e)))?,
            );
        }
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(ActivityError::Connection)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            rate_limit: RateLimit::default(),
        })
    }

    /// Rate limit information from the most recent response.
    pub fn rate_limit(&self) -> &RateLimit {
        &self.rate_limit
    }

    /// Make a GET request to the GitHub API.
    pub async fn get(&mut self, endpoint: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, "GET");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ActivityError::Connection)?;

        self.update_rate_limit(&response);
        self.check_response(response)
    }

    /// Make a GET request and decode the JSON body.
    ///
    /// The body is read as text first so malformed JSON surfaces as
    /// `ActivityError::Decode` rather than a transport error.
    pub async fn get_json<T: serde::de::DeserializeOwned>(&mut self, endpoint: &str) -> Result<T> {
        let response = self.get(endpoint).await?;
        let body = response.text().await.map_err(ActivityError::Connection)?;
        serde_json::from_str(&body).map_err(ActivityError::Decode)
    }

    /// Update rate limit from response headers.
    fn update_rate_limit(&mut self, response: &Response) {
        let header = |name: &str| -> Option<u64> {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
        };

        self.rate_limit = RateLimit {
            limit: header("x-ratelimit-limit"),
            remaining: header("x-ratelimit-remaining"),
            reset: header("x-ratelimit-reset"),
        };
    }

    /// Check response status and convert errors.
    fn check_response(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let reason = reason_phrase(status);
        if self.rate_limit.is_exhausted() {
            let reset_at = self
                .rate_limit
                .reset
                .and_then(|reset| DateTime::from_timestamp(reset as i64, 0))
                .map(|dt| {
                    dt.with_timezone(&Local)
                        .format("%Y-%m-%d %H:%M:%S")
                        .to_string()
                })
                .unwrap_or_else(|| "unknown".to_string());
            return Err(ActivityError::RateLimited {
                status: status.as_u16(),
                reason,
                reset_at,
            });
        }

        Err(ActivityError::Http {
            status: status.as_u16(),
            reason,
        })
    }
}

fn reason_phrase(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or("Unknown").to_string()
}
