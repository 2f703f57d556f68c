// Activity fetcher.
// Returns a user's event feed from the cache when fresh, otherwise from the API.

use tracing::{debug, info, warn};

use crate::cache::CacheStore;
use crate::error::Result;
use crate::github::{Event, GitHubClient};

/// Fetches event feeds, consulting an optional cache first.
///
/// Without a cache handle every call goes to the network and nothing is
/// written locally.
pub struct ActivityFetcher<'a> {
    client: &'a mut GitHubClient,
    cache: Option<&'a mut CacheStore>,
}

impl<'a> ActivityFetcher<'a> {
    pub fn new(client: &'a mut GitHubClient, cache: Option<&'a mut CacheStore>) -> Self {
        Self { client, cache }
    }

    /// Fetch the public events of `username`.
    pub async fn fetch(&mut self, username: &str) -> Result<Vec<Event>> {
        if let Some(cache) = self.cache.as_deref() {
            match cache.get(username) {
                // An empty feed is still a fresh answer; no refetch.
                Ok(Some(events)) => {
                    info!(username, count = events.len(), "using cached events");
                    return Ok(events);
                }
                Ok(None) => debug!(username, "cache miss"),
                Err(e) => warn!(username, error = %e, "cache read failed"),
            }
        }

        let events = self.client.get_user_events(username).await?;
        info!(username, count = events.len(), "fetched events");

        if let Some(cache) = self.cache.as_deref_mut() {
            // A failed write only costs the next run a network call.
            if let Err(e) = cache.put(username, &events) {
                warn!(username, error = %e, "cache write failed");
            }
        }

        Ok(events)
    }
}
