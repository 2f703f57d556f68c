// Enrichment stage.
// Attaches repository metadata to each event; failures stay on the event.

use tracing::{debug, warn};

use crate::github::{Event, GitHubClient, RepoDetails};

/// Look up the event's repository and attach its summary.
///
/// Any failure is recorded as `RepoDetails::Error` on the event instead of
/// being returned.
pub async fn enrich(client: &mut GitHubClient, mut event: Event) -> Event {
    let details = match client.get_repo(&event.repo.name).await {
        Ok(meta) => {
            debug!(repo = %event.repo.name, "enriched");
            RepoDetails::from(meta)
        }
        Err(e) => {
            warn!(repo = %event.repo.name, error = %e, "enrichment failed");
            RepoDetails::Error {
                error: e.to_string(),
            }
        }
    };
    event.repo_details = Some(details);
    event
}

/// Enrich every event in turn, one request at a time.
pub async fn enrich_all(client: &mut GitHubClient, events: Vec<Event>) -> Vec<Event> {
    let mut enriched = Vec::with_capacity(events.len());
    for event in events {
        enriched.push(enrich(client, event).await);
    }
    enriched
}
