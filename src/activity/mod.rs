// Activity pipeline module.
// Fetch (through the cache), filter, and enrich a user's event feed.

pub mod enrich;
pub mod fetcher;
pub mod filter;

pub use enrich::enrich_all;
pub use fetcher::ActivityFetcher;
pub use filter::{FilterSpec, select};
