// Cache module for local activity caching.
// Stores the most recent event feed per user so repeated runs skip the network.

pub mod paths;
pub mod store;

pub use paths::db_path;
pub use store::CacheStore;
