// Cache store for the last fetched event list per user.
// Handles the SQLite table, JSON serialization of payloads, and freshness checks.

use std::path::Path;

use chrono::{DateTime, TimeDelta, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use tracing::{debug, warn};

use crate::error::{ActivityError, Result};
use crate::github::Event;

/// How long a cached event list stays usable: 10 minutes.
pub const FRESHNESS_WINDOW: TimeDelta = TimeDelta::minutes(10);

/// One cached event list with metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    /// The cached events, as returned by the API.
    pub events: Vec<Event>,
    /// When the events were fetched.
    pub fetched_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Check if this entry is still usable at `now`.
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.fetched_at) < FRESHNESS_WINDOW
    }
}

/// SQLite-backed store keyed by username.
///
/// Holds at most one row per user; writes replace the previous row in a
/// single transaction. There is no bound on the number of users.
pub struct CacheStore {
    conn: Connection,
}

impl CacheStore {
    /// Open (or create) the store at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init_schema()?;

        debug!(path = %path.display(), "activity cache opened");
        Ok(store)
    }

    /// Open a throwaway in-memory store.
    #[cfg(test)]
    pub fn in_memory() -> Result<Self> {
        let store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS activities (
                username TEXT NOT NULL,
                data TEXT NOT NULL,
                fetched_at INTEGER NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Cached events for `username`, if an entry exists and is fresh.
    pub fn get(&self, username: &str) -> Result<Option<Vec<Event>>> {
        self.get_at(username, Utc::now())
    }

    /// Same as [`CacheStore::get`], judging freshness at `now`.
    pub fn get_at(&self, username: &str, now: DateTime<Utc>) -> Result<Option<Vec<Event>>> {
        match self.read_entry(username)? {
            Some(entry) if entry.is_fresh_at(now) => Ok(Some(entry.events)),
            Some(entry) => {
                debug!(username, fetched_at = %entry.fetched_at, "cache entry expired");
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// Read the stored entry for `username` regardless of age.
    ///
    /// A payload that no longer decodes is reported as absent.
    pub fn read_entry(&self, username: &str) -> Result<Option<CacheEntry>> {
        let row: Option<(String, i64)> = self
            .conn
            .query_row(
                "SELECT data, fetched_at FROM activities
                 WHERE username = ?1
                 ORDER BY fetched_at DESC
                 LIMIT 1",
                params![username],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let Some((data, fetched_at)) = row else {
            return Ok(None);
        };

        let events: Vec<Event> = match serde_json::from_str(&data) {
            Ok(events) => events,
            Err(e) => {
                warn!(username, error = %e, "discarding unreadable cache entry");
                return Ok(None);
            }
        };
        let Some(fetched_at) = DateTime::from_timestamp(fetched_at, 0) else {
            warn!(username, fetched_at, "discarding cache entry with invalid timestamp");
            return Ok(None);
        };

        Ok(Some(CacheEntry {
            events,
            fetched_at,
        }))
    }

    /// Replace the entry for `username` with `events`, stamped now.
    pub fn put(&mut self, username: &str, events: &[Event]) -> Result<()> {
        self.put_at(username, events, Utc::now())
    }

    /// Replace the entry for `username` with `events`, stamped `fetched_at`.
    pub fn put_at(
        &mut self,
        username: &str,
        events: &[Event],
        fetched_at: DateTime<Utc>,
    ) -> Result<()> {
        let data = serde_json::to_string(events)
            .map_err(|e| ActivityError::Serialize(e.to_string()))?;

        let tx = self.conn.transaction()?;
        tx.execute(
            "DELETE FROM activities WHERE username = ?1",
            params![username],
        )?;
        tx.execute(
            "INSERT INTO activities (username, data, fetched_at) VALUES (?1, ?2, ?3)",
            params![username, data, fetched_at.timestamp()],
        )?;
        tx.commit()?;

        debug!(username, count = events.len(), "cached events");
        Ok(())
    }

    #[cfg(test)]
    fn row_count(&self, username: &str) -> i64 {
        self.conn
            .query_row(
                "SELECT COUNT(*) FROM activities WHERE username = ?1",
                params![username],
                |row| row.get(0),
            )
            .unwrap()
    }
}
