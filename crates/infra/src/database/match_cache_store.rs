//! Durable backing for the listing match cache.

use std::sync::Arc;

use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use shelfsync_common::LookupStore;
use tracing::warn;

use super::manager::DbManager;

/// SQLite-backed store for positive match results.
///
/// Only established matches are persisted: a negative result may become
/// positive once the catalog grows, so it stays memory-only. All
/// operations are best-effort — a failure is logged and the lookup
/// proceeds as a miss.
pub struct SqliteMatchCacheStore {
    db: Arc<DbManager>,
}

impl SqliteMatchCacheStore {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

impl LookupStore<Option<i64>> for SqliteMatchCacheStore {
    fn load(&self, key: &str) -> Option<Option<i64>> {
        let conn = match self.db.get_connection() {
            Ok(conn) => conn,
            Err(err) => {
                warn!(error = %err, "match cache load skipped");
                return None;
            }
        };

        let found = conn
            .query_row(
                "SELECT listing_id FROM match_cache WHERE lookup_key = ?1",
                params![key],
                |row| row.get::<_, i64>(0),
            )
            .optional();

        match found {
            Ok(listing_id) => listing_id.map(Some),
            Err(err) => {
                warn!(error = %err, "match cache load failed");
                None
            }
        }
    }

    fn store(&self, key: &str, value: &Option<i64>) {
        let Some(listing_id) = value else {
            return;
        };

        let conn = match self.db.get_connection() {
            Ok(conn) => conn,
            Err(err) => {
                warn!(error = %err, "match cache store skipped");
                return;
            }
        };

        let written = conn.execute(
            "INSERT OR REPLACE INTO match_cache (lookup_key, listing_id, created_at)
             VALUES (?1, ?2, ?3)",
            params![key, listing_id, Utc::now().timestamp()],
        );

        if let Err(err) = written {
            warn!(error = %err, "match cache store failed");
        }
    }
}
