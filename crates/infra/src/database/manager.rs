//! Database connection manager backed by an r2d2 SQLite pool.

use std::path::{Path, PathBuf};

use r2d2::PooledConnection;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;
use shelfsync_domain::{Result, ShelfsyncError};
use tracing::info;

use crate::errors::{from_pool, from_rusqlite};

const SCHEMA_VERSION: i32 = 1;
const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Pooled connection handle.
pub type DbConnection = PooledConnection<SqliteConnectionManager>;

/// Database manager wrapping the shared connection pool.
///
/// WAL mode plus a busy timeout keeps concurrent account workers writable
/// without the repositories doing their own serialization.
pub struct DbManager {
    pool: r2d2::Pool<SqliteConnectionManager>,
    path: PathBuf,
}

impl DbManager {
    /// Create a new manager with the given pool size.
    pub fn new<P: AsRef<Path>>(db_path: P, pool_size: u32) -> Result<Self> {
        let path = db_path.as_ref().to_path_buf();

        let manager = SqliteConnectionManager::file(&path).with_init(|conn| {
            conn.execute_batch(
                "PRAGMA journal_mode = WAL;
                 PRAGMA foreign_keys = ON;
                 PRAGMA busy_timeout = 5000;",
            )
        });

        let pool = r2d2::Pool::builder()
            .max_size(pool_size.max(1))
            .build(manager)
            .map_err(|e| ShelfsyncError::Database(format!("failed to build pool: {e}")))?;

        info!(db_path = %path.display(), max_connections = pool.max_size(), "sqlite pool initialised");

        Ok(Self { pool, path })
    }

    /// Acquire a connection from the pool.
    pub fn get_connection(&self) -> Result<DbConnection> {
        self.pool.get().map_err(|e| from_pool(&e))
    }

    /// Ensure the full schema exists on the current database.
    pub fn run_migrations(&self) -> Result<()> {
        let conn = self.get_connection()?;
        conn.execute_batch(SCHEMA_SQL).map_err(|e| from_rusqlite(&e))?;
        conn.execute(
            "INSERT OR IGNORE INTO schema_version (version, applied_at)
             VALUES (?1, CAST(strftime('%s','now') AS INTEGER))",
            params![SCHEMA_VERSION],
        )
        .map_err(|e| from_rusqlite(&e))?;
        Ok(())
    }

    /// Return the configured database path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Verify database connectivity with a trivial query.
    pub fn health_check(&self) -> Result<()> {
        let conn = self.get_connection()?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i32>(0)).map_err(|e| from_rusqlite(&e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn migrations_create_schema_version() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let manager = DbManager::new(&db_path, 4).unwrap();
        manager.run_migrations().unwrap();

        let conn = manager.get_connection().unwrap();
        let version: i32 =
            conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0)).unwrap();
        assert_eq!(version, SCHEMA_VERSION);
    }

    #[test]
    fn migrations_are_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let manager = DbManager::new(&db_path, 2).unwrap();
        manager.run_migrations().unwrap();
        manager.run_migrations().unwrap();

        manager.health_check().unwrap();
    }
}
