//! SQLite-backed catalog listing lookups.

use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension, Row};
use shelfsync_core::ListingRepository;
use shelfsync_domain::{Listing, Result};
use tokio::task;

use super::manager::DbManager;
use crate::errors::{from_join, from_rusqlite};

const BY_ITEM_CODE: &str = "SELECT id, account, item_code, product_code, title FROM listings \
                            WHERE account = ?1 AND item_code = ?2";
const BY_PRODUCT_CODE: &str = "SELECT id, account, item_code, product_code, title FROM listings \
                               WHERE account = ?1 AND product_code = ?2";
const BY_TITLE: &str = "SELECT id, account, item_code, product_code, title FROM listings \
                        WHERE account = ?1 AND title = ?2 LIMIT 1";

pub struct SqliteListingRepository {
    db: Arc<DbManager>,
}

impl SqliteListingRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    /// Insert a catalog listing. The catalog is maintained by the
    /// product-management side; this entry point exists for seeding and
    /// tests.
    pub fn insert(
        &self,
        account: &str,
        item_code: &str,
        product_code: Option<&str>,
        title: &str,
    ) -> Result<i64> {
        let conn = self.db.get_connection()?;
        conn.execute(
            "INSERT INTO listings (account, item_code, product_code, title)
             VALUES (?1, ?2, ?3, ?4)",
            params![account, item_code, product_code, title],
        )
        .map_err(|e| from_rusqlite(&e))?;
        Ok(conn.last_insert_rowid())
    }

    async fn find_by(
        &self,
        sql: &'static str,
        account: String,
        value: String,
    ) -> Result<Option<Listing>> {
        let db = Arc::clone(&self.db);
        task::spawn_blocking(move || -> Result<Option<Listing>> {
            let conn = db.get_connection()?;
            conn.query_row(sql, params![account, value], row_to_listing)
                .optional()
                .map_err(|e| from_rusqlite(&e))
        })
        .await
        .map_err(|e| from_join(&e))?
    }
}

fn row_to_listing(row: &Row<'_>) -> rusqlite::Result<Listing> {
    Ok(Listing {
        id: row.get(0)?,
        account: row.get(1)?,
        item_code: row.get(2)?,
        product_code: row.get(3)?,
        title: row.get(4)?,
    })
}

#[async_trait]
impl ListingRepository for SqliteListingRepository {
    async fn find_by_item_code(&self, account: &str, item_code: &str) -> Result<Option<Listing>> {
        self.find_by(BY_ITEM_CODE, account.to_string(), item_code.to_string()).await
    }

    async fn find_by_product_code(
        &self,
        account: &str,
        product_code: &str,
    ) -> Result<Option<Listing>> {
        self.find_by(BY_PRODUCT_CODE, account.to_string(), product_code.to_string()).await
    }

    async fn find_by_title(&self, account: &str, title: &str) -> Result<Option<Listing>> {
        self.find_by(BY_TITLE, account.to_string(), title.to_string()).await
    }
}
