//! Return item persistence, keyed by `(account, return_id, item_id)`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::params;
use shelfsync_core::ReturnRepository;
use shelfsync_domain::{Result, ReturnItem, ReturnRequest};
use tokio::task;

use super::manager::DbManager;
use crate::errors::{from_join, from_rusqlite};

const UPSERT: &str = "\
INSERT INTO return_items (
    account, return_id, item_id, order_id, product_id, item_name,
    quantity, refund_amount, reason, return_status, requested_at,
    listing_id, raw_payload, updated_at
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
ON CONFLICT (account, return_id, item_id) DO UPDATE SET
    order_id = excluded.order_id,
    product_id = excluded.product_id,
    item_name = excluded.item_name,
    quantity = excluded.quantity,
    refund_amount = excluded.refund_amount,
    reason = excluded.reason,
    return_status = excluded.return_status,
    requested_at = excluded.requested_at,
    listing_id = COALESCE(excluded.listing_id, return_items.listing_id),
    raw_payload = excluded.raw_payload,
    updated_at = excluded.updated_at";

pub struct SqliteReturnRepository {
    db: Arc<DbManager>,
}

impl SqliteReturnRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReturnRepository for SqliteReturnRepository {
    async fn upsert_return_item(
        &self,
        account: &str,
        request: &ReturnRequest,
        item: &ReturnItem,
        listing_id: Option<i64>,
        raw: &str,
    ) -> Result<()> {
        let db = Arc::clone(&self.db);
        let account = account.to_string();
        let request = request.clone();
        let item = item.clone();
        let raw = raw.to_string();

        task::spawn_blocking(move || -> Result<()> {
            let conn = db.get_connection()?;
            conn.execute(
                UPSERT,
                params![
                    account,
                    request.return_id,
                    item.item_id,
                    request.order_id,
                    item.product_id,
                    item.item_name,
                    item.quantity,
                    item.refund_amount,
                    request.reason,
                    request.status,
                    request.requested_at,
                    listing_id,
                    raw,
                    Utc::now().timestamp(),
                ],
            )
            .map_err(|e| from_rusqlite(&e))?;
            Ok(())
        })
        .await
        .map_err(|e| from_join(&e))?
    }
}
