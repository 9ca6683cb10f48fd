//! Order item persistence, keyed by `(account, order_id, item_id)`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::params;
use shelfsync_core::OrderRepository;
use shelfsync_domain::{OrderItem, OrderSheet, Result};
use tokio::task;

use super::manager::DbManager;
use crate::errors::{from_join, from_rusqlite};

const UPSERT: &str = "\
INSERT INTO order_items (
    account, order_id, item_id, product_id, item_name, quantity,
    unit_price, discount_price, item_status, order_status, ordered_at,
    paid_at, listing_id, raw_payload, updated_at
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
ON CONFLICT (account, order_id, item_id) DO UPDATE SET
    product_id = excluded.product_id,
    item_name = excluded.item_name,
    quantity = excluded.quantity,
    unit_price = excluded.unit_price,
    discount_price = excluded.discount_price,
    item_status = excluded.item_status,
    order_status = excluded.order_status,
    ordered_at = excluded.ordered_at,
    paid_at = excluded.paid_at,
    listing_id = COALESCE(excluded.listing_id, order_items.listing_id),
    raw_payload = excluded.raw_payload,
    updated_at = excluded.updated_at";

pub struct SqliteOrderRepository {
    db: Arc<DbManager>,
}

impl SqliteOrderRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderRepository for SqliteOrderRepository {
    async fn upsert_order_item(
        &self,
        account: &str,
        sheet: &OrderSheet,
        item: &OrderItem,
        listing_id: Option<i64>,
        raw: &str,
    ) -> Result<()> {
        let db = Arc::clone(&self.db);
        let account = account.to_string();
        let sheet = sheet.clone();
        let item = item.clone();
        let raw = raw.to_string();

        task::spawn_blocking(move || -> Result<()> {
            let conn = db.get_connection()?;
            conn.execute(
                UPSERT,
                params![
                    account,
                    sheet.order_id,
                    item.item_id,
                    item.product_id,
                    item.item_name,
                    item.quantity,
                    item.unit_price,
                    item.discount_price,
                    item.status,
                    sheet.status,
                    sheet.ordered_at,
                    sheet.paid_at,
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
