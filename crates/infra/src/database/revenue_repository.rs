//! Revenue line persistence, keyed by
//! `(account, recognition_date, order_id, item_id)`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::params;
use shelfsync_core::RevenueRepository;
use shelfsync_domain::{Result, RevenueLine};
use tokio::task;

use super::manager::DbManager;
use crate::errors::{from_join, from_rusqlite};

const UPSERT: &str = "\
INSERT INTO revenue_lines (
    account, recognition_date, order_id, item_id, product_id, item_name,
    quantity, sale_amount, fee_amount, net_amount, tax_type, listing_id,
    raw_payload, updated_at
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
ON CONFLICT (account, recognition_date, order_id, item_id) DO UPDATE SET
    product_id = excluded.product_id,
    item_name = excluded.item_name,
    quantity = excluded.quantity,
    sale_amount = excluded.sale_amount,
    fee_amount = excluded.fee_amount,
    net_amount = excluded.net_amount,
    tax_type = excluded.tax_type,
    listing_id = COALESCE(excluded.listing_id, revenue_lines.listing_id),
    raw_payload = excluded.raw_payload,
    updated_at = excluded.updated_at";

pub struct SqliteRevenueRepository {
    db: Arc<DbManager>,
}

impl SqliteRevenueRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RevenueRepository for SqliteRevenueRepository {
    async fn upsert_line(
        &self,
        account: &str,
        line: &RevenueLine,
        listing_id: Option<i64>,
        raw: &str,
    ) -> Result<()> {
        let db = Arc::clone(&self.db);
        let account = account.to_string();
        let line = line.clone();
        let raw = raw.to_string();

        task::spawn_blocking(move || -> Result<()> {
            let conn = db.get_connection()?;
            conn.execute(
                UPSERT,
                params![
                    account,
                    line.recognition_date.to_string(),
                    line.order_id,
                    line.item_id,
                    line.product_id,
                    line.item_name,
                    line.quantity,
                    line.sale_amount,
                    line.fee_amount,
                    line.net_amount,
                    line.tax_type,
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
