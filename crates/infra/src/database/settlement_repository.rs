//! Settlement entry persistence, keyed by
//! `(account, year_month, entry_type, settlement_date)`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::params;
use shelfsync_core::SettlementRepository;
use shelfsync_domain::{Result, SettlementEntry};
use tokio::task;

use super::manager::DbManager;
use crate::errors::{from_join, from_rusqlite};

const UPSERT: &str = "\
INSERT INTO settlements (
    account, year_month, entry_type, settlement_date, amount,
    payout_status, memo, raw_payload, updated_at
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
ON CONFLICT (account, year_month, entry_type, settlement_date) DO UPDATE SET
    amount = excluded.amount,
    payout_status = excluded.payout_status,
    memo = excluded.memo,
    raw_payload = excluded.raw_payload,
    updated_at = excluded.updated_at";

pub struct SqliteSettlementRepository {
    db: Arc<DbManager>,
}

impl SqliteSettlementRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SettlementRepository for SqliteSettlementRepository {
    async fn upsert_entry(&self, account: &str, entry: &SettlementEntry, raw: &str) -> Result<()> {
        let db = Arc::clone(&self.db);
        let account = account.to_string();
        let entry = entry.clone();
        let raw = raw.to_string();

        task::spawn_blocking(move || -> Result<()> {
            let conn = db.get_connection()?;
            conn.execute(
                UPSERT,
                params![
                    account,
                    // The month bucket is derived from the entry date, so a
                    // range crossing a month boundary lands rows in both
                    // months.
                    entry.year_month(),
                    entry.entry_type,
                    entry.settlement_date.to_string(),
                    entry.amount,
                    entry.payout_status,
                    entry.memo,
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
