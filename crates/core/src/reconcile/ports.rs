//! Port interfaces for persistence.
//!
//! Every upsert is keyed by the record's account-scoped natural key;
//! implementations insert-or-update so re-ingestion never duplicates rows,
//! and never replace an established listing link with null.

use async_trait::async_trait;
use shelfsync_domain::{
    Listing, OrderItem, OrderSheet, Result, ReturnItem, ReturnRequest, RevenueLine,
    SettlementEntry,
};

/// Read access to the catalog listings the matcher cascades over.
#[async_trait]
pub trait ListingRepository: Send + Sync {
    async fn find_by_item_code(&self, account: &str, item_code: &str) -> Result<Option<Listing>>;

    async fn find_by_product_code(
        &self,
        account: &str,
        product_code: &str,
    ) -> Result<Option<Listing>>;

    async fn find_by_title(&self, account: &str, title: &str) -> Result<Option<Listing>>;
}

/// Order items, keyed by `(account, order_id, item_id)`.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn upsert_order_item(
        &self,
        account: &str,
        sheet: &OrderSheet,
        item: &OrderItem,
        listing_id: Option<i64>,
        raw: &str,
    ) -> Result<()>;
}

/// Revenue lines, keyed by `(account, recognition_date, order_id, item_id)`.
#[async_trait]
pub trait RevenueRepository: Send + Sync {
    async fn upsert_line(
        &self,
        account: &str,
        line: &RevenueLine,
        listing_id: Option<i64>,
        raw: &str,
    ) -> Result<()>;
}

/// Settlement entries, keyed by `(account, year_month, entry_type, date)`.
#[async_trait]
pub trait SettlementRepository: Send + Sync {
    async fn upsert_entry(&self, account: &str, entry: &SettlementEntry, raw: &str) -> Result<()>;
}

/// Return items, keyed by `(account, return_id, item_id)`.
#[async_trait]
pub trait ReturnRepository: Send + Sync {
    async fn upsert_return_item(
        &self,
        account: &str,
        request: &ReturnRequest,
        item: &ReturnItem,
        listing_id: Option<i64>,
        raw: &str,
    ) -> Result<()>;
}
