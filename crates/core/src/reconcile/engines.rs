//! Per-endpoint reconciliation engines.
//!
//! Each engine drives a [`Paginator`] over one remote collection and feeds
//! every record through the matching cascade and the idempotent upsert
//! path. A persistence failure for one record is counted and logged, never
//! aborting the batch: a single sync call can touch thousands of records
//! across dozens of pages.

use std::sync::Arc;

use chrono::NaiveDate;
use shelfsync_domain::{
    Account, OrderSheet, ProgressFn, Result, ReturnRequest, RevenueLine, SettlementEntry,
    SyncReport,
};
use tracing::warn;

use super::cap_raw_payload;
use super::ports::{OrderRepository, ReturnRepository, RevenueRepository, SettlementRepository};
use crate::matching::ListingMatcher;
use crate::sync::paginator::Paginator;
use crate::sync::ports::WindowedSource;

/// Syncs order sheets and their nested items.
pub struct OrdersEngine {
    repo: Arc<dyn OrderRepository>,
    matcher: Arc<ListingMatcher>,
}

impl OrdersEngine {
    pub fn new(repo: Arc<dyn OrderRepository>, matcher: Arc<ListingMatcher>) -> Self {
        Self { repo, matcher }
    }

    pub async fn run(
        &self,
        account: &Account,
        source: Arc<dyn WindowedSource<Record = OrderSheet>>,
        from: NaiveDate,
        to: NaiveDate,
        max_pages: u32,
        progress: &ProgressFn,
        report: &mut SyncReport,
    ) -> Result<()> {
        let label = source.label();
        let mut paginator = Paginator::new(source, from, to, max_pages)?;
        let total = paginator.window_count();

        while let Some(batch) = paginator.next_batch().await? {
            for sheet in &batch.records {
                report.fetched += 1;
                let raw = serde_json::to_string(sheet).unwrap_or_default();
                let raw = cap_raw_payload(&raw);

                for item in &sheet.order_items {
                    let outcome = async {
                        let listing_id = self
                            .matcher
                            .resolve(
                                &account.name,
                                &item.item_id,
                                item.product_id.as_deref(),
                                item.item_name.as_deref(),
                            )
                            .await?;
                        self.repo
                            .upsert_order_item(&account.name, sheet, item, listing_id, raw)
                            .await?;
                        Ok::<_, shelfsync_domain::ShelfsyncError>(listing_id.is_some())
                    }
                    .await;

                    match outcome {
                        Ok(matched) => {
                            report.upserted += 1;
                            if matched {
                                report.matched += 1;
                            }
                        }
                        Err(err) => {
                            warn!(
                                account = %account.name,
                                order_id = %sheet.order_id,
                                item_id = %item.item_id,
                                error = %err,
                                "failed to persist order item"
                            );
                            report.errors += 1;
                        }
                    }
                }
            }

            if batch.window_complete {
                progress.as_ref()(
                    batch.window_index + 1,
                    total,
                    &format!("{} {} {}", account.name, label, batch.window),
                );
            }
        }

        Ok(())
    }
}

/// Syncs recognized-revenue lines.
pub struct RevenueEngine {
    repo: Arc<dyn RevenueRepository>,
    matcher: Arc<ListingMatcher>,
}

impl RevenueEngine {
    pub fn new(repo: Arc<dyn RevenueRepository>, matcher: Arc<ListingMatcher>) -> Self {
        Self { repo, matcher }
    }

    pub async fn run(
        &self,
        account: &Account,
        source: Arc<dyn WindowedSource<Record = RevenueLine>>,
        from: NaiveDate,
        to: NaiveDate,
        max_pages: u32,
        progress: &ProgressFn,
        report: &mut SyncReport,
    ) -> Result<()> {
        let label = source.label();
        let mut paginator = Paginator::new(source, from, to, max_pages)?;
        let total = paginator.window_count();

        while let Some(batch) = paginator.next_batch().await? {
            for line in &batch.records {
                report.fetched += 1;
                let raw = serde_json::to_string(line).unwrap_or_default();
                let raw = cap_raw_payload(&raw);

                let outcome = async {
                    let listing_id = self
                        .matcher
                        .resolve(
                            &account.name,
                            &line.item_id,
                            line.product_id.as_deref(),
                            line.item_name.as_deref(),
                        )
                        .await?;
                    self.repo.upsert_line(&account.name, line, listing_id, raw).await?;
                    Ok::<_, shelfsync_domain::ShelfsyncError>(listing_id.is_some())
                }
                .await;

                match outcome {
                    Ok(matched) => {
                        report.upserted += 1;
                        if matched {
                            report.matched += 1;
                        }
                    }
                    Err(err) => {
                        warn!(
                            account = %account.name,
                            order_id = %line.order_id,
                            item_id = %line.item_id,
                            error = %err,
                            "failed to persist revenue line"
                        );
                        report.errors += 1;
                    }
                }
            }

            if batch.window_complete {
                progress.as_ref()(
                    batch.window_index + 1,
                    total,
                    &format!("{} {} {}", account.name, label, batch.window),
                );
            }
        }

        Ok(())
    }
}

/// Syncs settlement ledger entries. No matching: settlement rows carry no
/// item identifiers.
pub struct SettlementsEngine {
    repo: Arc<dyn SettlementRepository>,
}

impl SettlementsEngine {
    pub fn new(repo: Arc<dyn SettlementRepository>) -> Self {
        Self { repo }
    }

    pub async fn run(
        &self,
        account: &Account,
        source: Arc<dyn WindowedSource<Record = SettlementEntry>>,
        from: NaiveDate,
        to: NaiveDate,
        max_pages: u32,
        progress: &ProgressFn,
        report: &mut SyncReport,
    ) -> Result<()> {
        let label = source.label();
        let mut paginator = Paginator::new(source, from, to, max_pages)?;
        let total = paginator.window_count();

        while let Some(batch) = paginator.next_batch().await? {
            for entry in &batch.records {
                report.fetched += 1;
                let raw = serde_json::to_string(entry).unwrap_or_default();
                let raw = cap_raw_payload(&raw);

                match self.repo.upsert_entry(&account.name, entry, raw).await {
                    Ok(()) => report.upserted += 1,
                    Err(err) => {
                        warn!(
                            account = %account.name,
                            date = %entry.settlement_date,
                            entry_type = %entry.entry_type,
                            error = %err,
                            "failed to persist settlement entry"
                        );
                        report.errors += 1;
                    }
                }
            }

            if batch.window_complete {
                progress.as_ref()(
                    batch.window_index + 1,
                    total,
                    &format!("{} {} {}", account.name, label, batch.window),
                );
            }
        }

        Ok(())
    }
}

/// Syncs return requests and their nested items.
pub struct ReturnsEngine {
    repo: Arc<dyn ReturnRepository>,
    matcher: Arc<ListingMatcher>,
}

impl ReturnsEngine {
    pub fn new(repo: Arc<dyn ReturnRepository>, matcher: Arc<ListingMatcher>) -> Self {
        Self { repo, matcher }
    }

    pub async fn run(
        &self,
        account: &Account,
        source: Arc<dyn WindowedSource<Record = ReturnRequest>>,
        from: NaiveDate,
        to: NaiveDate,
        max_pages: u32,
        progress: &ProgressFn,
        report: &mut SyncReport,
    ) -> Result<()> {
        let label = source.label();
        let mut paginator = Paginator::new(source, from, to, max_pages)?;
        let total = paginator.window_count();

        while let Some(batch) = paginator.next_batch().await? {
            for request in &batch.records {
                report.fetched += 1;
                let raw = serde_json::to_string(request).unwrap_or_default();
                let raw = cap_raw_payload(&raw);

                for item in &request.return_items {
                    let outcome = async {
                        let listing_id = self
                            .matcher
                            .resolve(
                                &account.name,
                                &item.item_id,
                                item.product_id.as_deref(),
                                item.item_name.as_deref(),
                            )
                            .await?;
                        self.repo
                            .upsert_return_item(&account.name, request, item, listing_id, raw)
                            .await?;
                        Ok::<_, shelfsync_domain::ShelfsyncError>(listing_id.is_some())
                    }
                    .await;

                    match outcome {
                        Ok(matched) => {
                            report.upserted += 1;
                            if matched {
                                report.matched += 1;
                            }
                        }
                        Err(err) => {
                            warn!(
                                account = %account.name,
                                return_id = %request.return_id,
                                item_id = %item.item_id,
                                error = %err,
                                "failed to persist return item"
                            );
                            report.errors += 1;
                        }
                    }
                }
            }

            if batch.window_complete {
                progress.as_ref()(
                    batch.window_index + 1,
                    total,
                    &format!("{} {} {}", account.name, label, batch.window),
                );
            }
        }

        Ok(())
    }
}
