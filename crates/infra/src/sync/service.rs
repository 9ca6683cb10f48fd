//! Assembles the full sync stack from configuration.

use std::sync::Arc;

use chrono::NaiveDate;
use shelfsync_common::{LookupCache, RetryPolicy};
use shelfsync_core::{ListingMatcher, SyncOrchestrator};
use shelfsync_domain::{
    Account, AppConfig, ProgressFn, Result, ShelfsyncError, SyncKind, SyncReport,
};

use crate::config::resolve_accounts;
use crate::database::{
    DbManager, SqliteListingRepository, SqliteMatchCacheStore, SqliteOrderRepository,
    SqliteReturnRepository, SqliteRevenueRepository, SqliteSettlementRepository,
};
use crate::marketplace::client::MarketplaceClientConfig;
use crate::marketplace::endpoints::MarketplaceGatewayFactory;

/// One-call facade over the sync stack: config in, reports out.
///
/// Dashboards and schedulers construct this once and invoke
/// [`SyncService::sync`] per logical run (e.g. "orders for the last
/// 7 days"). There is no overall deadline here — wrap the call in a
/// timeout externally if one is needed.
pub struct SyncService {
    orchestrator: SyncOrchestrator,
    accounts: Vec<Account>,
    db: Arc<DbManager>,
}

impl SyncService {
    /// Build the full stack: pool, migrations, repositories, gateway
    /// factory, matcher, orchestrator.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let db = Arc::new(DbManager::new(&config.database.path, config.database.pool_size)?);
        db.run_migrations()?;

        let accounts = resolve_accounts(&config.accounts)?;

        let retry = RetryPolicy::default()
            .with_max_attempts(config.sync.max_attempts)
            .map_err(|e| ShelfsyncError::Config(e.to_string()))?;

        let factory = Arc::new(MarketplaceGatewayFactory::new(
            MarketplaceClientConfig::from_marketplace(&config.marketplace),
            retry,
        ));

        let listings = Arc::new(SqliteListingRepository::new(Arc::clone(&db)));
        let match_cache =
            LookupCache::with_store(Arc::new(SqliteMatchCacheStore::new(Arc::clone(&db))));
        let matcher = Arc::new(ListingMatcher::with_cache(listings, match_cache));

        let orchestrator = SyncOrchestrator::new(
            factory,
            Arc::new(SqliteOrderRepository::new(Arc::clone(&db))),
            Arc::new(SqliteRevenueRepository::new(Arc::clone(&db))),
            Arc::new(SqliteSettlementRepository::new(Arc::clone(&db))),
            Arc::new(SqliteReturnRepository::new(Arc::clone(&db))),
            matcher,
            config.sync.max_pages,
        );

        Ok(Self { orchestrator, accounts, db })
    }

    /// Accounts this service will sync (enabled, credentials resolved).
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Shared database handle, for collaborators that read synced rows.
    pub fn db(&self) -> &Arc<DbManager> {
        &self.db
    }

    /// Run one sync invocation across all accounts, or a single named one.
    pub async fn sync(
        &self,
        kind: SyncKind,
        only: Option<&str>,
        from: NaiveDate,
        to: NaiveDate,
        progress: ProgressFn,
    ) -> Result<Vec<SyncReport>> {
        self.orchestrator.sync(kind, &self.accounts, only, from, to, progress).await
    }
}
