//! Drives one sync invocation across every enabled account.

use std::sync::Arc;

use chrono::NaiveDate;
use shelfsync_domain::{
    Account, ProgressFn, Result, ShelfsyncError, SyncKind, SyncReport,
};
use tokio::task::JoinSet;
use tracing::{error, info, instrument};

use crate::matching::ListingMatcher;
use crate::reconcile::engines::{OrdersEngine, ReturnsEngine, RevenueEngine, SettlementsEngine};
use crate::reconcile::ports::{
    OrderRepository, ReturnRepository, RevenueRepository, SettlementRepository,
};
use crate::sync::ports::GatewayFactory;

/// Runs one logical sync (e.g. "orders for the last 7 days") over all
/// enabled accounts.
///
/// Accounts run in parallel — each owns an independent signed client with
/// its own rate budget — while everything within one account stays
/// sequential (continuation tokens are stateful). A failing account
/// records the failure on its own report and never halts its siblings.
/// There is no overall deadline here; callers wrap the invocation if they
/// need one.
pub struct SyncOrchestrator {
    factory: Arc<dyn GatewayFactory>,
    orders: Arc<OrdersEngine>,
    revenue: Arc<RevenueEngine>,
    settlements: Arc<SettlementsEngine>,
    returns: Arc<ReturnsEngine>,
    max_pages: u32,
}

impl SyncOrchestrator {
    pub fn new(
        factory: Arc<dyn GatewayFactory>,
        order_repo: Arc<dyn OrderRepository>,
        revenue_repo: Arc<dyn RevenueRepository>,
        settlement_repo: Arc<dyn SettlementRepository>,
        return_repo: Arc<dyn ReturnRepository>,
        matcher: Arc<ListingMatcher>,
        max_pages: u32,
    ) -> Self {
        Self {
            factory,
            orders: Arc::new(OrdersEngine::new(order_repo, matcher.clone())),
            revenue: Arc::new(RevenueEngine::new(revenue_repo, matcher.clone())),
            settlements: Arc::new(SettlementsEngine::new(settlement_repo)),
            returns: Arc::new(ReturnsEngine::new(return_repo, matcher)),
            max_pages,
        }
    }

    /// Sync `kind` for `[from, to]` across `accounts`, optionally filtered
    /// to a single named account. Returns one report per selected account,
    /// in input order.
    #[instrument(skip(self, accounts, progress), fields(kind = kind.label()))]
    pub async fn sync(
        &self,
        kind: SyncKind,
        accounts: &[Account],
        only: Option<&str>,
        from: NaiveDate,
        to: NaiveDate,
        progress: ProgressFn,
    ) -> Result<Vec<SyncReport>> {
        let selected: Vec<Account> = accounts
            .iter()
            .filter(|a| a.enabled)
            .filter(|a| only.map_or(true, |name| a.name == name))
            .cloned()
            .collect();

        if selected.is_empty() {
            if let Some(name) = only {
                return Err(ShelfsyncError::NotFound(format!(
                    "no enabled account named '{name}'"
                )));
            }
            return Ok(Vec::new());
        }

        info!(accounts = selected.len(), from = %from, to = %to, "starting sync");

        let mut tasks: JoinSet<(usize, SyncReport)> = JoinSet::new();
        let names: Vec<String> = selected.iter().map(|a| a.name.clone()).collect();

        for (index, account) in selected.into_iter().enumerate() {
            let factory = Arc::clone(&self.factory);
            let orders = Arc::clone(&self.orders);
            let revenue = Arc::clone(&self.revenue);
            let settlements = Arc::clone(&self.settlements);
            let returns = Arc::clone(&self.returns);
            let progress = Arc::clone(&progress);
            let max_pages = self.max_pages;

            tasks.spawn(async move {
                let mut report = SyncReport::new(&account.name);

                let gateway = match factory.gateway(&account) {
                    Ok(gateway) => gateway,
                    Err(err) => {
                        error!(account = %account.name, error = %err, "gateway setup failed");
                        report.errors += 1;
                        report.failure = Some(err.to_string());
                        return (index, report);
                    }
                };

                let outcome = match kind {
                    SyncKind::Orders => {
                        orders
                            .run(
                                &account,
                                gateway.orders(),
                                from,
                                to,
                                max_pages,
                                &progress,
                                &mut report,
                            )
                            .await
                    }
                    SyncKind::Revenue => {
                        revenue
                            .run(
                                &account,
                                gateway.revenue(),
                                from,
                                to,
                                max_pages,
                                &progress,
                                &mut report,
                            )
                            .await
                    }
                    SyncKind::Settlements => {
                        settlements
                            .run(
                                &account,
                                gateway.settlements(),
                                from,
                                to,
                                max_pages,
                                &progress,
                                &mut report,
                            )
                            .await
                    }
                    SyncKind::Returns => {
                        returns
                            .run(
                                &account,
                                gateway.returns(),
                                from,
                                to,
                                max_pages,
                                &progress,
                                &mut report,
                            )
                            .await
                    }
                };

                if let Err(err) = outcome {
                    // A client-level failure aborts this account's fetch;
                    // siblings keep running.
                    error!(account = %account.name, error = %err, "account sync aborted");
                    report.errors += 1;
                    report.failure = Some(err.to_string());
                }

                (index, report)
            });
        }

        let mut reports: Vec<Option<SyncReport>> = vec![None; names.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, report)) => reports[index] = Some(report),
                Err(join_err) => {
                    error!(error = %join_err, "account sync task panicked");
                }
            }
        }

        let reports = reports
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.unwrap_or_else(|| {
                    let mut report = SyncReport::new(&names[index]);
                    report.errors += 1;
                    report.failure = Some("sync task panicked".to_string());
                    report
                })
            })
            .collect();

        Ok(reports)
    }
}
