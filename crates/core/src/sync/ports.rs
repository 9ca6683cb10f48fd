//! Port interfaces for remote collections.

use std::sync::Arc;

use async_trait::async_trait;
use shelfsync_domain::{
    Account, DateWindow, OrderSheet, Result, ReturnRequest, RevenueLine, SettlementEntry,
};

/// One page of remote records within a date window.
#[derive(Debug, Clone)]
pub struct SourcePage<T> {
    pub records: Vec<T>,
    /// Continuation token for the next page, if any.
    pub next_token: Option<String>,
    /// Explicit continuation flag; only some endpoints expose it.
    pub has_next: Option<bool>,
}

impl<T> SourcePage<T> {
    /// Final page with no continuation.
    pub fn last(records: Vec<T>) -> Self {
        Self { records, next_token: None, has_next: None }
    }
}

/// A windowed, token-paginated remote collection.
///
/// One implementation per marketplace list endpoint. The paginator drives
/// it window by window; implementations only fetch and decode a single
/// page.
#[async_trait]
pub trait WindowedSource: Send + Sync {
    type Record;

    /// Short name used in progress messages and logs.
    fn label(&self) -> &'static str;

    /// Maximum date span the endpoint accepts per call.
    fn max_span_days(&self) -> i64;

    /// Fetch one page; `token` is absent for the first page of a window.
    async fn fetch_page(
        &self,
        window: &DateWindow,
        token: Option<&str>,
    ) -> Result<SourcePage<Self::Record>>;
}

/// All remote collections for one account, behind one signed client.
pub trait AccountGateway: Send + Sync {
    fn orders(&self) -> Arc<dyn WindowedSource<Record = OrderSheet>>;
    fn revenue(&self) -> Arc<dyn WindowedSource<Record = RevenueLine>>;
    fn settlements(&self) -> Arc<dyn WindowedSource<Record = SettlementEntry>>;
    fn returns(&self) -> Arc<dyn WindowedSource<Record = ReturnRequest>>;
}

/// Builds one gateway (and therefore one signed client) per account.
///
/// Credentials are never shared across accounts.
pub trait GatewayFactory: Send + Sync {
    fn gateway(&self, account: &Account) -> Result<Arc<dyn AccountGateway>>;
}
