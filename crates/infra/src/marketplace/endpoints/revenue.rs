//! Revenue-recognition list endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use shelfsync_core::{SourcePage, WindowedSource};
use shelfsync_domain::constants::REVENUE_WINDOW_DAYS;
use shelfsync_domain::{DateWindow, Result, RevenueLine};

use super::decode_records;
use crate::marketplace::client::MarketplaceClient;
use crate::marketplace::envelope::PagePayload;

/// Unlike the other endpoints this one calls its token `token` and
/// reports an explicit `hasNext` flag alongside it.
pub struct RevenueLineSource {
    client: Arc<MarketplaceClient>,
    vendor_id: String,
    max_per_page: u32,
}

impl RevenueLineSource {
    pub fn new(client: Arc<MarketplaceClient>, vendor_id: String, max_per_page: u32) -> Self {
        Self { client, vendor_id, max_per_page }
    }
}

#[async_trait]
impl WindowedSource for RevenueLineSource {
    type Record = RevenueLine;

    fn label(&self) -> &'static str {
        "revenue"
    }

    fn max_span_days(&self) -> i64 {
        REVENUE_WINDOW_DAYS
    }

    async fn fetch_page(
        &self,
        window: &DateWindow,
        token: Option<&str>,
    ) -> Result<SourcePage<RevenueLine>> {
        let path = format!("/v1/vendors/{}/revenue-history", self.vendor_id);

        let mut query: Vec<(&str, String)> = vec![
            ("recognitionDateFrom", window.from.to_string()),
            ("recognitionDateTo", window.to.to_string()),
            ("maxPerPage", self.max_per_page.to_string()),
        ];
        if let Some(token) = token {
            query.push(("token", token.to_string()));
        }

        let root = self.client.get(&path, &query).await?;
        let (records, next_token, has_next) =
            PagePayload::normalize(&root, &["items", "contents"], "token")?.into_parts();

        Ok(SourcePage { records: decode_records(records, "revenue line"), next_token, has_next })
    }
}
