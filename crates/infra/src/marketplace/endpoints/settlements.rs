//! Settlement ledger endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use shelfsync_core::{SourcePage, WindowedSource};
use shelfsync_domain::constants::SETTLEMENT_WINDOW_DAYS;
use shelfsync_domain::{DateWindow, Result, SettlementEntry};

use super::decode_records;
use crate::marketplace::client::MarketplaceClient;
use crate::marketplace::envelope::PagePayload;

/// Known-slow endpoint: the export is generated server-side, so requests
/// go out with the extended timeout. No page-size parameter — the server
/// fixes it.
pub struct SettlementSource {
    client: Arc<MarketplaceClient>,
    vendor_id: String,
}

impl SettlementSource {
    pub fn new(client: Arc<MarketplaceClient>, vendor_id: String) -> Self {
        Self { client, vendor_id }
    }
}

#[async_trait]
impl WindowedSource for SettlementSource {
    type Record = SettlementEntry;

    fn label(&self) -> &'static str {
        "settlements"
    }

    fn max_span_days(&self) -> i64 {
        SETTLEMENT_WINDOW_DAYS
    }

    async fn fetch_page(
        &self,
        window: &DateWindow,
        token: Option<&str>,
    ) -> Result<SourcePage<SettlementEntry>> {
        let path = format!("/v1/vendors/{}/settlements", self.vendor_id);

        let mut query: Vec<(&str, String)> = vec![
            ("settlementDateFrom", window.from.to_string()),
            ("settlementDateTo", window.to.to_string()),
        ];
        if let Some(token) = token {
            query.push(("nextToken", token.to_string()));
        }

        let root = self.client.get_slow(&path, &query).await?;
        let (records, next_token, has_next) =
            PagePayload::normalize(&root, &["items", "list"], "nextToken")?.into_parts();

        Ok(SourcePage {
            records: decode_records(records, "settlement entry"),
            next_token,
            has_next,
        })
    }
}
