//! Return-request list endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use shelfsync_core::{SourcePage, WindowedSource};
use shelfsync_domain::constants::RETURN_WINDOW_DAYS;
use shelfsync_domain::{DateWindow, Result, ReturnRequest};

use super::decode_records;
use crate::marketplace::client::MarketplaceClient;
use crate::marketplace::envelope::PagePayload;

/// Tightest window of the four endpoints (29 days).
pub struct ReturnRequestSource {
    client: Arc<MarketplaceClient>,
    vendor_id: String,
    max_per_page: u32,
}

impl ReturnRequestSource {
    pub fn new(client: Arc<MarketplaceClient>, vendor_id: String, max_per_page: u32) -> Self {
        Self { client, vendor_id, max_per_page }
    }
}

#[async_trait]
impl WindowedSource for ReturnRequestSource {
    type Record = ReturnRequest;

    fn label(&self) -> &'static str {
        "returns"
    }

    fn max_span_days(&self) -> i64 {
        RETURN_WINDOW_DAYS
    }

    async fn fetch_page(
        &self,
        window: &DateWindow,
        token: Option<&str>,
    ) -> Result<SourcePage<ReturnRequest>> {
        let path = format!("/v1/vendors/{}/return-requests", self.vendor_id);

        let mut query: Vec<(&str, String)> = vec![
            ("createdAtFrom", window.from.to_string()),
            ("createdAtTo", window.to.to_string()),
            ("maxPerPage", self.max_per_page.to_string()),
        ];
        if let Some(token) = token {
            query.push(("nextToken", token.to_string()));
        }

        let root = self.client.get(&path, &query).await?;
        let (records, next_token, has_next) =
            PagePayload::normalize(&root, &["items", "contents"], "nextToken")?.into_parts();

        Ok(SourcePage {
            records: decode_records(records, "return request"),
            next_token,
            has_next,
        })
    }
}
