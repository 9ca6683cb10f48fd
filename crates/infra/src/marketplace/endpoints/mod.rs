//! Windowed sources for each marketplace list endpoint, and the gateway
//! bundling them per account.
//!
//! Field and parameter names vary per endpoint (token parameter, record
//! wrapper field, date parameter names) — that variance is the API's, and
//! it is confined to this module.

pub mod orders;
pub mod returns;
pub mod revenue;
pub mod settlements;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use shelfsync_common::RetryPolicy;
use shelfsync_core::{AccountGateway, GatewayFactory, WindowedSource};
use shelfsync_domain::{
    Account, OrderSheet, Result, ReturnRequest, RevenueLine, SettlementEntry,
};
use tracing::warn;

use super::client::{MarketplaceClient, MarketplaceClientConfig};

/// Decode raw page records, skipping (and logging) undecodable ones so a
/// malformed record never aborts its page.
fn decode_records<T: DeserializeOwned>(records: Vec<Value>, what: &str) -> Vec<T> {
    records
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(error = %err, "skipping undecodable {what} record");
                None
            }
        })
        .collect()
}

/// All four collections for one account, behind one signed client.
pub struct MarketplaceGateway {
    client: Arc<MarketplaceClient>,
    vendor_id: String,
    max_per_page: u32,
}

impl MarketplaceGateway {
    pub fn new(client: Arc<MarketplaceClient>, vendor_id: String, max_per_page: u32) -> Self {
        Self { client, vendor_id, max_per_page }
    }
}

impl AccountGateway for MarketplaceGateway {
    fn orders(&self) -> Arc<dyn WindowedSource<Record = OrderSheet>> {
        Arc::new(orders::OrderSheetSource::new(
            Arc::clone(&self.client),
            self.vendor_id.clone(),
            self.max_per_page,
        ))
    }

    fn revenue(&self) -> Arc<dyn WindowedSource<Record = RevenueLine>> {
        Arc::new(revenue::RevenueLineSource::new(
            Arc::clone(&self.client),
            self.vendor_id.clone(),
            self.max_per_page,
        ))
    }

    fn settlements(&self) -> Arc<dyn WindowedSource<Record = SettlementEntry>> {
        Arc::new(settlements::SettlementSource::new(
            Arc::clone(&self.client),
            self.vendor_id.clone(),
        ))
    }

    fn returns(&self) -> Arc<dyn WindowedSource<Record = ReturnRequest>> {
        Arc::new(returns::ReturnRequestSource::new(
            Arc::clone(&self.client),
            self.vendor_id.clone(),
            self.max_per_page,
        ))
    }
}

/// Builds one signed client (and gateway) per account.
pub struct MarketplaceGatewayFactory {
    config: MarketplaceClientConfig,
    retry: RetryPolicy,
}

impl MarketplaceGatewayFactory {
    pub fn new(config: MarketplaceClientConfig, retry: RetryPolicy) -> Self {
        Self { config, retry }
    }
}

impl GatewayFactory for MarketplaceGatewayFactory {
    fn gateway(&self, account: &Account) -> Result<Arc<dyn AccountGateway>> {
        let client = MarketplaceClient::new(
            self.config.clone(),
            &account.access_key,
            &account.secret_key,
            self.retry.clone(),
        )?;

        Ok(Arc::new(MarketplaceGateway::new(
            Arc::new(client),
            account.vendor_id.clone(),
            account.max_per_page,
        )))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn undecodable_records_are_skipped_not_fatal() {
        let records = vec![
            json!({"orderId": "O-1"}),
            json!({"unexpected": true}),
            json!({"orderId": "O-2"}),
        ];

        let decoded: Vec<OrderSheet> = decode_records(records, "order sheet");
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[1].order_id, "O-2");
    }
}
