//! Order sheets as returned by the marketplace order-list endpoint.

use serde::{Deserialize, Serialize};

/// One order sheet: a buyer checkout containing one or more line items.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSheet {
    pub order_id: String,
    #[serde(default)]
    pub ordered_at: Option<String>,
    #[serde(default)]
    pub paid_at: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub shipping_fee: Option<i64>,
    #[serde(default)]
    pub order_items: Vec<OrderItem>,
}

/// One line of an order sheet.
///
/// Carries the identifiers the matching cascade needs: a fine-grained item
/// id, a coarse product id, and the display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Marketplace-assigned id of the listed variant (most specific).
    pub item_id: String,
    /// Marketplace-assigned id of the parent product.
    #[serde(default)]
    pub product_id: Option<String>,
    /// Display name as shown to the buyer.
    #[serde(default)]
    pub item_name: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
    /// Unit sale price in minor currency units.
    #[serde(default)]
    pub unit_price: Option<i64>,
    #[serde(default)]
    pub discount_price: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
}
