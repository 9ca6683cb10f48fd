//! Revenue recognition lines.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One recognized-revenue line for a sold item.
///
/// Keyed by `(account, recognition_date, order_id, item_id)` once persisted:
/// the same order item can produce lines on several recognition dates
/// (sale, refund, adjustment).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueLine {
    pub recognition_date: NaiveDate,
    pub order_id: String,
    pub item_id: String,
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub item_name: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
    /// Gross sale amount in minor currency units.
    #[serde(default)]
    pub sale_amount: Option<i64>,
    /// Marketplace commission withheld.
    #[serde(default)]
    pub fee_amount: Option<i64>,
    /// Amount payable to the seller after fees.
    #[serde(default)]
    pub net_amount: Option<i64>,
    #[serde(default)]
    pub tax_type: Option<String>,
}
