//! Return / refund requests.

use serde::{Deserialize, Serialize};

/// One return request filed by a buyer, containing the affected items.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnRequest {
    pub return_id: String,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub requested_at: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub return_items: Vec<ReturnItem>,
}

/// One item inside a return request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnItem {
    pub item_id: String,
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub item_name: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub refund_amount: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_nested_items() {
        let json = r#"{
            "returnId": "R-3301",
            "orderId": "20250301-0001",
            "status": "RETURNS_COMPLETED",
            "returnItems": [
                {"itemId": "90011", "itemName": "The Sea Library", "quantity": 1, "refundAmount": 18000}
            ]
        }"#;

        let request: ReturnRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.return_id, "R-3301");
        assert_eq!(request.return_items[0].refund_amount, Some(18_000));
    }
}
