//! Catalog listings — the pre-existing rows remote records match against.

use serde::{Deserialize, Serialize};

/// A catalog row for one listed product variant, scoped to an account.
///
/// Listings are maintained by the product-management side of the system;
/// the sync core only reads them to resolve matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub id: i64,
    pub account: String,
    /// Marketplace id of the listed variant (matches `item_id` on remote
    /// lines).
    pub item_code: String,
    /// Marketplace id of the parent product.
    pub product_code: Option<String>,
    /// Exact display title.
    pub title: String,
}
