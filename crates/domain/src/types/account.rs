//! Seller account with resolved credentials.

use serde::{Deserialize, Serialize};

/// A seller account with its secret material resolved.
///
/// Produced by the credential resolver from [`crate::config::AccountConfig`]
/// plus environment fallbacks; read-only to the sync core. Credentials are
/// never shared across accounts — every account gets its own signed client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Human label, also the scope column of every persisted row.
    pub name: String,
    /// Signing identity the marketplace issued for this seller.
    pub vendor_id: String,
    /// Public half of the API credential.
    pub access_key: String,
    /// Secret half of the API credential; used only for signing.
    pub secret_key: String,
    pub enabled: bool,
    /// Page size requested from list endpoints for this account.
    pub max_per_page: u32,
}

impl Account {
    /// Redacted display form safe for logs.
    pub fn display_label(&self) -> String {
        format!("{} (vendor {})", self.name, self.vendor_id)
    }
}
