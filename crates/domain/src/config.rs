//! Configuration structures.
//!
//! Loaded by `shelfsync-infra`'s config loader from a TOML/JSON file or the
//! environment; read-only to the rest of the system.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub marketplace: MarketplaceConfig,
    #[serde(default)]
    pub sync: SyncSettings,
    #[serde(default)]
    pub accounts: Vec<AccountConfig>,
}

/// Database location and pool sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

fn default_pool_size() -> u32 {
    4
}

/// Marketplace partner-API settings shared by every account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketplaceConfig {
    /// Base URL of the partner API, no trailing slash.
    pub base_url: String,
    /// Scheme token leading the authorization header value.
    #[serde(default = "default_auth_scheme")]
    pub auth_scheme: String,
    #[serde(default = "default_max_per_page")]
    pub max_per_page: u32,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_slow_request_timeout_secs")]
    pub slow_request_timeout_secs: u64,
}

fn default_auth_scheme() -> String {
    "HMAC".to_string()
}

fn default_max_per_page() -> u32 {
    constants::DEFAULT_MAX_PER_PAGE
}

fn default_request_timeout_secs() -> u64 {
    constants::DEFAULT_REQUEST_TIMEOUT.as_secs()
}

fn default_slow_request_timeout_secs() -> u64 {
    constants::SLOW_REQUEST_TIMEOUT.as_secs()
}

/// Retry and pagination knobs for the sync engines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncSettings {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self { max_attempts: default_max_attempts(), max_pages: default_max_pages() }
    }
}

fn default_max_attempts() -> u32 {
    constants::DEFAULT_MAX_ATTEMPTS
}

fn default_max_pages() -> u32 {
    constants::DEFAULT_MAX_PAGES
}

/// One seller account as written in configuration.
///
/// Secret fields may be omitted here, in which case the credential resolver
/// falls back to `SHELFSYNC_<NAME>_*` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    pub name: String,
    #[serde(default)]
    pub vendor_id: Option<String>,
    #[serde(default)]
    pub access_key: Option<String>,
    #[serde(default)]
    pub secret_key: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Per-account page-size override.
    #[serde(default)]
    pub max_per_page: Option<u32>,
}

fn default_enabled() -> bool {
    true
}
