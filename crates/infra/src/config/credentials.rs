//! Per-account credential resolution.
//!
//! Explicit values in the config file win; otherwise each secret field
//! falls back to an environment variable derived from the account name:
//! `SHELFSYNC_<NAME>_VENDOR_ID`, `SHELFSYNC_<NAME>_ACCESS_KEY`,
//! `SHELFSYNC_<NAME>_SECRET_KEY` (name uppercased, non-alphanumerics
//! folded to `_`).

use shelfsync_domain::constants::DEFAULT_MAX_PER_PAGE;
use shelfsync_domain::{Account, AccountConfig, Result, ShelfsyncError};

/// Resolve every enabled account to a full credential set.
///
/// Disabled accounts are skipped entirely — they are allowed to have no
/// secret material. An enabled account that cannot be resolved is a
/// configuration error.
pub fn resolve_accounts(configs: &[AccountConfig]) -> Result<Vec<Account>> {
    configs.iter().filter(|c| c.enabled).map(resolve_account).collect()
}

fn resolve_account(config: &AccountConfig) -> Result<Account> {
    let vendor_id = resolve_field(config.vendor_id.as_deref(), &config.name, "VENDOR_ID")?;
    let access_key = resolve_field(config.access_key.as_deref(), &config.name, "ACCESS_KEY")?;
    let secret_key = resolve_field(config.secret_key.as_deref(), &config.name, "SECRET_KEY")?;

    Ok(Account {
        name: config.name.clone(),
        vendor_id,
        access_key,
        secret_key,
        enabled: true,
        max_per_page: config.max_per_page.unwrap_or(DEFAULT_MAX_PER_PAGE),
    })
}

fn resolve_field(explicit: Option<&str>, account: &str, field: &str) -> Result<String> {
    if let Some(value) = explicit.filter(|v| !v.is_empty()) {
        return Ok(value.to_string());
    }

    let key = env_key(account, field);
    std::env::var(&key).ok().filter(|v| !v.is_empty()).ok_or_else(|| {
        ShelfsyncError::Config(format!(
            "account '{account}' has no {} configured and {key} is not set",
            field.to_lowercase()
        ))
    })
}

fn env_key(account: &str, field: &str) -> String {
    let sanitized: String = account
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
        .collect();
    format!("SHELFSYNC_{sanitized}_{field}")
}
