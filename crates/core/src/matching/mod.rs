//! Listing resolution: the account-scoped matching cascade.

use std::sync::Arc;

use shelfsync_common::LookupCache;
use shelfsync_domain::Result;
use tracing::debug;

use crate::reconcile::ports::ListingRepository;

/// Resolves remote line items to catalog listings.
///
/// Cascade, first hit wins, every level scoped to the account:
/// 1. marketplace item code (most specific)
/// 2. marketplace product code
/// 3. exact display-title match
///
/// No match is a valid outcome — the caller persists the row unlinked.
/// Results (including negative ones) are memoized in an explicit
/// [`LookupCache`] owned by this matcher; a durable backing store can be
/// injected by the caller.
pub struct ListingMatcher {
    listings: Arc<dyn ListingRepository>,
    cache: LookupCache<Option<i64>>,
}

impl ListingMatcher {
    pub fn new(listings: Arc<dyn ListingRepository>) -> Self {
        Self { listings, cache: LookupCache::new() }
    }

    /// Matcher with a caller-provided cache (e.g. durably backed).
    pub fn with_cache(listings: Arc<dyn ListingRepository>, cache: LookupCache<Option<i64>>) -> Self {
        Self { listings, cache }
    }

    /// Resolve one remote line to a listing id, if any.
    pub async fn resolve(
        &self,
        account: &str,
        item_code: &str,
        product_code: Option<&str>,
        title: Option<&str>,
    ) -> Result<Option<i64>> {
        let key = cache_key(account, item_code, product_code, title);
        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached);
        }

        let resolved = self.lookup(account, item_code, product_code, title).await?;
        if resolved.is_none() {
            debug!(account, item_code, "no listing matched");
        }
        self.cache.put(&key, resolved);
        Ok(resolved)
    }

    async fn lookup(
        &self,
        account: &str,
        item_code: &str,
        product_code: Option<&str>,
        title: Option<&str>,
    ) -> Result<Option<i64>> {
        if !item_code.is_empty() {
            if let Some(listing) = self.listings.find_by_item_code(account, item_code).await? {
                return Ok(Some(listing.id));
            }
        }

        if let Some(code) = product_code.filter(|c| !c.is_empty()) {
            if let Some(listing) = self.listings.find_by_product_code(account, code).await? {
                return Ok(Some(listing.id));
            }
        }

        if let Some(name) = title.filter(|t| !t.is_empty()) {
            if let Some(listing) = self.listings.find_by_title(account, name).await? {
                return Ok(Some(listing.id));
            }
        }

        Ok(None)
    }
}

fn cache_key(account: &str, item_code: &str, product_code: Option<&str>, title: Option<&str>) -> String {
    format!(
        "{account}\u{1f}{item_code}\u{1f}{}\u{1f}{}",
        product_code.unwrap_or_default(),
        title.unwrap_or_default()
    )
}
