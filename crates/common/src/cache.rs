//! Explicit lookup cache with an injectable backing store.
//!
//! Owned by whichever component needs memoized lookups and passed in —
//! there is no process-wide cache. The in-memory map answers repeat
//! lookups; an optional [`LookupStore`] makes entries durable across runs.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

/// Durable backing for a [`LookupCache`].
///
/// Implementations are best-effort: failures are logged by the
/// implementation, never surfaced to lookup callers.
pub trait LookupStore<V>: Send + Sync {
    fn load(&self, key: &str) -> Option<V>;
    fn store(&self, key: &str, value: &V);
}

/// Memoizing cache keyed by free-text input.
pub struct LookupCache<V> {
    map: Mutex<HashMap<String, V>>,
    store: Option<Arc<dyn LookupStore<V>>>,
}

impl<V: Clone> LookupCache<V> {
    /// Purely in-memory cache.
    pub fn new() -> Self {
        Self { map: Mutex::new(HashMap::new()), store: None }
    }

    /// Cache with a durable backing store consulted on memory misses.
    pub fn with_store(store: Arc<dyn LookupStore<V>>) -> Self {
        Self { map: Mutex::new(HashMap::new()), store: Some(store) }
    }

    /// Look up `key`, consulting memory first, then the backing store.
    /// A store hit is copied back into memory.
    pub fn get(&self, key: &str) -> Option<V> {
        if let Some(hit) = self.map.lock().get(key) {
            return Some(hit.clone());
        }

        let loaded = self.store.as_ref()?.load(key)?;
        self.map.lock().insert(key.to_string(), loaded.clone());
        Some(loaded)
    }

    /// Record `value` under `key`, writing through to the store if present.
    pub fn put(&self, key: &str, value: V) {
        if let Some(store) = &self.store {
            store.store(key, &value);
        }
        self.map.lock().insert(key.to_string(), value);
    }

    pub fn len(&self) -> usize {
        self.map.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.lock().is_empty()
    }
}

impl<V: Clone> Default for LookupCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
