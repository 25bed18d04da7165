// src/cache/store.rs

//! Generic in-memory TTL key→value store.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};

/// A value plus the instant it was written. Entries are overwritten, never
/// mutated in place.
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
}

/// In-memory TTL store.
///
/// `get` reports freshness only and never deletes; raw entries are removed
/// exclusively by [`CacheStore::sweep`] or [`CacheStore::clear`], which keeps
/// expired values retrievable through [`CacheStore::get_raw`] for the
/// quota-exhaustion degradation path.
pub struct CacheStore<V> {
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
}

impl<V: Clone> CacheStore<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Look up a fresh value. Returns `None` both when the key is absent and
    /// when the entry has outlived the TTL.
    pub fn get(&self, key: &str) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    /// Look up a value regardless of freshness.
    pub fn get_raw(&self, key: &str) -> Option<V> {
        let entries = self.read_entries();
        entries.get(key).map(|entry| entry.value.clone())
    }

    /// Store a value under `key`, replacing any previous entry.
    pub fn set(&self, key: impl Into<String>, value: V) {
        self.set_at(key.into(), value, Instant::now());
    }

    /// Remove everything unconditionally.
    pub fn clear(&self) {
        let mut entries = self.write_entries();
        entries.clear();
    }

    /// Remove every entry older than the TTL. Returns the number removed.
    pub fn sweep(&self) -> usize {
        self.sweep_at(Instant::now())
    }

    pub fn len(&self) -> usize {
        self.read_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get_at(&self, key: &str, now: Instant) -> Option<V> {
        let entries = self.read_entries();
        entries
            .get(key)
            .filter(|entry| now.duration_since(entry.stored_at) < self.ttl)
            .map(|entry| entry.value.clone())
    }

    fn set_at(&self, key: String, value: V, now: Instant) {
        let mut entries = self.write_entries();
        entries.insert(
            key,
            CacheEntry {
                value,
                stored_at: now,
            },
        );
    }

    fn sweep_at(&self, now: Instant) -> usize {
        let mut entries = self.write_entries();
        let before = entries.len();
        entries.retain(|_, entry| now.duration_since(entry.stored_at) < self.ttl);
        before - entries.len()
    }

    fn read_entries(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, CacheEntry<V>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_entries(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, CacheEntry<V>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(900);

    fn just_over_ttl() -> Duration {
        TTL + Duration::from_secs(1)
    }

    #[test]
    fn fresh_entry_is_returned() {
        let store = CacheStore::new(TTL);
        let base = Instant::now();
        store.set_at("k".into(), 7, base);

        assert_eq!(store.get_at("k", base + Duration::from_secs(60)), Some(7));
    }

    #[test]
    fn expired_entry_is_a_miss_but_survives_raw_lookup() {
        let store = CacheStore::new(TTL);
        let base = Instant::now();
        store.set_at("k".into(), 7, base);

        assert_eq!(store.get_at("k", base + just_over_ttl()), None);
        assert_eq!(store.get_raw("k"), Some(7));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn absent_key_is_a_miss() {
        let store: CacheStore<i32> = CacheStore::new(TTL);
        assert_eq!(store.get("missing"), None);
        assert_eq!(store.get_raw("missing"), None);
    }

    #[test]
    fn sweep_removes_only_expired_entries() {
        let store = CacheStore::new(TTL);
        let base = Instant::now();
        store.set_at("old".into(), 1, base);
        store.set_at("young".into(), 2, base + TTL);

        let removed = store.sweep_at(base + just_over_ttl());
        assert_eq!(removed, 1);
        assert_eq!(store.get_raw("old"), None);
        assert_eq!(store.get_raw("young"), Some(2));
    }

    #[test]
    fn overwrite_refreshes_the_entry() {
        let store = CacheStore::new(TTL);
        let base = Instant::now();
        store.set_at("k".into(), 1, base);
        store.set_at("k".into(), 2, base + just_over_ttl());

        // The rewritten entry is fresh again relative to its new write time.
        assert_eq!(
            store.get_at("k", base + just_over_ttl() + Duration::from_secs(1)),
            Some(2)
        );
    }

    #[test]
    fn clear_removes_everything() {
        let store = CacheStore::new(TTL);
        store.set("a", 1);
        store.set("b", 2);
        store.clear();
        assert!(store.is_empty());
    }
}
