//! Cache Store Module
//!
//! The unsynchronised storage engine: a HashMap of response bodies plus
//! age-based reaping. [`ResponseCache`](crate::cache::ResponseCache) wraps it
//! in a lock and drives the reaper.

use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;
use tokio::time::Instant;

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// Key-value storage where every entry expires after `max_age`.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Performance statistics
    stats: CacheStats,
    /// Age after which the reaper discards an entry
    max_age: Duration,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store whose entries live for `max_age`.
    pub fn new(max_age: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            max_age,
        }
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    // == Add ==
    /// Inserts or replaces the entry for `key`, stamping it with the current time.
    pub fn add(&mut self, key: String, value: Bytes) {
        self.add_at(key, value, Instant::now());
    }

    /// Inserts or replaces the entry for `key` with an explicit timestamp.
    pub fn add_at(&mut self, key: String, value: Bytes, now: Instant) {
        self.entries.insert(key, CacheEntry::new_at(value, now));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Retrieves the value stored under `key`.
    ///
    /// No freshness check happens here: an entry past its max age is still
    /// returned until the next reap removes it.
    pub fn get(&mut self, key: &str) -> Option<Bytes> {
        match self.entries.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                // Bytes clones share the buffer but are immutable
                Some(entry.value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Reap ==
    /// Removes every entry older than `max_age`.
    ///
    /// Returns the number of entries removed.
    pub fn reap(&mut self) -> usize {
        self.reap_at(Instant::now())
    }

    /// Removes every entry whose age at `now` strictly exceeds `max_age`.
    pub fn reap_at(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        let max_age = self.max_age;
        self.entries.retain(|_, entry| !entry.is_stale(now, max_age));

        let removed = before - self.entries.len();
        self.stats.record_reaped(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const MAX_AGE: Duration = Duration::from_millis(100);

    fn body(raw: &'static [u8]) -> Bytes {
        Bytes::from_static(raw)
    }

    #[test]
    fn test_store_new() {
        let store = CacheStore::new(MAX_AGE);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.max_age(), MAX_AGE);
    }

    #[test]
    fn test_store_miss_then_hit() {
        let mut store = CacheStore::new(MAX_AGE);

        assert!(store.get("key1").is_none());

        store.add("key1".to_string(), body(b"value1"));
        assert_eq!(store.get("key1"), Some(body(b"value1")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = CacheStore::new(MAX_AGE);

        store.add("key1".to_string(), body(b"value1"));
        store.add("key1".to_string(), body(b"value2"));

        assert_eq!(store.get("key1"), Some(body(b"value2")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_overwrite_resets_age() {
        let start = Instant::now();
        let mut store = CacheStore::new(MAX_AGE);

        store.add_at("key1".to_string(), body(b"old"), start);
        store.add_at(
            "key1".to_string(),
            body(b"new"),
            start + Duration::from_millis(80),
        );

        // Old timestamp would be stale here, the replacement is not
        assert_eq!(store.reap_at(start + Duration::from_millis(150)), 0);
        assert_eq!(store.get("key1"), Some(body(b"new")));
    }

    #[test]
    fn test_store_empty_key_and_value() {
        let mut store = CacheStore::new(MAX_AGE);

        store.add(String::new(), Bytes::new());
        assert_eq!(store.get(""), Some(Bytes::new()));
    }

    #[test]
    fn test_store_independent_keys() {
        let mut store = CacheStore::new(MAX_AGE);

        store.add("a".to_string(), body(b"x"));
        assert!(store.get("b").is_none());
        assert_eq!(store.get("a"), Some(body(b"x")));
    }

    #[test]
    fn test_store_get_returns_stale_until_reaped() {
        let start = Instant::now();
        let mut store = CacheStore::new(MAX_AGE);

        store.add_at("key1".to_string(), body(b"value1"), start);

        // Without a sweep the entry is still served, whatever its age
        assert_eq!(store.get("key1"), Some(body(b"value1")));
        assert_eq!(store.reap_at(start + Duration::from_millis(500)), 1);
        assert!(store.get("key1").is_none());
    }

    #[test]
    fn test_store_reap_boundary() {
        let start = Instant::now();
        let mut store = CacheStore::new(MAX_AGE);

        store.add_at("key1".to_string(), body(b"value1"), start);

        assert_eq!(store.reap_at(start + MAX_AGE), 0);
        assert_eq!(store.len(), 1);

        assert_eq!(store.reap_at(start + MAX_AGE + Duration::from_millis(1)), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_reap_keeps_young_entries() {
        let start = Instant::now();
        let mut store = CacheStore::new(MAX_AGE);

        store.add_at("old".to_string(), body(b"1"), start);
        store.add_at("young".to_string(), body(b"2"), start + Duration::from_millis(90));

        let removed = store.reap_at(start + Duration::from_millis(150));
        assert_eq!(removed, 1);
        assert!(store.get("old").is_none());
        assert_eq!(store.get("young"), Some(body(b"2")));
    }

    #[test]
    fn test_store_stats() {
        let start = Instant::now();
        let mut store = CacheStore::new(MAX_AGE);

        store.add_at("key1".to_string(), body(b"value1"), start);
        store.add_at("key2".to_string(), body(b"value2"), start);
        store.get("key1"); // hit
        store.get("nonexistent"); // miss
        store.reap_at(start + Duration::from_secs(1));

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.reaped, 2);
        assert_eq!(stats.total_entries, 0);
    }
}
