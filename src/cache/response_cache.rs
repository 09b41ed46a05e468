//! Response Cache Module
//!
//! Thread-safe handle over [`CacheStore`] that owns the background reaper.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use bytes::Bytes;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::cache::{CacheStats, CacheStore, MIN_INTERVAL};
use crate::tasks::spawn_reap_task;

/// Storage shared between cache handles and the reaper.
///
/// `None` once the cache has been closed.
pub(crate) type SharedStore = Mutex<Option<CacheStore>>;

/// Locks the shared store, recovering from poisoning.
///
/// Every critical section is a single map operation, so a panicking holder
/// cannot leave the map half-updated.
pub(crate) fn lock_store(store: &SharedStore) -> MutexGuard<'_, Option<CacheStore>> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}

// == Response Cache ==
/// Expiring cache of raw API response bodies keyed by request URL.
///
/// Cloning is cheap and every clone refers to the same storage. Entries older
/// than the configured interval are removed by a background task that ticks
/// once per interval. The task stops when [`close`](Self::close) is called or
/// when the last handle is dropped.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    store: Arc<SharedStore>,
    shutdown: watch::Sender<bool>,
    interval: Duration,
}

impl ResponseCache {
    // == Constructor ==
    /// Creates an empty cache and starts its reaper.
    ///
    /// Returns immediately; the first sweep runs one `interval` from now.
    /// Must be called from within a Tokio runtime. A zero interval is raised
    /// to [`MIN_INTERVAL`].
    pub fn new(interval: Duration) -> Self {
        let interval = if interval.is_zero() {
            warn!(
                min_interval_ms = MIN_INTERVAL.as_millis() as u64,
                "Cache interval of zero requested, using minimum interval"
            );
            MIN_INTERVAL
        } else {
            interval
        };

        let store = Arc::new(Mutex::new(Some(CacheStore::new(interval))));
        let (shutdown, shutdown_rx) = watch::channel(false);
        spawn_reap_task(Arc::downgrade(&store), interval, shutdown_rx);

        Self {
            inner: Arc::new(Inner {
                store,
                shutdown,
                interval,
            }),
        }
    }

    /// The reap period, which is also the maximum entry age.
    pub fn interval(&self) -> Duration {
        self.inner.interval
    }

    // == Add ==
    /// Stores `value` under `key`, replacing any previous entry.
    ///
    /// Does nothing once the cache is closed.
    pub fn add(&self, key: impl Into<String>, value: impl Into<Bytes>) {
        let key = key.into();
        let value = value.into();
        if let Some(store) = lock_store(&self.inner.store).as_mut() {
            store.add(key, value);
        }
    }

    // == Get ==
    /// Returns the value stored under `key`, if any.
    ///
    /// Never-inserted and already-reaped keys both yield `None`, as does any
    /// lookup on a closed cache.
    pub fn get(&self, key: &str) -> Option<Bytes> {
        lock_store(&self.inner.store)
            .as_mut()
            .and_then(|store| store.get(key))
    }

    // == Close ==
    /// Stops the reaper and drops every entry.
    ///
    /// Later `add` calls are ignored and `get` always misses. Closing twice
    /// is harmless.
    pub fn close(&self) {
        let closed = lock_store(&self.inner.store).take();
        self.inner.shutdown.send_replace(true);

        if let Some(store) = closed {
            info!(entries = store.len(), "Response cache closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        lock_store(&self.inner.store).is_none()
    }

    // == Stats ==
    /// Returns current statistics, or empty statistics once closed.
    pub fn stats(&self) -> CacheStats {
        lock_store(&self.inner.store)
            .as_ref()
            .map(CacheStore::stats)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        lock_store(&self.inner.store)
            .as_ref()
            .map_or(0, CacheStore::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(100);

    #[tokio::test(start_paused = true)]
    async fn test_miss_then_hit() {
        let cache = ResponseCache::new(INTERVAL);

        assert!(cache.get("k").is_none());
        cache.add("k", vec![1u8, 2, 3]);
        assert_eq!(cache.get("k").as_deref(), Some(&[1u8, 2, 3][..]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_overwrite_returns_latest() {
        let cache = ResponseCache::new(INTERVAL);

        cache.add("k", "v1");
        cache.add("k", "v2");
        assert_eq!(cache.get("k"), Some(Bytes::from_static(b"v2")));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_independent_keys() {
        let cache = ResponseCache::new(INTERVAL);

        cache.add("a", "x");
        assert!(cache.get("b").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_returned_value_survives_overwrite() {
        let cache = ResponseCache::new(INTERVAL);

        cache.add("k", "first");
        let held = cache.get("k").unwrap();
        cache.add("k", "second");

        assert_eq!(held, Bytes::from_static(b"first"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_two_sweeps() {
        let cache = ResponseCache::new(INTERVAL);
        cache.add("u1", vec![1u8, 2, 3]);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(cache.get("u1").as_deref(), Some(&[1u8, 2, 3][..]));

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(cache.get("u1").is_none());
        assert_eq!(cache.stats().reaped, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_retrievable_before_interval() {
        let cache = ResponseCache::new(INTERVAL);
        cache.add("k", "v");

        tokio::time::sleep(INTERVAL - Duration::from_millis(10)).await;
        assert!(cache.get("k").is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_is_raised() {
        let cache = ResponseCache::new(Duration::ZERO);
        assert_eq!(cache.interval(), MIN_INTERVAL);
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_turns_operations_into_noops() {
        let cache = ResponseCache::new(INTERVAL);
        cache.add("k", "v");

        cache.close();
        assert!(cache.is_closed());
        assert!(cache.get("k").is_none());

        cache.add("k", "again");
        assert!(cache.get("k").is_none());
        assert!(cache.is_empty());
        assert_eq!(cache.stats(), CacheStats::default());

        // Second close is harmless
        cache.close();
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_is_visible_through_clones() {
        let cache = ResponseCache::new(INTERVAL);
        let other = cache.clone();

        other.add("k", "v");
        assert!(cache.get("k").is_some());

        other.close();
        assert!(cache.is_closed());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writers_then_readers() {
        const N: usize = 64;
        let cache = ResponseCache::new(Duration::from_secs(3600));

        std::thread::scope(|scope| {
            for i in 0..N {
                let cache = cache.clone();
                scope.spawn(move || cache.add(format!("key-{i}"), format!("value-{i}")));
            }
        });

        std::thread::scope(|scope| {
            let readers: Vec<_> = (0..N)
                .map(|i| {
                    let cache = cache.clone();
                    scope.spawn(move || (i, cache.get(&format!("key-{i}"))))
                })
                .collect();

            for reader in readers {
                let (i, value) = reader.join().unwrap();
                assert_eq!(value, Some(Bytes::from(format!("value-{i}"))));
            }
        });

        assert_eq!(cache.len(), N);
        assert_eq!(cache.stats().hits, N as u64);
    }
}
