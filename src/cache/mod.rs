//! Cache Module
//!
//! Provides an in-memory response cache whose entries expire after a fixed
//! interval, swept by a background reaper.

mod entry;
mod response_cache;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use response_cache::ResponseCache;
pub use stats::CacheStats;
pub use store::CacheStore;

pub(crate) use response_cache::{lock_store, SharedStore};

use std::time::Duration;

// == Public Constants ==
/// Default reap period and entry max age
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Smallest interval the reaper can tick at
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);
