//! Cache Entry Module
//!
//! Defines the structure for individual cached API responses.

use std::time::Duration;

use bytes::Bytes;
use tokio::time::Instant;

// == Cache Entry ==
/// A single cached response body and the moment it was stored.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The raw response body
    pub value: Bytes,
    /// When the entry was inserted
    pub created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current time.
    pub fn new(value: Bytes) -> Self {
        Self::new_at(value, Instant::now())
    }

    /// Creates an entry with an explicit creation time.
    pub fn new_at(value: Bytes, created_at: Instant) -> Self {
        Self { value, created_at }
    }

    // == Age ==
    /// Returns how long the entry has existed as of `now`.
    ///
    /// Saturates to zero if `now` is earlier than the creation time.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    // == Is Stale ==
    /// Checks whether the entry has outlived `max_age`.
    ///
    /// Boundary condition: an entry whose age is exactly `max_age` is still
    /// fresh. It only becomes stale once its age strictly exceeds `max_age`.
    pub fn is_stale(&self, now: Instant, max_age: Duration) -> bool {
        self.age(now) > max_age
    }
}
