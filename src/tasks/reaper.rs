//! Cache Reaper Task
//!
//! Background task that periodically removes stale response cache entries.

use std::sync::Weak;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::{lock_store, SharedStore};

/// Spawns the task that sweeps stale entries out of `store`.
///
/// The first sweep happens one `interval` after the call, then once per
/// `interval`. Each sweep holds the store lock for the whole scan and removes
/// entries whose age strictly exceeds the store's max age.
///
/// The task ends when:
/// - `shutdown_rx` observes `true` or its sender is dropped
/// - the store has been dropped (no cache handle is left)
/// - the store has been closed
///
/// # Arguments
/// * `store` - Weak reference so the task never keeps a dropped cache alive
/// * `interval` - Time between sweeps, must be non-zero
/// * `shutdown_rx` - Stop signal sent by `ResponseCache::close`
pub(crate) fn spawn_reap_task(
    store: Weak<SharedStore>,
    interval: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            interval_ms = interval.as_millis() as u64,
            "Starting cache reaper"
        );

        let mut ticker = interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    let Some(store) = store.upgrade() else {
                        break;
                    };

                    let removed = {
                        let mut guard = lock_store(&store);
                        guard.as_mut().map(|store| store.reap())
                    };

                    match removed {
                        Some(0) => debug!("Cache reap: no stale entries found"),
                        Some(removed) => info!(removed, "Cache reap: removed stale entries"),
                        None => break,
                    }
                }
            }
        }

        debug!("Cache reaper stopped");
    })
}
