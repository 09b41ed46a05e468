//! Background Tasks Module
//!
//! Contains background tasks that run periodically alongside the REPL.
//!
//! # Tasks
//! - Reaper: removes stale response cache entries once per cache interval

mod reaper;

pub(crate) use reaper::spawn_reap_task;
