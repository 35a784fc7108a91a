//! File watcher for continuous local sync
//!
//! Implements the `watch` command with:
//! - Debouncing (100ms)
//! - Graceful Ctrl+C shutdown
//! - NDJSON output for CI

mod event;
mod run;
#[cfg(test)]
mod tests;

pub use event::{WatchEvent, WatchOptions, DEBOUNCE_MS};
pub use run::watch;
