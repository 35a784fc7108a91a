//! Domain Policies
//!
//! Business rules that decide, not do.

pub mod safety_gate;

pub use safety_gate::{deploy_allowed, resolve, sync_allowed, STALE_LOCK_SECONDS};
