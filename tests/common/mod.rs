//! Common test utilities for the pap CLI tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated project directory with stubbed external tools
//! - `OriginServer`: Minimal HTTP origin for smoke tests
//! - Fixtures: Reusable property files

#![allow(dead_code)]

pub mod env;
pub mod fixtures;
pub mod http;

pub use env::*;
pub use fixtures::*;
pub use http::*;
