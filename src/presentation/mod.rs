//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Wiring the task context with infrastructure dependencies
//! - Output formatting (console/NDJSON)
//!
//! ## Structure
//!
//! - `cli` - Command line definition
//! - `factory` - Creates the task context (dependency injection)
//! - `output` - Console rendering of task and watch events
//! - `theme` - Colors and icons

pub mod cli;
pub mod factory;
pub mod output;
pub mod theme;

pub use cli::{Cli, ColorWhen, Commands};
pub use factory::{create_context, Invocation};
pub use output::{ConsoleEventSink, ConsoleStyle};
