//! Application Layer
//!
//! Tasks and commands that orchestrate the external tools.
//! This layer:
//! - Depends on Domain layer (policies, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Reaches the outside world only through the ports in `TaskContext`
//!
//! ## Building blocks
//!
//! - `TaskContext` - Configuration plus port implementations
//! - `Pipeline` - Fail-fast sequence of named steps
//! - `TaskCommand` - Every runnable command and its pipeline
//! - `tasks` - The individual tasks (lint, build, sync, deploy, ...)

pub mod commands;
pub mod context;
pub mod pipeline;
pub mod tasks;
#[cfg(test)]
pub(crate) mod testing;

pub use commands::{sync_local, TaskCommand};
pub use context::{Ports, TaskContext};
pub use pipeline::{Pipeline, PipelineReport, PipelineState, Step};
pub use tasks::composer::Location;
pub use tasks::show::ShowFormat;
pub use tasks::test_suite::TestRun;
