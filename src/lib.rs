//! pap - PHP App Publication task runner
//!
//! Builds, tests and deploys PHP web applications to configured stages.
//! Every command is a fail-fast pipeline of tasks that drive external tools
//! (composer, rsync, ssh, test runners); a safety gate backed by a `.lock`
//! file keeps `sync` and `deploy` from overwriting someone else's work.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;
pub mod watcher;

// Re-exports for convenience
pub use application::{PipelineReport, TaskCommand, TaskContext};
pub use config::{Config, StageConfig};
pub use domain::entities::{LockRecord, LockState};
pub use domain::value_objects::StepOutcome;
pub use error::{PapError, PapResult};
