//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod confirm;
pub mod http_probe;
pub mod lock_repository;
pub mod process_runner;
pub mod task_events;
pub mod workspace;

pub use confirm::{AlwaysAccept, AlwaysDecline, Confirm};
pub use http_probe::{HttpProbe, ProbeError};
pub use lock_repository::{LockError, LockRepository};
pub use process_runner::{CommandSpec, ProcessError, ProcessOutput, ProcessRunner, RemoteTarget};
pub use task_events::{MessageLevel, NoopEventSink, TaskEvent, TaskEventSink};
pub use workspace::{BranchSource, Clock, FixedBranch, FixedClock};
