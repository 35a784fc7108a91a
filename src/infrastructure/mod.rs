//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `process/` - Spawning local and remote (ssh) commands
//! - `repositories/` - Lock file persistence
//! - `confirm/` - Terminal prompts
//! - `events/` - NDJSON event output
//! - `http`, `git`, `clock` - Smoke test client, workspace facts

pub mod clock;
pub mod confirm;
pub mod events;
pub mod git;
pub mod http;
pub mod process;
pub mod repositories;

pub use clock::SystemClock;
pub use confirm::DialoguerConfirm;
pub use events::JsonEventSink;
pub use git::GitCli;
pub use http::UreqProbe;
pub use process::SystemProcessRunner;
pub use repositories::FileLockRepository;
