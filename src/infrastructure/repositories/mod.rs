//! Repository Implementations
//!
//! Concrete implementations of repository ports.

mod lock_file;

pub use lock_file::FileLockRepository;
