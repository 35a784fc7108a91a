//! Process execution

mod system;

pub use system::SystemProcessRunner;
