//! Command handlers of the binary

pub mod run;
pub mod watch;
