//! Domain Services
//!
//! Pure builders for the command lines of external tools.
//! These services have no I/O dependencies and are easily testable.

mod rsync;
mod ssh;

pub use rsync::Rsync;
pub use ssh::{interactive_shell, remote_command, shell_quote};
