//! LockRepository port - abstraction for lock record persistence
//!
//! The domain only needs "what was deployed last" and "remember this
//! deployment"; the file format lives in the infrastructure layer.

use thiserror::Error;

use crate::domain::entities::{LockRecord, LockState};

/// Lock record could not be stored
#[derive(Debug, Error)]
pub enum LockError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not replace lock file: {0}")]
    Persist(String),
}

/// Abstract repository for the deployment lock.
pub trait LockRepository: Send + Sync {
    /// Read the current lock. Never fails: problems become `LockState::Unreadable`.
    fn load(&self) -> LockState;

    /// Overwrite the lock with `record`
    fn save(&self, record: &LockRecord) -> Result<(), LockError>;
}
