//! Domain Entities
//!
//! - `LockRecord` - Stage, branch and time of the last successful deployment
//! - `LockState` - What the lock file looked like when it was read

mod lock_record;

pub use lock_record::{LockRecord, LockRecordError, LockState, LOCK_FILE};
