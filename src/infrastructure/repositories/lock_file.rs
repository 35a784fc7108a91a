//! Lock File Repository
//!
//! Implements the LockRepository port on a single-line `.lock` file.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::domain::entities::{LockRecord, LockState, LOCK_FILE};
use crate::domain::ports::{LockError, LockRepository};

/// `.lock` file in a directory (the invocation directory by default)
pub struct FileLockRepository {
    path: PathBuf,
}

impl FileLockRepository {
    /// Lock file inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(LOCK_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl Default for FileLockRepository {
    fn default() -> Self {
        Self::in_dir(".")
    }
}

impl LockRepository for FileLockRepository {
    fn load(&self) -> LockState {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return LockState::Absent,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "lock file not readable");
                return LockState::Unreadable(e.to_string());
            }
        };

        match LockRecord::parse(&content) {
            Ok(record) => LockState::Present(record),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "lock file corrupt");
                LockState::Unreadable(e.to_string())
            }
        }
    }

    /// Write next to the target and rename over it, so readers never see
    /// a half written record.
    fn save(&self, record: &LockRecord) -> Result<(), LockError> {
        let mut file = NamedTempFile::new_in(self.dir())?;
        writeln!(file, "{}", record.to_line())?;
        file.flush()?;
        file.persist(&self.path)
            .map_err(|e| LockError::Persist(e.error.to_string()))?;
        tracing::debug!(path = %self.path.display(), line = %record.to_line(), "lock written");
        Ok(())
    }
}
