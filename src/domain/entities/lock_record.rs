//! Lock record entity - remembers the last successful deployment
//!
//! The record is persisted as one comma separated line:
//! `stage,branch,unixtimestamp`. It is a pure data structure; reading and
//! writing the file is handled by a `LockRepository`.

use thiserror::Error;

/// File name of the lock, relative to the invocation directory
pub const LOCK_FILE: &str = ".lock";

/// Stage, branch and time of the last successful deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockRecord {
    stage: String,
    branch: String,
    timestamp: i64,
}

/// Why a lock line could not be turned into a `LockRecord`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LockRecordError {
    #[error("expected 3 fields, found {0}")]
    FieldCount(usize),
    #[error("the {0} field is empty")]
    EmptyField(&'static str),
    #[error("invalid timestamp '{0}'")]
    InvalidTimestamp(String),
}

impl LockRecord {
    pub fn new(stage: impl Into<String>, branch: impl Into<String>, timestamp: i64) -> Self {
        Self {
            stage: stage.into(),
            branch: branch.into(),
            timestamp,
        }
    }

    pub fn stage(&self) -> &str {
        &self.stage
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    /// Unix seconds of the deployment
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Seconds elapsed between the deployment and `now`
    pub fn age_at(&self, now: i64) -> i64 {
        now.saturating_sub(self.timestamp)
    }

    /// Parse a lock line.
    ///
    /// Surrounding whitespace and a trailing newline are ignored. Fields follow
    /// CSV quoting, so `"feature,x"` is a single field.
    pub fn parse(line: &str) -> Result<Self, LockRecordError> {
        let fields = split_csv_line(line.trim());
        if fields.len() != 3 {
            return Err(LockRecordError::FieldCount(fields.len()));
        }

        let stage = fields[0].trim();
        let branch = fields[1].trim();
        let timestamp = fields[2].trim();

        if stage.is_empty() {
            return Err(LockRecordError::EmptyField("stage"));
        }
        if branch.is_empty() {
            return Err(LockRecordError::EmptyField("branch"));
        }
        let timestamp = timestamp
            .parse::<i64>()
            .map_err(|_| LockRecordError::InvalidTimestamp(timestamp.to_string()))?;

        Ok(Self::new(stage, branch, timestamp))
    }

    /// Render the record as a lock line (without trailing newline)
    pub fn to_line(&self) -> String {
        format!(
            "{},{},{}",
            quote_field(&self.stage),
            quote_field(&self.branch),
            self.timestamp
        )
    }
}

/// State of the lock file at the time it was read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockState {
    /// No lock file exists (nothing deployed yet)
    Absent,
    /// A lock file exists but could not be read or parsed
    Unreadable(String),
    /// A valid record was found
    Present(LockRecord),
}

impl LockState {
    pub fn record(&self) -> Option<&LockRecord> {
        match self {
            LockState::Present(record) => Some(record),
            _ => None,
        }
    }
}

fn quote_field(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn split_csv_line(line: &str) -> Vec<String> {
    if line.is_empty() {
        return Vec::new();
    }

    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}
