//! Error types for pap
//!
//! Library code returns `PapError`; the binary wraps it in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pap operations
pub type PapResult<T> = Result<T, PapError>;

/// Main error type for pap operations
#[derive(Error, Debug)]
pub enum PapError {
    /// A feature has no configuration (informational, never fatal)
    #[error("{0} not configured")]
    NotConfigured(String),

    /// The safety gate refused the operation
    #[error("{0}")]
    GuardDenied(String),

    /// A step gave up; `reason` is what the operator sees
    #[error("{reason}")]
    Task {
        reason: String,
        #[source]
        source: Box<PapError>,
    },

    /// An external process returned a non-success status
    #[error("{tool} failed with {}", exit_label(.code))]
    ExternalToolFailure { tool: String, code: Option<i32> },

    /// An external process could not be started at all
    #[error("could not run '{tool}': {message}")]
    Spawn { tool: String, message: String },

    /// The smoke test could not reach the stage origin
    #[error("connection to {url} failed: {message}")]
    Connectivity { url: String, message: String },

    /// Configuration file could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// A configured value is present but cannot be used
    #[error("invalid value for {key}: {message}")]
    InvalidSetting { key: String, message: String },

    /// Repository path neither configured nor detectable via git
    #[error("Missing repository path")]
    MissingRepositoryPath,

    /// Lock file could not be written
    #[error("lock file {path}: {message}")]
    LockFile { path: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl PapError {
    /// Wrap `self` under an operator-facing reason
    pub fn because(self, reason: impl Into<String>) -> Self {
        PapError::Task {
            reason: reason.into(),
            source: Box::new(self),
        }
    }
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

/// Attach an operator-facing reason to a failed result
pub trait FailBecause<T> {
    fn or_fail(self, reason: &str) -> PapResult<T>;
}

impl<T> FailBecause<T> for PapResult<T> {
    fn or_fail(self, reason: &str) -> PapResult<T> {
        self.map_err(|e| e.because(reason))
    }
}
