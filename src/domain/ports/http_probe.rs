//! HTTP Probe Port
//!
//! A single GET request used by the smoke test.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// DNS, connect, TLS or timeout problems
    #[error("{0}")]
    Transport(String),
    /// The origin answered with an error status
    #[error("HTTP status {0}")]
    Status(u16),
}

pub trait HttpProbe: Send + Sync {
    /// GET `url`, following redirects. Returns the final status on success.
    fn get(&self, url: &str) -> Result<u16, ProbeError>;
}
