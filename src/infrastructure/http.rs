//! HTTP Probe
//!
//! Smoke test GET requests via ureq.

use std::time::Duration;

use ureq::Agent;

use crate::domain::ports::{HttpProbe, ProbeError};

/// Request timeout for smoke tests
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking HTTP client following redirects
pub struct UreqProbe {
    agent: Agent,
}

impl UreqProbe {
    pub fn new(timeout: Duration) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        Self { agent }
    }
}

impl Default for UreqProbe {
    fn default() -> Self {
        Self::new(PROBE_TIMEOUT)
    }
}

impl HttpProbe for UreqProbe {
    fn get(&self, url: &str) -> Result<u16, ProbeError> {
        tracing::debug!(%url, "probing");
        match self.agent.get(url).call() {
            Ok(response) => Ok(response.status().as_u16()),
            Err(ureq::Error::StatusCode(code)) => Err(ProbeError::Status(code)),
            Err(e) => Err(ProbeError::Transport(e.to_string())),
        }
    }
}
