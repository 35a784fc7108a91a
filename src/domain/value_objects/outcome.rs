//! Step and command outcomes

use serde::Serialize;

/// Result of a single pipeline step (or of a whole command).
///
/// `Skipped` counts as success for pipeline continuation; it marks a
/// "nothing to do" situation such as a feature without configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum StepOutcome {
    Success,
    Skipped(String),
    Failed(String),
}

impl StepOutcome {
    pub fn skipped(message: impl Into<String>) -> Self {
        StepOutcome::Skipped(message.into())
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        StepOutcome::Failed(reason.into())
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, StepOutcome::Failed(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, StepOutcome::Skipped(_))
    }

    /// Process exit code for this outcome
    pub fn exit_code(&self) -> i32 {
        if self.is_failure() {
            1
        } else {
            0
        }
    }
}
