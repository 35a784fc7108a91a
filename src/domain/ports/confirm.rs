//! Confirmation Port
//!
//! Yes/no questions put to the operator by the safety gate.
//! Implementations can be interactive (a terminal prompt) or automatic.

/// Trait for asking the operator to confirm a risky operation.
///
/// Implementations:
/// - `DialoguerConfirm`: Terminal prompt, default "no"
/// - `AlwaysDecline`: Non-interactive runs (CI, `--no-interaction`)
/// - `AlwaysAccept`: Automation that has already decided
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Declines every question.
pub struct AlwaysDecline;

impl Confirm for AlwaysDecline {
    fn confirm(&self, _prompt: &str) -> bool {
        false
    }
}

/// Accepts every question.
pub struct AlwaysAccept;

impl Confirm for AlwaysAccept {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}
