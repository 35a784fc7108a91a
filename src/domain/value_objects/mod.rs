//! Value Objects
//!
//! Immutable types without identity:
//! - `Decision` / `Verdict` - Safety gate results
//! - `StepOutcome` - Result of a pipeline step or command

mod decision;
mod outcome;

pub use decision::{Decision, Verdict};
pub use outcome::StepOutcome;
