//! Task implementations
//!
//! Each task is a plain function over the `TaskContext` returning a
//! `StepOutcome`. Commands compose them into pipelines.

pub mod assets;
pub mod build;
pub mod composer;
pub mod deploy;
pub mod lint;
pub mod show;
pub mod smoke;
pub mod ssh;
pub mod sync;
pub mod test_suite;
pub mod view;

use crate::domain::policies::resolve;
use crate::domain::value_objects::{Decision, Verdict};
use crate::error::{PapError, PapResult};

use crate::application::context::TaskContext;

/// Report a safety gate decision and settle it with the operator.
///
/// Denials print the gate's reason as a warning and fail with `denied`.
pub(crate) fn guard(ctx: &TaskContext, decision: &Decision, denied: &str) -> PapResult<()> {
    match decision {
        Decision::Allow { note: Some(note) } => ctx.note(note.as_str()),
        Decision::Allow { note: None } => {}
        Decision::AllowWithConfirmation { warning } => ctx.warn(warning.as_str()),
        Decision::Deny { reason } => ctx.warn(reason.as_str()),
    }

    match resolve(decision, ctx.ports().confirm.as_ref()) {
        Verdict::Allowed => Ok(()),
        Verdict::Denied(reason) => {
            tracing::info!(%reason, "safety gate denied the operation");
            Err(PapError::GuardDenied(denied.to_string()))
        }
    }
}
