//! Safety Gate
//!
//! Decides whether a sync or deploy may touch a stage. The checks are pure
//! functions over the lock state, the current branch and the configured
//! branch restrictions; asking the operator is a separate step (`resolve`).
//!
//! Policy:
//! - no lock, or an unreadable lock: allow (nothing to compare against)
//! - lock from another stage: ask the operator
//! - lock from another branch: deny, no override
//! - lock older than three days: deny
//! - deploying a branch outside `lock-branches`: ask the operator

use crate::domain::entities::LockState;
use crate::domain::ports::Confirm;
use crate::domain::value_objects::{Decision, Verdict};

/// A sync is refused once the last deployment is older than this (3 days).
pub const STALE_LOCK_SECONDS: i64 = 259_200;

/// Question asked for every overridable decision
pub const CONFIRM_PROMPT: &str = "Continue anyway?";

pub const NOTE_LOCK_ABSENT: &str = "»lock« file not present";
pub const NOTE_LOCK_UNREADABLE: &str = "»lock« file not readable";
pub const WARN_STAGE_DIFFERS: &str = "The last stage used for deployment differs";
pub const DENY_BRANCH_DIFFERS: &str = "The last branch used for deployment differs";
pub const DENY_STALE: &str = "The last deployment is too long ago";
pub const WARN_BRANCH_NOT_ALLOWED: &str = "The current branch is not allowed for the target stage";

/// May files be synced to `stage` without a full deploy?
///
/// A stage mismatch only asks for confirmation when the remaining checks
/// pass; if the branch or age already deny, the answer is `Deny` without a
/// pointless question.
pub fn sync_allowed(stage: &str, lock: &LockState, current_branch: &str, now: i64) -> Decision {
    let record = match lock {
        LockState::Absent => return Decision::allow_with_note(NOTE_LOCK_ABSENT),
        LockState::Unreadable(_) => return Decision::allow_with_note(NOTE_LOCK_UNREADABLE),
        LockState::Present(record) => record,
    };

    if record.branch() != current_branch {
        return Decision::deny(DENY_BRANCH_DIFFERS);
    }

    if record.age_at(now) > STALE_LOCK_SECONDS {
        return Decision::deny(DENY_STALE);
    }

    if record.stage() != stage {
        return Decision::confirm(WARN_STAGE_DIFFERS);
    }

    Decision::allow()
}

/// May `current_branch` be deployed to `stage`?
pub fn deploy_allowed(stage: &str, current_branch: &str, allowed_branches: &[String]) -> Decision {
    if allowed_branches.is_empty() || allowed_branches.iter().any(|b| b == current_branch) {
        return Decision::allow();
    }

    tracing::debug!(stage, current_branch, ?allowed_branches, "branch outside lock-branches");
    Decision::confirm(WARN_BRANCH_NOT_ALLOWED)
}

/// Turn a decision into a verdict, asking `confirm` when the decision allows an override.
pub fn resolve(decision: &Decision, confirm: &dyn Confirm) -> Verdict {
    match decision {
        Decision::Allow { .. } => Verdict::Allowed,
        Decision::AllowWithConfirmation { warning } => {
            if confirm.confirm(CONFIRM_PROMPT) {
                Verdict::Allowed
            } else {
                Verdict::Denied(warning.clone())
            }
        }
        Decision::Deny { reason } => Verdict::Denied(reason.clone()),
    }
}
