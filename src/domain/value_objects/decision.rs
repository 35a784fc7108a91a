//! Safety gate decisions

/// What the safety gate thinks about an operation, before asking anybody.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Safe to proceed. `note` explains why no comparison was possible.
    Allow { note: Option<String> },
    /// Risky but overridable: the operator has to confirm.
    AllowWithConfirmation { warning: String },
    /// Hard stop, no override.
    Deny { reason: String },
}

impl Decision {
    pub fn allow() -> Self {
        Decision::Allow { note: None }
    }

    pub fn allow_with_note(note: impl Into<String>) -> Self {
        Decision::Allow {
            note: Some(note.into()),
        }
    }

    pub fn confirm(warning: impl Into<String>) -> Self {
        Decision::AllowWithConfirmation {
            warning: warning.into(),
        }
    }

    pub fn deny(reason: impl Into<String>) -> Self {
        Decision::Deny {
            reason: reason.into(),
        }
    }

    pub fn is_allow(&self) -> bool {
        matches!(self, Decision::Allow { .. })
    }

    pub fn is_deny(&self) -> bool {
        matches!(self, Decision::Deny { .. })
    }

    pub fn needs_confirmation(&self) -> bool {
        matches!(self, Decision::AllowWithConfirmation { .. })
    }
}

/// Final answer after confirmation prompts have been resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Allowed,
    Denied(String),
}

impl Verdict {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Verdict::Allowed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_match_predicates() {
        assert!(Decision::allow().is_allow());
        assert!(Decision::allow_with_note("no lock").is_allow());
        assert!(Decision::confirm("differs").needs_confirmation());
        assert!(Decision::deny("stale").is_deny());
    }

    #[test]
    fn verdict_allowed() {
        assert!(Verdict::Allowed.is_allowed());
        assert!(!Verdict::Denied("no".into()).is_allowed());
    }
}
