//! Workspace Ports
//!
//! Facts about the invocation environment the safety gate compares against:
//! the checked out branch and the current time.

/// Source of the currently checked out branch
pub trait BranchSource: Send + Sync {
    /// Branch name, or an empty string when it cannot be determined
    fn current_branch(&self) -> String;
}

/// Source of the current time
pub trait Clock: Send + Sync {
    /// Unix seconds
    fn now(&self) -> i64;
}

/// A clock frozen at a given instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.0
    }
}

/// A branch source that always reports the same branch.
#[derive(Debug, Clone)]
pub struct FixedBranch(pub String);

impl BranchSource for FixedBranch {
    fn current_branch(&self) -> String {
        self.0.clone()
    }
}
