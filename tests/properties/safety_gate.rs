//! Property tests for the sync and deploy gates.

use proptest::prelude::*;

use pap::domain::entities::{LockRecord, LockState};
use pap::domain::policies::{deploy_allowed, sync_allowed, STALE_LOCK_SECONDS};

const NOW: i64 = 1_700_000_000;

fn name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9/-]{0,12}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn foreign_branch_always_denies(
        stage in name(),
        locked_stage in name(),
        locked_branch in name(),
        current in name(),
        age in 0..(2 * STALE_LOCK_SECONDS),
    ) {
        prop_assume!(locked_branch != current);
        let lock = LockState::Present(LockRecord::new(locked_stage, locked_branch, NOW - age));
        prop_assert!(sync_allowed(&stage, &lock, &current, NOW).is_deny());
    }

    #[test]
    fn stale_lock_always_denies(
        stage in name(),
        branch in name(),
        extra in 1..(10 * STALE_LOCK_SECONDS),
    ) {
        let deployed = NOW - STALE_LOCK_SECONDS - extra;
        let lock = LockState::Present(LockRecord::new(stage.clone(), branch.clone(), deployed));
        prop_assert!(sync_allowed(&stage, &lock, &branch, NOW).is_deny());
    }

    #[test]
    fn fresh_lock_on_same_branch_never_denies(
        stage in name(),
        locked_stage in name(),
        branch in name(),
        age in 0..=STALE_LOCK_SECONDS,
    ) {
        let same_stage = stage == locked_stage;
        let lock = LockState::Present(LockRecord::new(locked_stage, branch.clone(), NOW - age));
        let decision = sync_allowed(&stage, &lock, &branch, NOW);
        prop_assert!(!decision.is_deny());
        prop_assert_eq!(decision.is_allow(), same_stage);
        prop_assert_eq!(decision.needs_confirmation(), !same_stage);
    }

    #[test]
    fn missing_or_broken_lock_allows(stage in name(), branch in name(), reason in ".*") {
        prop_assert!(sync_allowed(&stage, &LockState::Absent, &branch, NOW).is_allow());
        prop_assert!(sync_allowed(&stage, &LockState::Unreadable(reason), &branch, NOW).is_allow());
    }

    #[test]
    fn deploy_never_denies(
        stage in name(),
        branch in name(),
        allowed in proptest::collection::vec(name(), 0..4),
    ) {
        let decision = deploy_allowed(&stage, &branch, &allowed);
        prop_assert!(!decision.is_deny());
        let expect_allow = allowed.is_empty() || allowed.contains(&branch);
        prop_assert_eq!(decision.is_allow(), expect_allow);
    }
}
