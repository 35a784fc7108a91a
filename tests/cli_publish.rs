//! `publish`: lint, unit tests, deploy, smoke test, integration tests.

#![cfg(unix)]

mod common;

use common::*;

#[test]
fn publish_runs_every_step_in_order() {
    let origin = OriginServer::start(200);
    let env = TestEnv::builder().common(&project(origin.url())).build();

    env.run(&["publish", "-s", "live"])
        .assert_exit(0)
        .assert_output_contains(&format!("Smoke test successful for {}", origin.url()));

    let calls = env.calls();
    let position = |needle: &str| {
        calls
            .iter()
            .position(|c| c.starts_with(needle))
            .unwrap_or_else(|| panic!("{needle} did not run: {calls:?}"))
    };
    assert!(position("lint") < position("phpunit"));
    assert!(position("phpunit") < position("npm run build"));
    assert!(position("npm run build") < position("ssh "));
    assert_eq!(
        calls.last().unwrap(),
        &format!("behat live {}/", origin.url())
    );
    assert_eq!(origin.requests(), 1);
    assert!(env.lock().unwrap().starts_with("live,main,"));
}

#[test]
fn publish_failing_at_deploy_stops_there() {
    let origin = OriginServer::start(200);
    let env = TestEnv::builder()
        .common(&project(origin.url()))
        .failing("npm", 1)
        .build();

    env.run(&["publish", "-s", "live"]).assert_exit(1);

    let calls = env.calls();
    assert_eq!(calls, vec!["lint", "phpunit", "npm run build"]);
    assert_eq!(origin.requests(), 0, "smoke test must not run");
    assert!(env.lock().is_none());
}

#[test]
fn publish_failing_smoke_test_skips_integration_tests() {
    let origin = OriginServer::start(503);
    let env = TestEnv::builder().common(&project(origin.url())).build();

    env.run(&["publish", "-s", "live"])
        .assert_exit(1)
        .assert_output_contains("Smoke test failed");

    assert!(env.lock().is_some(), "deploy finished before the smoke test");
    assert!(env.calls().iter().all(|c| !c.starts_with("behat")));
}
