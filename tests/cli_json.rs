//! `--json` turns the output into NDJSON events.

#![cfg(unix)]

mod common;

use common::*;
use serde_json::Value;

fn events(stdout: &str) -> Vec<Value> {
    stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap_or_else(|e| panic!("{line}: {e}")))
        .collect()
}

#[test]
fn json_events_for_a_skipped_command() {
    let env = TestEnv::builder().common(EMPTY).build();
    let result = env.run(&["lint", "--json"]);
    result.assert_exit(0);

    let events = events(&result.stdout);
    assert_eq!(events[0]["event"], "step_start");
    assert_eq!(events[0]["step"], "lint:check");
    assert_eq!(events[1]["event"], "message");
    assert_eq!(events[1]["text"], "Lint not configured");
    assert_eq!(events[2]["event"], "step_complete");
    assert_eq!(events[2]["status"], "skipped");
}

#[test]
fn json_events_for_a_denied_sync() {
    let env = TestEnv::builder()
        .common(&project("http://localhost"))
        .lock(&lock_line("live", "develop", 60))
        .build();
    let result = env.run(&["--json", "sync", "-s", "live"]);
    result.assert_exit(1);

    let events = events(&result.stdout);
    let last = events.last().unwrap();
    assert_eq!(last["event"], "step_complete");
    assert_eq!(last["status"], "failed");
    assert_eq!(
        last["message"],
        "Sync currently not allowed, please run deploy task instead"
    );
}

#[test]
fn tool_output_does_not_break_the_stream() {
    let env = TestEnv::builder()
        .common("settings:\n  lint:\n    scripts: [echo not json]\n")
        .build();
    let result = env.run(&["--json", "lint"]);
    result.assert_exit(0);
    events(&result.stdout);
    assert!(result.stderr.contains("not json"));
}
