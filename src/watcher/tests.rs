//! Tests for the watcher module

use super::event::{is_relevant, WatchEvent, WatchOptions, WatcherState, DEBOUNCE_MS};
use super::run::watch;
use crate::domain::value_objects::StepOutcome;
use crate::error::PapError;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tempfile::tempdir;

#[test]
fn test_watch_event_to_json() {
    let event = WatchEvent::FileChanged {
        path: "web/index.php".to_string(),
    };
    let json = event.to_json();
    assert!(json.contains("\"event\":\"file_changed\""));
    assert!(json.contains("\"path\":\"web/index.php\""));

    assert_eq!(
        WatchEvent::SyncComplete { failed: true }.to_json(),
        r#"{"event":"sync_complete","failed":true}"#
    );
}

#[test]
fn test_watcher_state_debouncing() {
    let mut state = WatcherState::new();
    assert!(!state.should_sync());

    state.add_change(PathBuf::from("web/a.php"));
    assert!(!state.should_sync(), "must wait for the debounce window");

    std::thread::sleep(Duration::from_millis(DEBOUNCE_MS + 10));
    assert!(state.should_sync());
}

#[test]
fn test_watcher_state_coalesces_repeated_changes() {
    let mut state = WatcherState::new();
    state.add_change(PathBuf::from("web/b.php"));
    state.add_change(PathBuf::from("web/a.php"));
    state.add_change(PathBuf::from("web/b.php"));

    let changes = state.take_changes();
    assert_eq!(
        changes,
        vec![PathBuf::from("web/a.php"), PathBuf::from("web/b.php")]
    );
    assert!(!state.should_sync());
}

#[test]
fn test_lock_file_changes_are_ignored() {
    assert!(!is_relevant(Path::new("/srv/app/.lock")));
    assert!(is_relevant(Path::new("/srv/app/web/index.php")));
}

#[test]
fn test_missing_directory_is_an_error() {
    let dir = tempdir().unwrap();
    let options = WatchOptions::new(dir.path().join("missing"));
    let running = Arc::new(AtomicBool::new(true));

    let result = watch(&options, running, |_| StepOutcome::Success, |_| {});
    assert!(matches!(result, Err(PapError::Io(_))));
}

#[test]
fn test_watch_stops_immediately() {
    let dir = tempdir().unwrap();
    let options = WatchOptions::new(dir.path());
    let running = Arc::new(AtomicBool::new(false));
    let events = Arc::new(Mutex::new(Vec::new()));
    let seen = events.clone();

    watch(
        &options,
        running,
        |_| panic!("nothing changed"),
        move |e| seen.lock().unwrap().push(e),
    )
    .unwrap();

    let events = events.lock().unwrap();
    assert!(matches!(events[0], WatchEvent::WatchStarted { .. }));
    assert_eq!(events.last(), Some(&WatchEvent::Shutdown));
}

#[test]
fn test_watch_syncs_after_a_change() {
    let dir = tempdir().unwrap();
    let root = dir.path().to_path_buf();
    let options = WatchOptions::new(&root);
    let running = Arc::new(AtomicBool::new(true));
    let syncs = Arc::new(Mutex::new(0));

    let stop = running.clone();
    let counter = syncs.clone();
    let writer = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(300));
        fs::write(root.join("index.php"), "<?php").unwrap();
        let deadline = Instant::now() + Duration::from_secs(5);
        while *counter.lock().unwrap() == 0 && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(20));
        }
        stop.store(false, Ordering::SeqCst);
    });

    let count = syncs.clone();
    watch(
        &options,
        running,
        move |_| {
            *count.lock().unwrap() += 1;
            StepOutcome::Success
        },
        |_| {},
    )
    .unwrap();
    writer.join().unwrap();

    assert!(*syncs.lock().unwrap() >= 1);
}
