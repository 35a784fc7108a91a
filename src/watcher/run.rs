//! Watch loop

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::domain::value_objects::StepOutcome;
use crate::error::{PapError, PapResult};

use super::event::{is_relevant, WatchEvent, WatchOptions, WatcherState};

/// Watch `options.root` and call `sync` after every burst of changes
/// until `running` turns false.
///
/// A failing sync is reported and the loop keeps going.
pub fn watch(
    options: &WatchOptions,
    running: Arc<AtomicBool>,
    mut sync: impl FnMut(&[PathBuf]) -> StepOutcome,
    event_callback: impl Fn(WatchEvent),
) -> PapResult<()> {
    if !options.root.is_dir() {
        return Err(PapError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("watch directory {} does not exist", options.root.display()),
        )));
    }

    let (tx, rx) = channel();
    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| {
            if let Ok(event) = res {
                for path in event.paths {
                    let _ = tx.send(path);
                }
            }
        },
        Config::default(),
    )
    .map_err(|e| PapError::Io(std::io::Error::other(e.to_string())))?;

    watcher
        .watch(&options.root, RecursiveMode::Recursive)
        .map_err(|e| PapError::Io(std::io::Error::other(e.to_string())))?;

    event_callback(WatchEvent::WatchStarted {
        path: options.root.display().to_string(),
    });
    tracing::info!(root = %options.root.display(), "watching");

    let mut state = WatcherState::new();
    while running.load(Ordering::SeqCst) {
        if let Ok(path) = rx.recv_timeout(Duration::from_millis(50)) {
            if is_relevant(&path) {
                state.add_change(path);
            }
        }

        if state.should_sync() {
            let changes = state.take_changes();
            for path in &changes {
                event_callback(WatchEvent::FileChanged {
                    path: path.display().to_string(),
                });
            }
            event_callback(WatchEvent::SyncStarted);
            let outcome = sync(&changes);
            if let StepOutcome::Failed(message) = &outcome {
                event_callback(WatchEvent::Error {
                    message: message.clone(),
                });
            }
            event_callback(WatchEvent::SyncComplete {
                failed: outcome.is_failure(),
            });
        }
    }

    event_callback(WatchEvent::Shutdown);
    Ok(())
}
