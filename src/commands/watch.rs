use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};

use pap::application::sync_local;
use pap::domain::ports::TaskEventSink;
use pap::infrastructure::JsonEventSink;
use pap::presentation::factory::create_context;
use pap::presentation::{ConsoleEventSink, Invocation};
use pap::watcher::{watch, WatchEvent, WatchOptions};

/// Sync the local stage whenever something below the watch directory changes
pub fn cmd_watch(invocation: &Invocation, dir: &Path) -> Result<u8> {
    let console = Arc::new(ConsoleEventSink::stdio(invocation.console_style()));
    let events: Arc<dyn TaskEventSink> = if invocation.json {
        Arc::new(JsonEventSink::stdout())
    } else {
        console.clone()
    };
    let ctx = create_context(invocation, dir, events)?;

    let root = PathBuf::from(ctx.config().repo_path(
        ctx.config()
            .settings()
            .watch
            .working_directory
            .as_deref()
            .unwrap_or_default(),
    ));

    let running = Arc::new(AtomicBool::new(true));
    let handler = running.clone();
    ctrlc::set_handler(move || {
        handler.store(false, Ordering::SeqCst);
    })
    .context("cannot install the Ctrl+C handler")?;

    let json = invocation.json;
    watch(
        &WatchOptions::new(root),
        running,
        |_| sync_local(&ctx),
        |event: WatchEvent| {
            if json {
                println!("{}", event.to_json());
            } else {
                console.on_watch_event(&event);
            }
        },
    )?;
    Ok(0)
}
