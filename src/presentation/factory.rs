//! Context Factory
//!
//! Creates the task context with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::path::Path;
use std::sync::Arc;

use is_terminal::IsTerminal;

use crate::application::{Ports, TaskCommand, TaskContext};
use crate::config::Config;
use crate::domain::ports::{AlwaysDecline, Confirm, TaskEventSink};
use crate::error::PapResult;
use crate::infrastructure::{
    DialoguerConfirm, FileLockRepository, GitCli, JsonEventSink, SystemClock,
    SystemProcessRunner, UreqProbe,
};

use super::cli::{Cli, ColorWhen};
use super::output::{ConsoleEventSink, ConsoleStyle};

/// Global switches of one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Invocation {
    pub json: bool,
    pub verbose: u8,
    pub color: Option<ColorWhen>,
    pub no_interaction: bool,
}

impl From<&Cli> for Invocation {
    fn from(cli: &Cli) -> Self {
        Self {
            json: cli.json,
            verbose: cli.verbose,
            color: cli.color,
            no_interaction: cli.no_interaction,
        }
    }
}

impl Invocation {
    pub fn console_style(&self) -> ConsoleStyle {
        ConsoleStyle::new(self.color, self.verbose)
    }
}

/// Does `command` report through the NDJSON stream?
///
/// Commands that print a document (`show`) keep stdout for the document
/// itself, so `--json` only selects the document format there.
pub fn streams_events(invocation: &Invocation, command: &TaskCommand) -> bool {
    invocation.json && !command.prints_document()
}

/// NDJSON on stdout with `--json`, colored console lines otherwise
pub fn command_sink(invocation: &Invocation, command: &TaskCommand) -> Arc<dyn TaskEventSink> {
    if streams_events(invocation, command) {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(ConsoleEventSink::stdio(invocation.console_style()))
    }
}

/// Prompt the operator only when someone can answer
pub fn confirm_port(no_interaction: bool, stdin_is_tty: bool) -> Arc<dyn Confirm> {
    if no_interaction || !stdin_is_tty {
        Arc::new(AlwaysDecline)
    } else {
        Arc::new(DialoguerConfirm)
    }
}

/// Load the property files from `dir`, detecting the repository via git
pub fn load_config(dir: &Path) -> PapResult<Config> {
    Config::load(dir, || GitCli::new(dir).repository_root())
}

/// System implementations of every port, rooted at `dir`
pub fn ports(invocation: &Invocation, dir: &Path, events: Arc<dyn TaskEventSink>) -> Ports {
    Ports {
        runner: Arc::new(SystemProcessRunner::json(invocation.json)),
        confirm: confirm_port(invocation.no_interaction, std::io::stdin().is_terminal()),
        locks: Arc::new(FileLockRepository::in_dir(dir)),
        http: Arc::new(UreqProbe::default()),
        branch: Arc::new(GitCli::new(dir)),
        clock: Arc::new(SystemClock),
        events,
    }
}

/// Everything a command needs, with config warnings already reported
pub fn create_context(
    invocation: &Invocation,
    dir: &Path,
    events: Arc<dyn TaskEventSink>,
) -> PapResult<TaskContext> {
    let config = load_config(dir)?;
    let warnings: Vec<String> = config.warnings().iter().map(ToString::to_string).collect();
    let ctx = TaskContext::new(config, ports(invocation, dir, events));
    for warning in warnings {
        ctx.warn(warning);
    }
    Ok(ctx)
}
