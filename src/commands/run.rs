use std::path::Path;

use anyhow::Result;

use pap::presentation::factory::{command_sink, create_context};
use pap::presentation::Invocation;
use pap::TaskCommand;

/// Run a pipeline command and return its exit code
pub fn cmd_run(command: &TaskCommand, invocation: &Invocation, dir: &Path) -> Result<u8> {
    let ctx = create_context(invocation, dir, command_sink(invocation, command))?;
    let report = command.execute(&ctx);
    tracing::debug!(command = %report.command, state = ?report.state, "finished");
    Ok(if report.exit_code() == 0 { 0 } else { 1 })
}
