//! `ssh:connect` and `ssh:exec`

use crate::application::context::TaskContext;
use crate::config::StageConfig;
use crate::domain::ports::{CommandSpec, RemoteTarget};
use crate::domain::services::interactive_shell;
use crate::domain::value_objects::StepOutcome;
use crate::error::{FailBecause, PapError, PapResult};

fn remote_of(stage: &StageConfig) -> PapResult<RemoteTarget> {
    stage
        .remote()
        .ok_or_else(|| PapError::NotConfigured("Stage host".to_string()))
}

/// Open a login shell in the stage working directory
pub fn connect(ctx: &TaskContext, stage: &str) -> PapResult<StepOutcome> {
    let Some(stage) = ctx.config().stage(stage) else {
        return ctx.skip("Stage not configured - Skip");
    };
    let remote = remote_of(stage)?;

    // The exit status of an interactive session is the last command's.
    match ctx.exec(&interactive_shell(&remote)) {
        Ok(_) | Err(PapError::ExternalToolFailure { .. }) => Ok(StepOutcome::Success),
        Err(err) => Err(err.because("SSH connection failed")),
    }
}

/// Run one command in the stage working directory
pub fn exec(ctx: &TaskContext, stage: &str, command: Option<&str>) -> PapResult<StepOutcome> {
    let stage = ctx.require_stage(stage)?;
    let Some(command) = command.filter(|c| !c.trim().is_empty()) else {
        return ctx.skip("No command specified");
    };
    let remote = remote_of(stage)?;

    ctx.exec_remote(&remote, &CommandSpec::shell(command))
        .or_fail("Remote command failed")?;
    Ok(StepOutcome::Success)
}
