//! `view`: open the stage origin in a browser

use crate::application::context::TaskContext;
use crate::domain::ports::CommandSpec;
use crate::domain::value_objects::StepOutcome;
use crate::error::{FailBecause, PapResult};

/// Platform command that opens `url` with the default handler
pub fn opener(url: &str) -> CommandSpec {
    if cfg!(target_os = "macos") {
        CommandSpec::new("open").arg(url)
    } else if cfg!(windows) {
        CommandSpec::new("cmd").args(["/C", "start", "", url])
    } else {
        CommandSpec::new("xdg-open").arg(url)
    }
}

pub fn view(ctx: &TaskContext, stage: &str) -> PapResult<StepOutcome> {
    let stage = ctx.require_stage(stage)?;
    let Some(origin) = stage.origin() else {
        return ctx.skip("No origin configured");
    };
    ctx.exec(&opener(origin)).or_fail("Opening the browser failed")?;
    Ok(StepOutcome::Success)
}
