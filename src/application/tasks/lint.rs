//! Lint tasks

use crate::domain::ports::CommandSpec;
use crate::domain::value_objects::StepOutcome;
use crate::error::{FailBecause, PapResult};

use crate::application::context::TaskContext;

pub const SCRIPT_FAILED: &str = "Script execution failed";
pub const CHECK_FAILED: &str = "Check failed";

/// Directory the bundled `phplint.sh` wrapper lives in
const PHPLINT_DIR: &str = "./vendor/bin/";

/// `lint:check`: configured scripts, or `phplint.sh` over every lint path
pub fn check(ctx: &TaskContext) -> PapResult<StepOutcome> {
    let lint = &ctx.config().settings().lint;
    if !lint.scripts.is_empty() {
        ctx.run_scripts(&lint.scripts, None).or_fail(SCRIPT_FAILED)?;
        return Ok(StepOutcome::Success);
    }
    if lint.lint_paths.is_empty() {
        return ctx.skip("Lint not configured");
    }

    for path in &lint.lint_paths {
        let script = format!("./phplint.sh {}", ctx.config().repo_path(path));
        ctx.exec(&CommandSpec::shell(script).current_dir(PHPLINT_DIR))
            .or_fail(CHECK_FAILED)?;
    }
    Ok(StepOutcome::Success)
}

/// `lint:fix`: configured fixer scripts
pub fn fix(ctx: &TaskContext) -> PapResult<StepOutcome> {
    let scripts = &ctx.config().settings().lint.fix.scripts;
    if scripts.is_empty() {
        return ctx.skip("Lint fix not configured");
    }
    ctx.run_scripts(scripts, None).or_fail(SCRIPT_FAILED)?;
    Ok(StepOutcome::Success)
}
