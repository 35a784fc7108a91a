//! Composer tasks

use crate::application::context::TaskContext;
use crate::config::{StageConfig, DEFAULT_COMPOSER};
use crate::domain::ports::CommandSpec;
use crate::domain::value_objects::StepOutcome;
use crate::error::{FailBecause, PapResult};

pub const INSTALL_FAILED: &str = "Composer install failed";
pub const COMMAND_FAILED: &str = "Composer command failed";

/// Where `composer install` should run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// In the repository, preparing a build for the stage
    Repository,
    /// In the stage working directory (over ssh when the stage has a host)
    Stage,
}

/// `composer:install`
///
/// The phar setting is a command prefix (`php composer.phar` works), so the
/// install runs through the shell like the registered scripts do.
pub fn install(ctx: &TaskContext, stage: &str, location: Location) -> PapResult<StepOutcome> {
    let composer = &ctx.config().settings().composer;
    if composer.is_empty() {
        return ctx.skip("Composer not configured");
    }
    let stage = ctx.require_stage(stage)?;

    let (phar, dir) = match location {
        Location::Repository => (
            composer.phar.as_deref().unwrap_or(DEFAULT_COMPOSER),
            ctx.config()
                .repo_path(composer.working_directory.as_deref().unwrap_or("")),
        ),
        Location::Stage => (stage.composer_phar(), stage.working_directory().to_string()),
    };

    let mut line = format!("{} install --no-interaction", phar);
    if !stage.is_local() {
        line.push_str(" --no-dev");
    }
    ctx.say(format!("Installing Packages in {}", dir));

    let spec = CommandSpec::shell(line);
    let result = match location {
        Location::Repository => run_in(ctx, spec, &dir),
        Location::Stage => run_on_stage(ctx, stage, spec),
    };
    result.or_fail(INSTALL_FAILED)?;
    Ok(StepOutcome::Success)
}

/// `composer:command`: run an arbitrary composer command
///
/// Without a stage the command runs in the repository's composer directory.
pub fn command(
    ctx: &TaskContext,
    stage: Option<&str>,
    command: Option<&str>,
) -> PapResult<StepOutcome> {
    let composer = &ctx.config().settings().composer;
    if composer.is_empty() {
        return ctx.skip("Composer not configured");
    }
    let Some(command) = command.filter(|c| !c.trim().is_empty()) else {
        return ctx.skip("No command specified");
    };

    let Some(stage) = stage else {
        let phar = composer.phar.as_deref().unwrap_or(DEFAULT_COMPOSER);
        let dir = ctx
            .config()
            .repo_path(composer.working_directory.as_deref().unwrap_or(""));
        let spec = CommandSpec::shell(format!("{} {}", phar, command));
        run_in(ctx, spec, &dir).or_fail(COMMAND_FAILED)?;
        return Ok(StepOutcome::Success);
    };

    let stage = ctx.require_stage(stage)?;
    let spec = CommandSpec::shell(format!("{} {}", stage.composer_phar(), command));
    run_on_stage(ctx, stage, spec).or_fail(COMMAND_FAILED)?;
    Ok(StepOutcome::Success)
}

fn run_in(ctx: &TaskContext, spec: CommandSpec, dir: &str) -> PapResult<()> {
    let spec = if dir.is_empty() { spec } else { spec.current_dir(dir) };
    ctx.exec(&spec)?;
    Ok(())
}

/// Over ssh when the stage has a host and user, otherwise on this machine
/// inside the stage working directory
fn run_on_stage(ctx: &TaskContext, stage: &StageConfig, spec: CommandSpec) -> PapResult<()> {
    match stage.remote().filter(|_| !stage.is_local()) {
        Some(remote) => ctx.exec_remote(&remote, &spec).map(drop),
        None => run_in(ctx, spec, stage.working_directory()),
    }
}
