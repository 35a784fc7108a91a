//! `test:unit` and `test:integration`
//!
//! Integration tests run either registered scripts (which receive the stage
//! details through the environment) or Codeception against the stage origin.

use crate::application::context::TaskContext;
use crate::config::DEFAULT_COMPOSER;
use crate::domain::ports::CommandSpec;
use crate::domain::value_objects::StepOutcome;
use crate::error::{FailBecause, PapResult};

use super::composer::INSTALL_FAILED;

pub const TEST_FAILED: &str = "Test failed";

/// Options of an integration test run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestRun {
    pub stage: String,
    pub group: Option<String>,
    pub suite: Option<String>,
}

impl TestRun {
    pub fn for_stage(stage: impl Into<String>) -> Self {
        Self {
            stage: stage.into(),
            ..Default::default()
        }
    }
}

pub fn unit(ctx: &TaskContext) -> PapResult<StepOutcome> {
    let scripts = &ctx.config().settings().test.unit.scripts;
    if scripts.is_empty() {
        return ctx.skip("Unit tests not configured");
    }
    ctx.run_scripts(scripts, None).or_fail(TEST_FAILED)?;
    Ok(StepOutcome::Success)
}

pub fn integration(ctx: &TaskContext, run: &TestRun) -> PapResult<StepOutcome> {
    let settings = &ctx.config().settings().test;
    let origin = ctx.config().stage(&run.stage).and_then(|s| s.origin());

    let scripts = settings.integration_scripts();
    if !scripts.is_empty() {
        for script in scripts {
            let mut spec = CommandSpec::shell(script.as_str())
                .current_dir(ctx.config().repository_path())
                .env("PAP_STAGE", run.stage.as_str());
            if let Some(origin) = origin {
                spec = spec.env("BASEURL", format!("{}/", origin));
            }
            if let Some(group) = &run.group {
                spec = spec.env("PAP_TEST_GROUP", group.as_str());
            }
            if let Some(suite) = &run.suite {
                spec = spec.env("PAP_TEST_SUITE", suite.as_str());
            }
            ctx.exec(&spec).or_fail(TEST_FAILED)?;
        }
        return Ok(StepOutcome::Success);
    }

    let Some(codecept_dir) = settings
        .codeception
        .working_directory
        .as_deref()
        .filter(|d| !d.trim().is_empty())
    else {
        return ctx.skip("Test framework not configured");
    };
    let Some(origin) = origin else {
        return ctx.skip("Stage origin not configured");
    };

    let dir = ctx.config().repo_path(codecept_dir);
    let composer = ctx
        .config()
        .settings()
        .composer
        .phar
        .as_deref()
        .unwrap_or(DEFAULT_COMPOSER);
    let install = CommandSpec::shell(format!(
        "{} install --no-interaction --ignore-platform-reqs",
        composer
    ))
    .current_dir(&dir);
    ctx.exec(&install).or_fail(INSTALL_FAILED)?;

    let mut codecept = CommandSpec::new(format!("{}vendor/bin/codecept", dir))
        .arg("run")
        .current_dir(&dir)
        .env("BASEURL", format!("{}/", origin));
    if let Some(suite) = run.suite.as_deref().or(settings.codeception.suite.as_deref()) {
        codecept = codecept.arg(suite);
    }
    if let Some(group) = &run.group {
        codecept = codecept.arg("--group").arg(group.as_str());
    }

    let deny_groups = ctx
        .config()
        .stage(&run.stage)
        .map(|s| s.test.deny_groups.as_slice())
        .unwrap_or_default();
    if !deny_groups.is_empty() {
        ctx.note(format!("Excluding test groups: {}", deny_groups.join(", ")));
        for group in deny_groups {
            codecept = codecept.arg("--skip-group").arg(group.as_str());
        }
    }

    ctx.exec(&codecept).or_fail(TEST_FAILED)?;
    Ok(StepOutcome::Success)
}
