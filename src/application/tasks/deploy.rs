//! `deploy`: full build, push and remote install, then remember the deployment

use std::path::PathBuf;

use crate::application::context::TaskContext;
use crate::application::pipeline::Pipeline;
use crate::domain::entities::{LockRecord, LOCK_FILE};
use crate::domain::policies::deploy_allowed;
use crate::domain::value_objects::StepOutcome;
use crate::error::{PapError, PapResult};

use super::composer::{self, Location};
use super::{assets, build, guard, sync};

pub const DEPLOY_DENIED: &str = "Deployment is not allowed";

pub fn deploy(ctx: &TaskContext, stage: &str) -> PapResult<StepOutcome> {
    let config = ctx.require_stage(stage)?;
    let decision = deploy_allowed(stage, &ctx.current_branch(), &config.lock_branches);
    guard(ctx, &decision, DEPLOY_DENIED)?;

    let report = steps(stage).run(ctx);
    if !report.outcome().is_failure() {
        ctx.success(format!("Deployment to »{}« finished", stage));
    }
    Ok(report.outcome())
}

fn steps(stage: &str) -> Pipeline {
    let name = stage.to_string();
    let app_stage = name.clone();
    let sync_stage = name.clone();
    let install_stage = name.clone();

    Pipeline::new("deploy")
        .step("buildassets", assets::build)
        .step("buildapp", move |ctx: &TaskContext| build::app(ctx, &app_stage))
        .step("sync-stage", move |ctx: &TaskContext| {
            let stage = ctx.require_stage(&sync_stage)?;
            sync::sync_stage(ctx, stage)?;
            Ok(StepOutcome::Success)
        })
        .step("composer:install", move |ctx: &TaskContext| {
            composer::install(ctx, &install_stage, Location::Stage)
        })
        .step("record-deployment", move |ctx: &TaskContext| {
            record_deployment(ctx, &name)?;
            Ok(StepOutcome::Success)
        })
}

/// Overwrite the lock with the stage and branch just deployed
pub fn record_deployment(ctx: &TaskContext, stage: &str) -> PapResult<()> {
    let record = LockRecord::new(stage, ctx.current_branch(), ctx.now());
    ctx.ports()
        .locks
        .save(&record)
        .map_err(|e| PapError::LockFile {
            path: PathBuf::from(LOCK_FILE),
            message: e.to_string(),
        })?;
    tracing::debug!(lock = %record.to_line(), "deployment recorded");
    Ok(())
}
