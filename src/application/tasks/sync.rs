//! `sync`: push files to a stage without rebuilding

use chrono::DateTime;

use crate::application::context::TaskContext;
use crate::config::StageConfig;
use crate::domain::entities::LockRecord;
use crate::domain::policies::sync_allowed;
use crate::domain::services::Rsync;
use crate::domain::value_objects::StepOutcome;
use crate::error::{FailBecause, PapError, PapResult};

use super::build::prepare_sync_paths;
use super::guard;

pub const SYNC_DENIED: &str = "Sync currently not allowed, please run deploy task instead";
pub const SYNC_FAILED: &str = "Synchronization failed";

pub fn sync(ctx: &TaskContext, stage: &str) -> PapResult<StepOutcome> {
    let stage = ctx.require_stage(stage)?;

    let lock = ctx.ports().locks.load();
    let decision = sync_allowed(&stage.name, &lock, &ctx.current_branch(), ctx.now());
    if let (true, Some(record)) = (decision.is_deny(), lock.record()) {
        ctx.note(last_deployment(record));
    }
    guard(ctx, &decision, SYNC_DENIED)?;

    prepare_sync_paths(ctx)?;
    sync_stage(ctx, stage)?;
    ctx.success(format!("Synchronized stage »{}«", stage.name));
    Ok(StepOutcome::Success)
}

fn last_deployment(record: &LockRecord) -> String {
    let when = DateTime::from_timestamp(record.timestamp(), 0)
        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| record.timestamp().to_string());
    format!(
        "Last deployment: »{}« from branch »{}« on {}",
        record.stage(),
        record.branch(),
        when
    )
}

/// Rsync every `sync-paths` pair to the stage working directory
pub fn sync_stage(ctx: &TaskContext, stage: &StageConfig) -> PapResult<()> {
    let paths = &ctx.config().settings().sync_paths;
    if paths.is_empty() {
        ctx.note("Sync paths not configured - Nothing to sync");
        return Ok(());
    }

    let remote = stage.remote();
    for path in paths {
        let spec = Rsync::to_stage(
            ctx.config().repo_path(&path.source),
            remote.as_ref(),
            &format!("{}{}", stage.working_directory(), path.target),
        )
        .raw_options(stage.rsync.options.as_deref())
        .map_err(|e| PapError::InvalidSetting {
            key: format!("stages.{}.rsync.options", stage.name),
            message: e.to_string(),
        })?
        .excludes(path.exclude.iter().cloned())
        .build();
        ctx.exec(&spec).or_fail(SYNC_FAILED)?;
    }
    Ok(())
}
