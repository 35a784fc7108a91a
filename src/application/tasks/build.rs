//! `buildapp` and the repository preparation shared with `sync`

use crate::application::context::TaskContext;
use crate::domain::services::Rsync;
use crate::domain::value_objects::StepOutcome;
use crate::error::{FailBecause, PapResult};

use super::composer::{self, Location};

/// Mirror every `prepare-sync-paths` pair inside the repository
pub fn prepare_sync_paths(ctx: &TaskContext) -> PapResult<()> {
    for path in &ctx.config().settings().prepare_sync_paths {
        let spec = Rsync::mirror(
            ctx.config().repo_path(&path.source),
            ctx.config().repo_path(&path.target),
        )
        .excludes(path.exclude.iter().cloned())
        .build();
        ctx.exec(&spec).or_fail("Preparing sync paths failed")?;
    }
    Ok(())
}

/// Arrange the repository for `stage` and install its packages locally
pub fn app(ctx: &TaskContext, stage: &str) -> PapResult<StepOutcome> {
    prepare_sync_paths(ctx)?;
    composer::install(ctx, stage, Location::Repository)
}
