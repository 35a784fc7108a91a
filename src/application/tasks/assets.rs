//! `buildassets`
//!
//! Precedence: Grunt (deprecated) → scripts → native steps (mirror, concat).

use std::fs;
use std::path::Path;

use crate::application::context::TaskContext;
use crate::config::{AssetSettings, ConcatSettings, GruntSettings};
use crate::domain::ports::CommandSpec;
use crate::domain::services::Rsync;
use crate::domain::value_objects::StepOutcome;
use crate::error::{FailBecause, PapResult};

use super::lint::SCRIPT_FAILED;

pub const GRUNT_FAILED: &str = "Building Assets failed";

pub fn build(ctx: &TaskContext) -> PapResult<StepOutcome> {
    let assets = &ctx.config().settings().assets;
    if let Some(grunt) = assets.grunt.as_ref().filter(|g| is_configured(g)) {
        return grunt_build(ctx, grunt);
    }
    if !assets.scripts.is_empty() {
        ctx.run_scripts(&assets.scripts, None).or_fail(SCRIPT_FAILED)?;
        return Ok(StepOutcome::Success);
    }
    if assets.is_empty() {
        return ctx.skip("Assets not configured - Nothing to do");
    }
    native_build(ctx, assets)
}

fn is_configured(grunt: &GruntSettings) -> bool {
    let blank = |v: &Option<String>| v.as_deref().map_or(true, |s| s.trim().is_empty());
    !(blank(&grunt.working_directory) && blank(&grunt.task))
}

fn grunt_build(ctx: &TaskContext, grunt: &GruntSettings) -> PapResult<StepOutcome> {
    ctx.warn("Grunt support is deprecated, register »scripts« instead");

    let dir = ctx
        .config()
        .repo_path(grunt.working_directory.as_deref().unwrap_or(""));
    let npm = if Path::new(&dir).join("package-lock.json").is_file() {
        "ci"
    } else {
        "install"
    };

    let mut scripts = vec![format!("npm --silent --progress=false --prefer-offline {}", npm)];
    if Path::new(&dir).join("gems.rb").is_file() {
        scripts.push("bundle install --quiet".to_string());
    }
    let task = grunt.task.as_deref().unwrap_or("");
    scripts.push(format!("grunt -q {}", task).trim_end().to_string());

    ctx.run_scripts(&scripts, Some(&dir)).or_fail(GRUNT_FAILED)?;
    Ok(StepOutcome::Success)
}

fn native_build(ctx: &TaskContext, assets: &AssetSettings) -> PapResult<StepOutcome> {
    if let Some(mirror) = &assets.mirror {
        let spec = Rsync::mirror(
            ctx.config().repo_path(&mirror.source),
            ctx.config().repo_path(&mirror.target),
        )
        .build();
        ctx.exec(&spec).or_fail("Mirroring assets failed")?;
    }

    for (key, entries) in [
        ("minify-css", &assets.minify_css),
        ("minify-js", &assets.minify_js),
        ("minify-img", &assets.minify_img),
    ] {
        if !entries.is_empty() {
            ctx.warn(format!(
                "»{}« is not supported, register a minifier in »scripts« instead",
                key
            ));
        }
    }

    for concat in &assets.concat {
        concatenate(ctx, concat).or_fail("Concatenating assets failed")?;
    }

    Ok(StepOutcome::Success)
}

fn concatenate(ctx: &TaskContext, concat: &ConcatSettings) -> PapResult<()> {
    let target = ctx.config().repo_path(&concat.target);
    let mut joined = Vec::new();
    for source in &concat.sources {
        joined.extend(fs::read(ctx.config().repo_path(source))?);
    }
    if let Some(parent) = Path::new(&target).parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&target, joined)?;
    ctx.say(format!("Concatenated {} files into {}", concat.sources.len(), concat.target));
    Ok(())
}
