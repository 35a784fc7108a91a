//! Commands
//!
//! A command is a pipeline of tasks. Composite commands (`build`,
//! `publish`) list the tasks of their parts; everything stops at the
//! first failure.

use crate::domain::value_objects::StepOutcome;

use super::context::TaskContext;
use super::pipeline::{Pipeline, PipelineReport};
use super::tasks::composer::Location;
use super::tasks::show::ShowFormat;
use super::tasks::test_suite::TestRun;
use super::tasks::{
    assets, build, composer, deploy, lint, show, smoke, ssh, sync, test_suite, view,
};

/// Everything `pap` can run through the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskCommand {
    LintCheck,
    LintFix,
    BuildAssets,
    BuildApp { stage: String },
    Build { stage: String },
    TestUnit,
    TestIntegration(TestRun),
    TestSmoke { stage: String },
    Sync { stage: String },
    Deploy { stage: String },
    Publish { stage: String },
    ComposerInstall { stage: String, remote: bool },
    ComposerCommand { stage: Option<String>, command: Option<String> },
    SshConnect { stage: String },
    SshExec { stage: String, command: Option<String> },
    View { stage: String },
    Show { key: Option<String>, format: ShowFormat },
}

impl TaskCommand {
    /// Canonical command name
    pub fn name(&self) -> &'static str {
        match self {
            TaskCommand::LintCheck => "lint:check",
            TaskCommand::LintFix => "lint:fix",
            TaskCommand::BuildAssets => "buildassets",
            TaskCommand::BuildApp { .. } => "buildapp",
            TaskCommand::Build { .. } => "build",
            TaskCommand::TestUnit => "test:unit",
            TaskCommand::TestIntegration(_) => "test:integration",
            TaskCommand::TestSmoke { .. } => "test:smoke",
            TaskCommand::Sync { .. } => "sync",
            TaskCommand::Deploy { .. } => "deploy",
            TaskCommand::Publish { .. } => "publish",
            TaskCommand::ComposerInstall { .. } => "composer:install",
            TaskCommand::ComposerCommand { .. } => "composer:command",
            TaskCommand::SshConnect { .. } => "ssh:connect",
            TaskCommand::SshExec { .. } => "ssh:exec",
            TaskCommand::View { .. } => "view",
            TaskCommand::Show { .. } => "show",
        }
    }

    /// Whether the command's stdout is a document rather than a report
    pub fn prints_document(&self) -> bool {
        matches!(self, TaskCommand::Show { .. })
    }

    /// The steps this command runs, in order
    pub fn pipeline(&self) -> Pipeline {
        let pipeline = Pipeline::new(self.name());
        match self.clone() {
            TaskCommand::LintCheck => pipeline.step("lint:check", lint::check),
            TaskCommand::LintFix => pipeline.step("lint:fix", lint::fix),
            TaskCommand::BuildAssets => pipeline.step("buildassets", assets::build),
            TaskCommand::BuildApp { stage } => {
                pipeline.step("buildapp", move |ctx: &TaskContext| build::app(ctx, &stage))
            }
            TaskCommand::Build { stage } => pipeline
                .step("buildassets", assets::build)
                .step("buildapp", move |ctx: &TaskContext| build::app(ctx, &stage)),
            TaskCommand::TestUnit => pipeline.step("test:unit", test_suite::unit),
            TaskCommand::TestIntegration(run) => pipeline.step(
                "test:integration",
                move |ctx: &TaskContext| test_suite::integration(ctx, &run),
            ),
            TaskCommand::TestSmoke { stage } => {
                pipeline.step("test:smoke", move |ctx: &TaskContext| smoke::smoke(ctx, &stage))
            }
            TaskCommand::Sync { stage } => {
                pipeline.step("sync", move |ctx: &TaskContext| sync::sync(ctx, &stage))
            }
            TaskCommand::Deploy { stage } => {
                pipeline.step("deploy", move |ctx: &TaskContext| deploy::deploy(ctx, &stage))
            }
            TaskCommand::Publish { stage } => publish(pipeline, stage),
            TaskCommand::ComposerInstall { stage, remote } => {
                let location = if remote {
                    Location::Stage
                } else {
                    Location::Repository
                };
                pipeline.step("composer:install", move |ctx: &TaskContext| {
                    composer::install(ctx, &stage, location)
                })
            }
            TaskCommand::ComposerCommand { stage, command } => {
                pipeline.step("composer:command", move |ctx: &TaskContext| {
                    composer::command(ctx, stage.as_deref(), command.as_deref())
                })
            }
            TaskCommand::SshConnect { stage } => {
                pipeline.step("ssh:connect", move |ctx: &TaskContext| ssh::connect(ctx, &stage))
            }
            TaskCommand::SshExec { stage, command } => {
                pipeline.step("ssh:exec", move |ctx: &TaskContext| {
                    ssh::exec(ctx, &stage, command.as_deref())
                })
            }
            TaskCommand::View { stage } => {
                pipeline.step("view", move |ctx: &TaskContext| view::view(ctx, &stage))
            }
            TaskCommand::Show { key, format } => pipeline.step("show", move |ctx: &TaskContext| {
                show::show(ctx, key.as_deref(), format)
            }),
        }
    }

    pub fn execute(&self, ctx: &TaskContext) -> PipelineReport {
        tracing::info!(command = self.name(), "running command");
        self.pipeline().run(ctx)
    }
}

/// lint → unit tests → deploy → smoke test → integration tests
fn publish(pipeline: Pipeline, stage: String) -> Pipeline {
    let deploy_stage = stage.clone();
    let smoke_stage = stage.clone();
    let run = TestRun::for_stage(stage);

    pipeline
        .step("lint:check", lint::check)
        .step("test:unit", test_suite::unit)
        .step("deploy", move |ctx: &TaskContext| deploy::deploy(ctx, &deploy_stage))
        .step("test:smoke", move |ctx: &TaskContext| smoke::smoke(ctx, &smoke_stage))
        .step("test:integration", move |ctx: &TaskContext| {
            test_suite::integration(ctx, &run)
        })
}

/// Run `sync` for the local stage; used by the watcher
pub fn sync_local(ctx: &TaskContext) -> StepOutcome {
    TaskCommand::Sync {
        stage: crate::config::LOCAL_STAGE.to_string(),
    }
    .execute(ctx)
    .outcome()
}
