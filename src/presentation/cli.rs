//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--json, --color, --verbose, --no-interaction) are inherited by all subcommands
//! - Command names follow the task names (`lint:check`, `composer:install`, ...)
//!   with short aliases for the common ones

use clap::{Args, Parser, Subcommand};

use crate::application::{ShowFormat, TaskCommand, TestRun};
use crate::config::LOCAL_STAGE;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// pap - build, test and deploy PHP web applications across stages
#[derive(Parser, Debug)]
#[command(name = "pap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output NDJSON events (and JSON for `show`)
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decline every confirmation instead of asking
    #[arg(short = 'n', long, global = true)]
    pub no_interaction: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct StageArg {
    /// Target stage
    #[arg(short, long, default_value = LOCAL_STAGE)]
    pub stage: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the configured lint checks
    #[command(name = "lint:check", visible_alias = "lint")]
    LintCheck,

    /// Run the configured lint fixers
    #[command(name = "lint:fix")]
    LintFix,

    /// Build the frontend assets
    #[command(name = "buildassets")]
    BuildAssets,

    /// Prepare the sync paths and install composer packages
    #[command(name = "buildapp")]
    BuildApp(StageArg),

    /// buildassets, then buildapp
    Build(StageArg),

    /// Run the unit tests
    #[command(name = "test:unit", visible_alias = "unittest")]
    TestUnit,

    /// Run the integration tests against a stage
    #[command(name = "test:integration", visible_aliases = ["integrationtest", "test"])]
    TestIntegration {
        #[command(flatten)]
        stage: StageArg,

        /// Only run this test group
        #[arg(short, long)]
        group: Option<String>,

        /// Only run this test suite
        #[arg(long)]
        suite: Option<String>,
    },

    /// Request the stage origin once
    #[command(name = "test:smoke", visible_alias = "smoketest")]
    TestSmoke(StageArg),

    /// Push files to a stage without rebuilding
    Sync(StageArg),

    /// Build, push and install on a stage
    Deploy(StageArg),

    /// lint, unit tests, deploy, smoke test, integration tests
    Publish(StageArg),

    /// Install composer packages
    #[command(name = "composer:install")]
    ComposerInstall {
        #[command(flatten)]
        stage: StageArg,

        /// Install on the stage host instead of the repository
        #[arg(long)]
        remote: bool,
    },

    /// Run an arbitrary composer command
    #[command(name = "composer:command")]
    ComposerCommand {
        /// Stage to run on (repository when omitted)
        #[arg(short, long)]
        stage: Option<String>,

        /// Composer arguments, e.g. "dump-autoload -o"
        #[arg(short, long)]
        command: Option<String>,
    },

    /// Open a login shell on the stage host
    #[command(name = "ssh:connect")]
    SshConnect(StageArg),

    /// Run a command on the stage host
    #[command(name = "ssh:exec")]
    SshExec {
        #[command(flatten)]
        stage: StageArg,

        /// Command line to run
        #[arg(short, long)]
        command: Option<String>,
    },

    /// Open the stage origin in the browser
    View(StageArg),

    /// Print the merged configuration
    Show {
        /// Dotted key, e.g. `settings.lint` or `stages`
        key: Option<String>,
    },

    /// Sync changes to the local stage continuously
    Watch,
}

impl Commands {
    /// The pipeline command, or `None` for `watch`
    pub fn into_task(self, json: bool) -> Option<TaskCommand> {
        let command = match self {
            Commands::LintCheck => TaskCommand::LintCheck,
            Commands::LintFix => TaskCommand::LintFix,
            Commands::BuildAssets => TaskCommand::BuildAssets,
            Commands::BuildApp(s) => TaskCommand::BuildApp { stage: s.stage },
            Commands::Build(s) => TaskCommand::Build { stage: s.stage },
            Commands::TestUnit => TaskCommand::TestUnit,
            Commands::TestIntegration {
                stage,
                group,
                suite,
            } => TaskCommand::TestIntegration(TestRun {
                stage: stage.stage,
                group,
                suite,
            }),
            Commands::TestSmoke(s) => TaskCommand::TestSmoke { stage: s.stage },
            Commands::Sync(s) => TaskCommand::Sync { stage: s.stage },
            Commands::Deploy(s) => TaskCommand::Deploy { stage: s.stage },
            Commands::Publish(s) => TaskCommand::Publish { stage: s.stage },
            Commands::ComposerInstall { stage, remote } => TaskCommand::ComposerInstall {
                stage: stage.stage,
                remote,
            },
            Commands::ComposerCommand { stage, command } => {
                TaskCommand::ComposerCommand { stage, command }
            }
            Commands::SshConnect(s) => TaskCommand::SshConnect { stage: s.stage },
            Commands::SshExec { stage, command } => TaskCommand::SshExec {
                stage: stage.stage,
                command,
            },
            Commands::View(s) => TaskCommand::View { stage: s.stage },
            Commands::Show { key } => TaskCommand::Show {
                key,
                format: if json {
                    ShowFormat::Json
                } else {
                    ShowFormat::Yaml
                },
            },
            Commands::Watch => return None,
        };
        Some(command)
    }
}
