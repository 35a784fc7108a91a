//! pap CLI - build and deploy PHP web applications
//!
//! Usage: pap [OPTIONS] <COMMAND>
//!
//! Commands are pipelines of tasks (`lint:check`, `deploy`, `publish`, ...);
//! run `pap --help` for the full list.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pap::presentation::{Cli, Invocation};

mod commands;

/// Environment variable overriding the log filter
const LOG_ENV: &str = "PAP_LOG";

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let invocation = Invocation::from(&cli);
    let dir = std::env::current_dir().context("cannot determine the working directory")?;

    let code = match cli.command.into_task(invocation.json) {
        Some(command) => commands::run::cmd_run(&command, &invocation, &dir)?,
        None => commands::watch::cmd_watch(&invocation, &dir)?,
    };
    Ok(ExitCode::from(code))
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "error",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}
