//! System Process Runner
//!
//! Spawns real processes with `std::process::Command`. Remote commands are
//! wrapped into an `ssh` invocation first.

use std::process::{Command, Stdio};

use crate::domain::ports::{CommandSpec, ProcessError, ProcessOutput, ProcessRunner, RemoteTarget};
use crate::domain::services::remote_command;

/// Runs commands on this machine, streaming their output to the terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessRunner {
    /// Keep stdout clean for NDJSON by sending child output to stderr
    json: bool,
}

impl SystemProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn json(json: bool) -> Self {
        Self { json }
    }

    fn command(spec: &CommandSpec) -> Command {
        let mut cmd = Command::new(spec.program());
        cmd.args(spec.arguments());
        if let Some(dir) = spec.working_dir() {
            cmd.current_dir(dir);
        }
        for (key, value) in spec.env_vars() {
            cmd.env(key, value);
        }
        cmd
    }
}

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, spec: &CommandSpec) -> Result<ProcessOutput, ProcessError> {
        let mut cmd = Self::command(spec);
        let start_error = |e: std::io::Error| ProcessError {
            program: spec.program().to_string(),
            message: e.to_string(),
        };

        tracing::debug!(command = %spec, "spawning");

        if spec.is_captured() {
            let output = cmd.stderr(Stdio::inherit()).output().map_err(start_error)?;
            return Ok(ProcessOutput {
                code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            });
        }

        if spec.is_interactive() {
            cmd.stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit());
        } else if self.json {
            cmd.stdout(std::io::stderr()).stderr(Stdio::inherit());
        }

        let status = cmd.status().map_err(start_error)?;
        tracing::debug!(command = %spec, code = ?status.code(), "exited");

        Ok(ProcessOutput {
            code: status.code(),
            stdout: String::new(),
        })
    }

    fn run_remote(
        &self,
        remote: &RemoteTarget,
        spec: &CommandSpec,
    ) -> Result<ProcessOutput, ProcessError> {
        self.run(&remote_command(remote, spec))
    }
}
