//! Process Runner Port
//!
//! Every external tool (composer, rsync, ssh, npm, test runners, lint
//! scripts) is invoked through this trait. The system implementation spawns
//! real processes; tests use an in-memory fake that records calls.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Description of a process to run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
    env: Vec<(String, String)>,
    interactive: bool,
    capture: bool,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Default::default()
        }
    }

    /// A command line interpreted by the platform shell
    pub fn shell(script: impl Into<String>) -> Self {
        if cfg!(windows) {
            Self::new("cmd").arg("/C").arg(script)
        } else {
            Self::new("sh").arg("-c").arg(script)
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Attach the process to the operator's terminal (ssh sessions)
    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }

    /// Capture stdout instead of streaming it
    pub fn captured(mut self) -> Self {
        self.capture = true;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    pub fn env_vars(&self) -> &[(String, String)] {
        &self.env
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn is_captured(&self) -> bool {
        self.capture
    }

    /// The script of a `CommandSpec::shell` command, or the full command line
    pub fn display_line(&self) -> String {
        match self.args.as_slice() {
            [flag, script] if (self.program == "sh" && flag == "-c")
                || (self.program == "cmd" && flag == "/C") =>
            {
                script.clone()
            }
            _ => self.to_string(),
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " '{}'", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// SSH coordinates of a stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTarget {
    pub host: String,
    pub user: String,
    pub port: Option<u16>,
    pub working_dir: String,
}

impl RemoteTarget {
    /// `user@host`
    pub fn destination(&self) -> String {
        format!("{}@{}", self.user, self.host)
    }
}

/// Exit status and (optionally) captured stdout of a finished process
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessOutput {
    pub code: Option<i32>,
    pub stdout: String,
}

impl ProcessOutput {
    pub fn success() -> Self {
        Self {
            code: Some(0),
            stdout: String::new(),
        }
    }

    pub fn exit(code: i32) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

/// The process could not be started
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not start '{program}': {message}")]
pub struct ProcessError {
    pub program: String,
    pub message: String,
}

/// Capability to run external processes, locally or on a stage host.
pub trait ProcessRunner: Send + Sync {
    /// Run a local process and wait for it to exit
    fn run(&self, spec: &CommandSpec) -> Result<ProcessOutput, ProcessError>;

    /// Run `spec` on the remote host, inside its working directory
    fn run_remote(
        &self,
        remote: &RemoteTarget,
        spec: &CommandSpec,
    ) -> Result<ProcessOutput, ProcessError>;
}
