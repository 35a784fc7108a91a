//! Task Context
//!
//! Everything a task needs: the loaded configuration and the ports it talks
//! to the outside world through. Built once in the presentation layer and
//! passed by reference into every step.

use std::sync::Arc;

use crate::config::{Config, StageConfig};
use crate::domain::ports::{
    BranchSource, Clock, CommandSpec, Confirm, HttpProbe, LockRepository, MessageLevel,
    ProcessOutput, ProcessRunner, RemoteTarget, TaskEvent, TaskEventSink,
};
use crate::domain::value_objects::StepOutcome;
use crate::error::{PapError, PapResult};

/// Port implementations used by the tasks
#[derive(Clone)]
pub struct Ports {
    pub runner: Arc<dyn ProcessRunner>,
    pub confirm: Arc<dyn Confirm>,
    pub locks: Arc<dyn LockRepository>,
    pub http: Arc<dyn HttpProbe>,
    pub branch: Arc<dyn BranchSource>,
    pub clock: Arc<dyn Clock>,
    pub events: Arc<dyn TaskEventSink>,
}

/// Shared state for one CLI invocation
#[derive(Clone)]
pub struct TaskContext {
    config: Arc<Config>,
    ports: Ports,
}

impl TaskContext {
    pub fn new(config: Config, ports: Ports) -> Self {
        Self {
            config: Arc::new(config),
            ports,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn ports(&self) -> &Ports {
        &self.ports
    }

    /// Stage by name; a missing stage is a soft "not configured" error
    pub fn require_stage(&self, name: &str) -> PapResult<&StageConfig> {
        self.config
            .stage(name)
            .ok_or_else(|| PapError::NotConfigured("Stage".to_string()))
    }

    pub fn emit(&self, event: TaskEvent) {
        self.ports.events.on_event(event);
    }

    pub fn message(&self, level: MessageLevel, text: impl Into<String>) {
        self.emit(TaskEvent::Message {
            level,
            text: text.into(),
        });
    }

    pub fn say(&self, text: impl Into<String>) {
        self.message(MessageLevel::Say, text);
    }

    pub fn note(&self, text: impl Into<String>) {
        self.message(MessageLevel::Note, text);
    }

    pub fn warn(&self, text: impl Into<String>) {
        self.message(MessageLevel::Warning, text);
    }

    pub fn success(&self, text: impl Into<String>) {
        self.message(MessageLevel::Success, text);
    }

    /// Report "nothing to do" and finish the step
    pub fn skip(&self, text: impl Into<String>) -> PapResult<StepOutcome> {
        let text = text.into();
        self.note(text.clone());
        Ok(StepOutcome::Skipped(text))
    }

    /// Run a local process; a non-zero exit becomes `ExternalToolFailure`
    pub fn exec(&self, spec: &CommandSpec) -> PapResult<ProcessOutput> {
        self.emit(TaskEvent::Exec {
            command: spec.display_line(),
            remote: None,
        });
        let output = self.ports.runner.run(spec).map_err(|e| PapError::Spawn {
            tool: e.program,
            message: e.message,
        })?;
        check_exit(spec, output)
    }

    /// Run a process on the stage host
    pub fn exec_remote(
        &self,
        remote: &RemoteTarget,
        spec: &CommandSpec,
    ) -> PapResult<ProcessOutput> {
        self.emit(TaskEvent::Exec {
            command: spec.display_line(),
            remote: Some(remote.destination()),
        });
        let output = self
            .ports
            .runner
            .run_remote(remote, spec)
            .map_err(|e| PapError::Spawn {
                tool: e.program,
                message: e.message,
            })?;
        check_exit(spec, output)
    }

    /// Run configured shell scripts one after another in `dir`
    /// (the repository root by default), stopping at the first failure.
    pub fn run_scripts(&self, scripts: &[String], dir: Option<&str>) -> PapResult<()> {
        let dir = dir
            .map(str::to_string)
            .unwrap_or_else(|| self.config.repository_path().to_string());
        for script in scripts {
            self.exec(&CommandSpec::shell(script.as_str()).current_dir(&dir))?;
        }
        Ok(())
    }

    /// Current branch as reported by the branch source
    pub fn current_branch(&self) -> String {
        self.ports.branch.current_branch()
    }

    pub fn now(&self) -> i64 {
        self.ports.clock.now()
    }
}

fn check_exit(spec: &CommandSpec, output: ProcessOutput) -> PapResult<ProcessOutput> {
    if output.is_success() {
        Ok(output)
    } else {
        Err(PapError::ExternalToolFailure {
            tool: spec.program().to_string(),
            code: output.code,
        })
    }
}
