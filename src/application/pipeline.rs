//! Task Pipeline
//!
//! An ordered list of named steps executed fail-fast:
//!
//! ```text
//! Pending -> Running(0) -> Running(1) -> ... -> Succeeded
//!                 \             \
//!                  `-> Failed(i, reason)
//! ```
//!
//! A `Skipped` step counts as success. There are no retries and no rollback.

use crate::domain::ports::{MessageLevel, TaskEvent};
use crate::domain::value_objects::StepOutcome;
use crate::error::{PapError, PapResult};

use super::context::TaskContext;

type StepFn = Box<dyn Fn(&TaskContext) -> PapResult<StepOutcome> + Send + Sync>;

/// A named unit of work
pub struct Step {
    name: String,
    run: StepFn,
}

impl Step {
    pub fn new<F>(name: impl Into<String>, run: F) -> Self
    where
        F: Fn(&TaskContext) -> PapResult<StepOutcome> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            run: Box::new(run),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Where a pipeline currently stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineState {
    Pending,
    Running(usize),
    Failed { step: usize, reason: String },
    Succeeded,
}

/// Outcome of a pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    pub command: String,
    pub state: PipelineState,
    /// Outcome of every step that ran, in order
    pub steps: Vec<(String, StepOutcome)>,
}

impl PipelineReport {
    /// Failed if any step failed, Skipped if every step skipped
    pub fn outcome(&self) -> StepOutcome {
        if let PipelineState::Failed { reason, .. } = &self.state {
            return StepOutcome::Failed(reason.clone());
        }
        match self.steps.as_slice() {
            [] => StepOutcome::Success,
            steps if steps.iter().all(|(_, o)| o.is_skipped()) => steps[steps.len() - 1].1.clone(),
            _ => StepOutcome::Success,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.outcome().exit_code()
    }

    pub fn ran(&self, step: &str) -> bool {
        self.steps.iter().any(|(name, _)| name == step)
    }
}

/// Ordered steps of one command
pub struct Pipeline {
    command: String,
    steps: Vec<Step>,
}

impl Pipeline {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            steps: Vec::new(),
        }
    }

    pub fn step<F>(mut self, name: impl Into<String>, run: F) -> Self
    where
        F: Fn(&TaskContext) -> PapResult<StepOutcome> + Send + Sync + 'static,
    {
        self.steps.push(Step::new(name, run));
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(Step::name).collect()
    }

    /// Run the steps in order, stopping at the first failure
    pub fn run(&self, ctx: &TaskContext) -> PipelineReport {
        let mut report = PipelineReport {
            command: self.command.clone(),
            state: PipelineState::Pending,
            steps: Vec::with_capacity(self.steps.len()),
        };

        for (index, step) in self.steps.iter().enumerate() {
            report.state = PipelineState::Running(index);
            tracing::debug!(command = %self.command, step = %step.name, "step started");
            ctx.emit(TaskEvent::StepStarted {
                command: self.command.clone(),
                step: step.name.clone(),
            });

            let outcome = settle(ctx, (step.run)(ctx));

            ctx.emit(TaskEvent::StepFinished {
                command: self.command.clone(),
                step: step.name.clone(),
                outcome: outcome.clone(),
            });
            report.steps.push((step.name.clone(), outcome.clone()));

            if let StepOutcome::Failed(reason) = outcome {
                tracing::info!(
                    command = %self.command,
                    step = %step.name,
                    %reason,
                    "pipeline aborted"
                );
                report.state = PipelineState::Failed {
                    step: index,
                    reason,
                };
                return report;
            }
        }

        report.state = PipelineState::Succeeded;
        report
    }
}

/// Turn a step result into an outcome, reporting errors to the operator.
///
/// A step that returns `Ok(Failed)` has already explained itself (usually a
/// nested pipeline); only `Err` values are printed here.
fn settle(ctx: &TaskContext, result: PapResult<StepOutcome>) -> StepOutcome {
    match result {
        Ok(outcome) => outcome,
        Err(PapError::NotConfigured(what)) => {
            let text = format!("{} not configured", what);
            ctx.message(MessageLevel::Note, text.clone());
            StepOutcome::Skipped(text)
        }
        Err(err) => {
            if let PapError::Task { source, .. } = &err {
                tracing::debug!(cause = %source, "step failed");
            }
            let reason = err.to_string();
            ctx.message(MessageLevel::Error, reason.clone());
            StepOutcome::Failed(reason)
        }
    }
}
