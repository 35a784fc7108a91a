//! Task Event Port
//!
//! Everything the pipeline wants the operator to see goes through here:
//! messages, executed commands, step boundaries.

use crate::domain::value_objects::StepOutcome;

/// Severity of an operator message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Plain progress information
    Say,
    /// Informational, e.g. "nothing to do"
    Note,
    Warning,
    Error,
    Success,
}

impl MessageLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageLevel::Say => "say",
            MessageLevel::Note => "note",
            MessageLevel::Warning => "warning",
            MessageLevel::Error => "error",
            MessageLevel::Success => "success",
        }
    }
}

/// Event emitted while commands run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskEvent {
    /// A step of `command` is about to run
    StepStarted { command: String, step: String },

    /// A step finished
    StepFinished {
        command: String,
        step: String,
        outcome: StepOutcome,
    },

    /// A message for the operator
    Message { level: MessageLevel, text: String },

    /// Command output meant for stdout as-is (configuration dumps, tables)
    Output { text: String },

    /// An external process is about to be started
    Exec {
        command: String,
        remote: Option<String>,
    },
}

/// Trait for receiving task events
///
/// Implementations:
/// - `ConsoleEventSink`: Colored lines in the terminal
/// - `JsonEventSink`: NDJSON stream for CI
/// - `NoopEventSink`: Silent operation
pub trait TaskEventSink: Send + Sync {
    fn on_event(&self, event: TaskEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl TaskEventSink for NoopEventSink {
    fn on_event(&self, _event: TaskEvent) {}
}
