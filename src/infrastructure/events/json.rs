//! JSON Event Sink
//!
//! Outputs task events as NDJSON for CI/automation consumption.

use crate::domain::ports::{TaskEvent, TaskEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Create a JSON event sink writing to a custom writer (for testing)
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl TaskEventSink for JsonEventSink {
    fn on_event(&self, event: TaskEvent) {
        let json = match event {
            TaskEvent::StepStarted { command, step } => {
                serde_json::json!({
                    "event": "step_start",
                    "command": command,
                    "step": step,
                })
            }

            TaskEvent::StepFinished {
                command,
                step,
                outcome,
            } => {
                let mut json = serde_json::json!({
                    "event": "step_complete",
                    "command": command,
                    "step": step,
                });
                if let (Some(object), Ok(serde_json::Value::Object(fields))) =
                    (json.as_object_mut(), serde_json::to_value(&outcome))
                {
                    object.extend(fields);
                }
                json
            }

            TaskEvent::Message { level, text } => {
                serde_json::json!({
                    "event": "message",
                    "level": level.as_str(),
                    "text": text,
                })
            }

            TaskEvent::Output { text } => {
                serde_json::json!({
                    "event": "output",
                    "text": text,
                })
            }

            TaskEvent::Exec { command, remote } => {
                serde_json::json!({
                    "event": "exec",
                    "command": command,
                    "remote": remote,
                })
            }
        };

        self.write_event(json);
    }
}
