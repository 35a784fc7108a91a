//! Event Sink Implementations
//!
//! Provides concrete implementations of TaskEventSink:
//! - JsonEventSink: NDJSON output for CI/automation
//! - ConsoleEventSink (presentation layer): Human-readable lines

mod json;

pub use json::JsonEventSink;
