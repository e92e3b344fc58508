//! Event Sink Implementations
//!
//! Provides concrete implementations of LoanEventSink:
//! - JsonEventSink: NDJSON output for automation
//! - ConsoleEventSink: Human-readable diagnostics gated by verbosity

mod console;
mod json;

pub use console::ConsoleEventSink;
pub use json::JsonEventSink;
