//! JSON Event Sink
//!
//! Outputs loan events as NDJSON for automation consumption.

use crate::domain::ports::{LoanEvent, LoanEventSink};
use chrono::{SecondsFormat, Utc};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, mut event: serde_json::Value) {
        if let Some(object) = event.as_object_mut() {
            object.insert(
                "timestamp".to_string(),
                Utc::now()
                    .to_rfc3339_opts(SecondsFormat::Millis, true)
                    .into(),
            );
        }
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl LoanEventSink for JsonEventSink {
    fn on_event(&self, event: LoanEvent) {
        let json = match event {
            LoanEvent::Applied {
                loan_id,
                applicant_name,
                principal,
            } => {
                serde_json::json!({
                    "event": "applied",
                    "loan_id": loan_id,
                    "applicant_name": applicant_name,
                    "principal": principal,
                })
            }

            LoanEvent::Approved { loan_id, status } => {
                serde_json::json!({
                    "event": "approved",
                    "loan_id": loan_id,
                    "status": status.as_str(),
                })
            }

            LoanEvent::Repaid {
                loan_id,
                amount,
                outstanding,
            } => {
                serde_json::json!({
                    "event": "repaid",
                    "loan_id": loan_id,
                    "amount": amount,
                    "outstanding": outstanding,
                })
            }

            LoanEvent::Queried { loan_id } => {
                serde_json::json!({
                    "event": "queried",
                    "loan_id": loan_id,
                })
            }

            LoanEvent::Rejected {
                operation,
                loan_id,
                code,
                reason,
            } => {
                serde_json::json!({
                    "event": "rejected",
                    "operation": operation,
                    "loan_id": loan_id,
                    "code": code,
                    "reason": reason,
                })
            }

            LoanEvent::Committed { operation } => {
                serde_json::json!({
                    "event": "committed",
                    "operation": operation,
                })
            }
        };

        self.write_event(json);
    }
}
