//! Console Event Sink
//!
//! Human-readable diagnostic lines, filtered by verbosity. Writes to
//! stderr so that command output on stdout stays clean.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::config::Verbosity;
use crate::domain::ports::{LoanEvent, LoanEventSink};

pub struct ConsoleEventSink {
    verbosity: Verbosity,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleEventSink {
    pub fn stderr(verbosity: Verbosity) -> Self {
        Self::with_writer(verbosity, io::stderr())
    }

    pub fn with_writer<W: Write + Send + 'static>(verbosity: Verbosity, writer: W) -> Self {
        Self {
            verbosity,
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn accepts(&self, event: &LoanEvent) -> bool {
        match self.verbosity {
            Verbosity::Quiet | Verbosity::Normal => false,
            Verbosity::Verbose => !event.is_detail(),
            Verbosity::Debug => true,
        }
    }
}

fn render(event: &LoanEvent) -> String {
    match event {
        LoanEvent::Applied {
            loan_id,
            applicant_name,
            principal,
        } => format!("[applied] {loan_id}: {applicant_name}, principal {principal}"),
        LoanEvent::Approved { loan_id, status } => format!("[approved] {loan_id}: status {status}"),
        LoanEvent::Repaid {
            loan_id,
            amount,
            outstanding,
        } => format!("[repaid] {loan_id}: {amount} (outstanding {outstanding})"),
        LoanEvent::Queried { loan_id } => format!("[queried] {loan_id}"),
        LoanEvent::Rejected {
            operation,
            loan_id,
            code,
            reason,
        } => format!("[rejected] {operation} {loan_id}: {code} {reason}"),
        LoanEvent::Committed { operation } => format!("[committed] {operation}"),
    }
}

impl LoanEventSink for ConsoleEventSink {
    fn on_event(&self, event: LoanEvent) {
        if !self.accepts(&event) {
            return;
        }
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", render(&event));
        }
    }

    fn wants_detailed_events(&self) -> bool {
        self.verbosity == Verbosity::Debug
    }
}
