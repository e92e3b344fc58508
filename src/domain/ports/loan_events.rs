//! Loan Event Port
//!
//! Provides an observable interface for contract invocations.
//! Enables console diagnostics, JSON event streams, and debugging.
//! Sinks never influence the outcome of an operation.

use crate::domain::value_objects::LoanStatus;

/// Event emitted during contract invocations
#[derive(Debug, Clone, PartialEq)]
pub enum LoanEvent {
    /// A new loan record was staged
    Applied {
        loan_id: String,
        applicant_name: String,
        principal: f64,
    },

    /// A status change was staged
    Approved { loan_id: String, status: LoanStatus },

    /// A repayment was staged
    Repaid {
        loan_id: String,
        amount: f64,
        outstanding: f64,
    },

    /// A record was read for a caller
    Queried { loan_id: String },

    /// An operation failed; nothing was written
    Rejected {
        operation: &'static str,
        loan_id: String,
        code: &'static str,
        reason: String,
    },

    /// The ledger committed the invocation's writes
    Committed { operation: &'static str },
}

impl LoanEvent {
    /// Detail events are per-record traffic; summary events are outcomes
    pub fn is_detail(&self) -> bool {
        matches!(self, LoanEvent::Queried { .. } | LoanEvent::Committed { .. })
    }
}

/// Trait for receiving loan events
///
/// Implementations can be:
/// - ConsoleEventSink: Human-readable lines on stderr
/// - JsonEventSink: NDJSON event stream for automation
/// - NoopEventSink: Silent operation
pub trait LoanEventSink: Send + Sync {
    /// Handle a loan event
    fn on_event(&self, event: LoanEvent);

    /// Check if this sink wants detail events (queries, commits)
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl LoanEventSink for NoopEventSink {
    fn on_event(&self, _event: LoanEvent) {}

    fn wants_detailed_events(&self) -> bool {
        false
    }
}
