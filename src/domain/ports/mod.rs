//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod ledger_stub;
pub mod loan_events;

pub use ledger_stub::{LedgerStub, StoreError, StoreResult, TransactionalLedger};
pub use loan_events::{LoanEvent, LoanEventSink, NoopEventSink};
