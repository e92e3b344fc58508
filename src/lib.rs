//! loan-ledger - loan lifecycle contract over a transactional key/value ledger
//!
//! Loans are opened, approved, repaid and queried through four contract
//! functions. Each loan is one JSON record stored under its loan id; every
//! invocation runs inside a ledger transaction that commits only when the
//! operation succeeds.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{evaluate, submit, ContractFunction, ContractRouter, LoanContract};
pub use config::Config;
pub use domain::entities::{LoanApplication, LoanRecord};
pub use domain::policies::ContractPolicy;
pub use domain::ports::{LedgerStub, LoanEvent, LoanEventSink, TransactionalLedger};
pub use domain::value_objects::LoanStatus;
pub use error::{LoanError, LoanResult};
pub use infrastructure::{FileLedger, MemoryLedger};
