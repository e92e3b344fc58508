//! Error types for the loan ledger
//!
//! Uses `thiserror` for library errors. Contract failures are returned
//! to the caller immediately; nothing here is retried or recovered.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::StoreError;
use crate::domain::value_objects::LoanStatus;

/// Result type alias for loan ledger operations
pub type LoanResult<T> = Result<T, LoanError>;

/// Main error type for contract operations
#[derive(Error, Debug)]
pub enum LoanError {
    /// No record stored under the loan id
    #[error("loan '{loan_id}' not found")]
    NotFound { loan_id: String },

    /// Apply on a loan id that already has a record
    #[error("loan application '{loan_id}' already exists")]
    AlreadyExists { loan_id: String },

    /// Approve on a record that is already approved
    #[error("loan application '{loan_id}' already approved")]
    AlreadyApproved { loan_id: String },

    /// Repay on a record with nothing outstanding
    #[error("loan '{loan_id}' already paid (outstanding {outstanding})")]
    AlreadyPaid { loan_id: String, outstanding: f64 },

    /// The ledger failed to read a key
    #[error("failed to read '{key}' from ledger: {source}")]
    LedgerRead {
        key: String,
        #[source]
        source: StoreError,
    },

    /// The ledger failed to write a key
    #[error("failed to write '{key}' to ledger: {source}")]
    LedgerWrite {
        key: String,
        #[source]
        source: StoreError,
    },

    /// Stored bytes do not parse as a loan record
    #[error("stored record '{key}' is malformed: {source}")]
    Deserialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A loan record could not be encoded
    #[error("failed to encode loan record: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Creation input violates the record's field constraints
    #[error("invalid loan application: {field} {reason}")]
    InvalidApplication { field: &'static str, reason: String },

    /// Repayment amount rejected
    #[error("invalid repayment amount {amount}: {reason}")]
    InvalidAmount { amount: f64, reason: &'static str },

    /// Repayment exceeds the outstanding balance
    #[error("repayment {amount} exceeds outstanding balance {outstanding} on loan '{loan_id}'")]
    Overpayment {
        loan_id: String,
        amount: f64,
        outstanding: f64,
    },

    /// Status text is not a known status
    #[error("unknown loan status '{value}' (expected Applied or Approved)")]
    InvalidStatus { value: String },

    /// Status change not permitted by the state machine
    #[error("cannot move loan '{loan_id}' from {from} to {to}")]
    InvalidTransition {
        loan_id: String,
        from: LoanStatus,
        to: LoanStatus,
    },

    /// The ledger could not start a transaction
    #[error("failed to begin transaction: {0}")]
    Begin(#[source] StoreError),

    /// The ledger refused to commit the transaction
    #[error("transaction commit failed: {0}")]
    Commit(#[source] StoreError),

    /// Dispatcher received a function name it does not know
    #[error("unknown contract function '{name}'")]
    UnknownFunction { name: String },

    /// Dispatcher arguments do not match the function signature
    #[error("invalid arguments for {function}: {message}")]
    InvalidArguments {
        function: &'static str,
        message: String,
    },

    /// Configuration file could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LoanError {
    /// Stable machine-readable code for JSON output
    pub fn code(&self) -> &'static str {
        match self {
            LoanError::NotFound { .. } => "NOT_FOUND",
            LoanError::AlreadyExists { .. } => "ALREADY_EXISTS",
            LoanError::AlreadyApproved { .. } => "ALREADY_APPROVED",
            LoanError::AlreadyPaid { .. } => "ALREADY_PAID",
            LoanError::LedgerRead { .. } => "LEDGER_READ_ERROR",
            LoanError::LedgerWrite { .. } => "LEDGER_WRITE_ERROR",
            LoanError::Deserialization { .. } => "DESERIALIZATION_ERROR",
            LoanError::Serialization(_) => "SERIALIZATION_ERROR",
            LoanError::InvalidApplication { .. } => "INVALID_APPLICATION",
            LoanError::InvalidAmount { .. } => "INVALID_AMOUNT",
            LoanError::Overpayment { .. } => "OVERPAYMENT",
            LoanError::InvalidStatus { .. } => "INVALID_STATUS",
            LoanError::InvalidTransition { .. } => "INVALID_TRANSITION",
            LoanError::Begin(_) => "BEGIN_FAILED",
            LoanError::Commit(_) => "COMMIT_FAILED",
            LoanError::UnknownFunction { .. } => "UNKNOWN_FUNCTION",
            LoanError::InvalidArguments { .. } => "INVALID_ARGUMENTS",
            LoanError::Config { .. } => "CONFIG_ERROR",
            LoanError::Io(_) => "IO_ERROR",
        }
    }

    /// Whether the failure is a rejected business rule rather than an
    /// infrastructure fault
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            LoanError::NotFound { .. }
                | LoanError::AlreadyExists { .. }
                | LoanError::AlreadyApproved { .. }
                | LoanError::AlreadyPaid { .. }
                | LoanError::InvalidApplication { .. }
                | LoanError::InvalidAmount { .. }
                | LoanError::Overpayment { .. }
                | LoanError::InvalidStatus { .. }
                | LoanError::InvalidTransition { .. }
        )
    }
}
