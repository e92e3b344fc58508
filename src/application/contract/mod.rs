//! Loan Contract Use Case
//!
//! Orchestrates the loan lifecycle against a ledger transaction.
//!
//! This module handles:
//! - Creating records for new applications
//! - Approving applied loans
//! - Recording repayments
//! - Answering balance queries
//! - Dispatching platform calls by function name

mod router;
mod use_case;

pub use router::{ContractFunction, ContractRouter};
pub use use_case::{
    read_record, require_record, LoanContract, APPLY_FOR_LOAN, APPROVE_LOAN, CHECK_LOAN_BALANCE,
    MAKE_REPAYMENT,
};
