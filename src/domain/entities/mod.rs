//! Domain Entities
//!
//! Core domain entities that have identity and lifecycle.
//! - `LoanRecord` - One loan's full state, keyed by loan id

mod loan;

pub use loan::{validate_loan_id, LoanApplication, LoanRecord};
