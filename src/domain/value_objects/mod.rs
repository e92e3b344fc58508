//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod loan_status;
mod state_hash;

pub use loan_status::LoanStatus;
pub use state_hash::StateHash;
