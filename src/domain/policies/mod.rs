//! Domain Policies
//!
//! Business rules that can be tightened by configuration.
//! These are pure functions that operate on domain entities.

mod contract_policy;

pub use contract_policy::ContractPolicy;
