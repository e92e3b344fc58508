//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, policies, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `LoanContract` - Apply, approve, repay and query against one transaction
//! - `ContractRouter` - Name-based dispatch of platform calls
//! - `submit` / `evaluate` - One invocation, one transaction

pub mod contract;
pub mod invocation;

pub use contract::{ContractFunction, ContractRouter, LoanContract};
pub use invocation::{evaluate, submit};
