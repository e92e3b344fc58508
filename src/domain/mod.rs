//! Domain Layer
//!
//! The core of the loan ledger - pure business logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - The loan record and its transition rules
//! - `value_objects/` - Immutable value types (LoanStatus)
//! - `policies/` - Optional guards (ContractPolicy)
//! - `ports/` - Interface definitions for the ledger and diagnostics
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches storage directly
//! 2. **Explicit transactions** - Every ledger access goes through a handle passed in by the caller
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod policies;
pub mod ports;
pub mod value_objects;
