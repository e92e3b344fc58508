//! Ledger Implementations
//!
//! Concrete implementations of the ledger port:
//! - MemoryLedger: versioned in-memory world state with optimistic commits
//! - FileLedger: JSON world-state file guarded by an exclusive lock

mod file;
mod memory;

pub use file::{FileLedger, FileTransaction, FORMAT_VERSION};
pub use memory::{MemoryLedger, MemoryTransaction};
