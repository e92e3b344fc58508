//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `ledger/` - Ledger implementations (Memory, File)
//! - `events/` - Event sinks (Json, Console)

pub mod events;
pub mod ledger;

// Re-export for convenience
pub use events::{ConsoleEventSink, JsonEventSink};
pub use ledger::{FileLedger, MemoryLedger};
