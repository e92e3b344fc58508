//! Ledger port - abstraction over the platform's key-value world state
//!
//! The contract never opens or commits transactions itself. It receives a
//! transaction handle implementing [`LedgerStub`] and performs at most one
//! read and one write through it. Whoever owns the ledger decides whether
//! the handle's writes are committed (see [`TransactionalLedger`]).

/// Result type for ledger operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Ledger operation errors
#[derive(Debug)]
pub enum StoreError {
    /// The backing store could not be reached
    Unavailable(String),
    /// A key read by the transaction was changed by another transaction
    Conflict { key: String },
    /// Persisted world state failed its integrity checks
    Corrupted { message: String },
    /// The key or value is not acceptable to the store
    Rejected { key: String, reason: String },
    /// I/O error
    Io(std::io::Error),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Unavailable(msg) => write!(f, "ledger unavailable: {}", msg),
            StoreError::Conflict { key } => {
                write!(f, "read conflict on '{}': modified by a concurrent transaction", key)
            }
            StoreError::Corrupted { message } => write!(f, "world state corrupted: {}", message),
            StoreError::Rejected { key, reason } => write!(f, "key '{}' rejected: {}", key, reason),
            StoreError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(err) => Some(err),
            _ => None,
        }
    }
}

/// Keyed read/write capability of one transaction
///
/// Implementations:
/// - `MemoryTransaction` - optimistic, versioned in-memory world state
/// - `FileTransaction` - world state file under an exclusive lock
pub trait LedgerStub {
    /// Read the value stored under `key`; `Ok(None)` when absent
    fn get_state(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Stage `value` under `key`; visible to later reads in the same transaction
    fn put_state(&mut self, key: &str, value: Vec<u8>) -> StoreResult<()>;
}

impl<T: LedgerStub + ?Sized> LedgerStub for &mut T {
    fn get_state(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        (**self).get_state(key)
    }

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> StoreResult<()> {
        (**self).put_state(key, value)
    }
}

/// A ledger that hands out transactions and commits them atomically
///
/// Dropping a transaction without committing discards its writes.
pub trait TransactionalLedger {
    type Transaction: LedgerStub;

    /// Start a transaction
    fn begin(&self) -> StoreResult<Self::Transaction>;

    /// Make all writes of `tx` durable, or none of them
    fn commit(&self, tx: Self::Transaction) -> StoreResult<()>;
}
