//! In-memory ledger
//!
//! Versioned world state with optimistic concurrency. Transactions read
//! through to committed state, buffer their writes, and are validated at
//! commit: if any key a transaction read has been committed by someone
//! else in the meantime, the commit fails with `StoreError::Conflict`.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::ports::{LedgerStub, StoreError, StoreResult, TransactionalLedger};

#[derive(Debug, Clone)]
struct Versioned {
    value: Vec<u8>,
    version: u64,
}

#[derive(Debug, Default)]
struct WorldState {
    entries: BTreeMap<String, Versioned>,
    /// Number of committed write transactions
    height: u64,
}

impl WorldState {
    fn version_of(&self, key: &str) -> Option<u64> {
        self.entries.get(key).map(|entry| entry.version)
    }
}

/// Shared in-memory ledger; clones share the same world state
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    state: Arc<Mutex<WorldState>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed values, for inspection
    pub fn snapshot(&self) -> BTreeMap<String, Vec<u8>> {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state
            .entries
            .iter()
            .map(|(key, entry)| (key.clone(), entry.value.clone()))
            .collect()
    }

    /// Number of committed write transactions
    pub fn height(&self) -> u64 {
        self.state.lock().map(|s| s.height).unwrap_or_default()
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, WorldState>> {
        lock_state(&self.state)
    }
}

fn lock_state(state: &Mutex<WorldState>) -> StoreResult<MutexGuard<'_, WorldState>> {
    state
        .lock()
        .map_err(|_| StoreError::Unavailable("world state lock poisoned".to_string()))
}

/// One transaction against a [`MemoryLedger`]
pub struct MemoryTransaction {
    state: Arc<Mutex<WorldState>>,
    /// Version first observed for each key read from committed state
    reads: RefCell<BTreeMap<String, Option<u64>>>,
    writes: BTreeMap<String, Vec<u8>>,
}

impl MemoryTransaction {
    /// Keys this transaction has staged writes for
    pub fn write_set(&self) -> impl Iterator<Item = &str> {
        self.writes.keys().map(String::as_str)
    }
}

impl LedgerStub for MemoryTransaction {
    fn get_state(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        if let Some(value) = self.writes.get(key) {
            return Ok(Some(value.clone()));
        }

        let state = lock_state(&self.state)?;
        let entry = state.entries.get(key);
        self.reads
            .borrow_mut()
            .entry(key.to_string())
            .or_insert_with(|| entry.map(|e| e.version));
        Ok(entry.map(|e| e.value.clone()))
    }

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> StoreResult<()> {
        if key.is_empty() {
            return Err(StoreError::Rejected {
                key: key.to_string(),
                reason: "key must not be empty".to_string(),
            });
        }
        self.writes.insert(key.to_string(), value);
        Ok(())
    }
}

impl TransactionalLedger for MemoryLedger {
    type Transaction = MemoryTransaction;

    fn begin(&self) -> StoreResult<MemoryTransaction> {
        Ok(MemoryTransaction {
            state: Arc::clone(&self.state),
            reads: RefCell::new(BTreeMap::new()),
            writes: BTreeMap::new(),
        })
    }

    fn commit(&self, tx: MemoryTransaction) -> StoreResult<()> {
        if !Arc::ptr_eq(&self.state, &tx.state) {
            return Err(StoreError::Unavailable(
                "transaction belongs to a different ledger".to_string(),
            ));
        }
        if tx.writes.is_empty() {
            return Ok(());
        }

        let mut state = self.lock()?;
        for (key, seen) in tx.reads.borrow().iter() {
            if state.version_of(key) != *seen {
                return Err(StoreError::Conflict { key: key.clone() });
            }
        }

        state.height += 1;
        let version = state.height;
        for (key, value) in tx.writes {
            state.entries.insert(key, Versioned { value, version });
        }
        Ok(())
    }
}
