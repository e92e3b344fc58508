//! Invocation runner
//!
//! Wraps one contract call in one ledger transaction. Writes become
//! visible only when the call succeeds and the ledger commits; a failed
//! call drops its transaction, so nothing it staged survives.

use crate::domain::ports::TransactionalLedger;
use crate::error::{LoanError, LoanResult};

/// Run `op` in a fresh transaction and commit it if `op` succeeds
pub fn submit<L, T, F>(ledger: &L, op: F) -> LoanResult<T>
where
    L: TransactionalLedger,
    F: FnOnce(&mut L::Transaction) -> LoanResult<T>,
{
    let mut tx = ledger.begin().map_err(LoanError::Begin)?;
    let value = op(&mut tx)?;
    ledger.commit(tx).map_err(LoanError::Commit)?;
    Ok(value)
}

/// Run `op` in a fresh transaction that is always discarded
pub fn evaluate<L, T, F>(ledger: &L, op: F) -> LoanResult<T>
where
    L: TransactionalLedger,
    F: FnOnce(&mut L::Transaction) -> LoanResult<T>,
{
    let mut tx = ledger.begin().map_err(LoanError::Begin)?;
    op(&mut tx)
}
