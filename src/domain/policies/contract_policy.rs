//! Contract Policy
//!
//! Optional guards layered on top of the core transition rules. Every flag
//! defaults to off, which reproduces the ledger's historical behavior:
//! approval writes the requested status verbatim, and repayments may be
//! zero, negative, or larger than the outstanding balance.

use serde::{Deserialize, Serialize};

use crate::domain::entities::LoanRecord;
use crate::domain::value_objects::LoanStatus;
use crate::error::{LoanError, LoanResult};

/// Guards applied by the contract in addition to the core rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ContractPolicy {
    /// Only accept `Approved` as the target of an approval
    #[serde(default)]
    pub strict_approval: bool,

    /// Reject repayments larger than the outstanding balance
    #[serde(default)]
    pub reject_overpayment: bool,

    /// Reject zero and negative repayments
    #[serde(default)]
    pub reject_non_positive_repayment: bool,
}

impl ContractPolicy {
    /// Policy with every guard enabled
    pub fn strict() -> Self {
        Self {
            strict_approval: true,
            reject_overpayment: true,
            reject_non_positive_repayment: true,
        }
    }

    /// Check a requested status change. Runs after the core
    /// already-approved rule.
    pub fn check_approval(&self, record: &LoanRecord, requested: LoanStatus) -> LoanResult<()> {
        if self.strict_approval && !record.status().can_transition_to(requested) {
            return Err(LoanError::InvalidTransition {
                loan_id: record.loan_id().to_string(),
                from: record.status(),
                to: requested,
            });
        }
        Ok(())
    }

    /// Check a repayment amount. Runs after the core already-paid rule.
    pub fn check_repayment(&self, record: &LoanRecord, amount: f64) -> LoanResult<()> {
        if self.reject_non_positive_repayment && amount <= 0.0 {
            return Err(LoanError::InvalidAmount {
                amount,
                reason: "repayment must be positive",
            });
        }
        if self.reject_overpayment && amount > record.outstanding() {
            return Err(LoanError::Overpayment {
                loan_id: record.loan_id().to_string(),
                amount,
                outstanding: record.outstanding(),
            });
        }
        Ok(())
    }
}
