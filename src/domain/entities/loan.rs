//! Loan entity - the canonical record stored per loan id
//!
//! The record is a pure data structure plus the core transition rules.
//! Reading and writing it to the ledger is handled by the contract.

use serde::{Deserialize, Serialize};

use crate::domain::policies::ContractPolicy;
use crate::domain::value_objects::LoanStatus;
use crate::error::{LoanError, LoanResult};

/// Input for creating a new loan record
#[derive(Debug, Clone, PartialEq)]
pub struct LoanApplication {
    pub loan_id: String,
    pub applicant_name: String,
    pub principal: f64,
    pub term_months: u32,
    pub interest_rate: f64,
}

impl LoanApplication {
    pub fn new(
        loan_id: impl Into<String>,
        applicant_name: impl Into<String>,
        principal: f64,
        term_months: u32,
        interest_rate: f64,
    ) -> Self {
        Self {
            loan_id: loan_id.into(),
            applicant_name: applicant_name.into(),
            principal,
            term_months,
            interest_rate,
        }
    }

    /// Check the field constraints of a new record
    pub fn validate(&self) -> LoanResult<()> {
        validate_loan_id(&self.loan_id)?;
        if !self.principal.is_finite() || self.principal < 0.0 {
            return Err(invalid("loanAmount", "must be a finite, non-negative number"));
        }
        if self.term_months == 0 {
            return Err(invalid("termMonths", "must be at least 1"));
        }
        if !self.interest_rate.is_finite() || self.interest_rate < 0.0 {
            return Err(invalid("interestRate", "must be a finite, non-negative number"));
        }
        Ok(())
    }
}

/// Ledger keys must be non-empty and may not start with U+0000, which is
/// reserved for composite keys.
pub fn validate_loan_id(loan_id: &str) -> LoanResult<()> {
    if loan_id.is_empty() {
        return Err(invalid("loanID", "must not be empty"));
    }
    if loan_id.starts_with('\u{0}') {
        return Err(invalid("loanID", "must not start with U+0000"));
    }
    Ok(())
}

fn invalid(field: &'static str, reason: &str) -> LoanError {
    LoanError::InvalidApplication {
        field,
        reason: reason.to_string(),
    }
}

/// One loan's full state, as stored under its loan id
///
/// Identity and terms are fixed at creation. Only `status`, `outstanding`
/// and `repayments` change afterwards, and only through [`LoanRecord::approve`]
/// and [`LoanRecord::apply_repayment`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LoanRecord {
    #[serde(rename = "loanID")]
    loan_id: String,
    applicant_name: String,
    #[serde(rename = "loanAmount")]
    principal: f64,
    term_months: u32,
    interest_rate: f64,
    outstanding: f64,
    status: LoanStatus,
    repayments: Vec<f64>,
}

impl LoanRecord {
    /// Create the initial record for an application
    pub fn open(application: LoanApplication) -> LoanResult<Self> {
        application.validate()?;
        Ok(Self {
            loan_id: application.loan_id,
            applicant_name: application.applicant_name,
            principal: application.principal,
            term_months: application.term_months,
            interest_rate: application.interest_rate,
            outstanding: application.principal,
            status: LoanStatus::Applied,
            repayments: Vec::new(),
        })
    }

    /// Decode a stored record. `key` is only used for error context.
    pub fn from_json(key: &str, bytes: &[u8]) -> LoanResult<Self> {
        serde_json::from_slice(bytes).map_err(|source| LoanError::Deserialization {
            key: key.to_string(),
            source,
        })
    }

    /// Encode for storage
    pub fn to_json(&self) -> LoanResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(LoanError::Serialization)
    }

    /// Change the status. Rejected once the loan is approved.
    pub fn approve(&mut self, status: LoanStatus, policy: &ContractPolicy) -> LoanResult<()> {
        if self.status.is_approved() {
            return Err(LoanError::AlreadyApproved {
                loan_id: self.loan_id.clone(),
            });
        }
        policy.check_approval(self, status)?;
        self.status = status;
        Ok(())
    }

    /// Record a repayment against the outstanding balance
    pub fn apply_repayment(&mut self, amount: f64, policy: &ContractPolicy) -> LoanResult<()> {
        if self.outstanding <= 0.0 {
            return Err(LoanError::AlreadyPaid {
                loan_id: self.loan_id.clone(),
                outstanding: self.outstanding,
            });
        }
        if !amount.is_finite() {
            return Err(LoanError::InvalidAmount {
                amount,
                reason: "repayment must be a finite number",
            });
        }
        policy.check_repayment(self, amount)?;
        self.outstanding -= amount;
        self.repayments.push(amount);
        Ok(())
    }

    pub fn loan_id(&self) -> &str {
        &self.loan_id
    }

    pub fn applicant_name(&self) -> &str {
        &self.applicant_name
    }

    pub fn principal(&self) -> f64 {
        self.principal
    }

    pub fn term_months(&self) -> u32 {
        self.term_months
    }

    pub fn interest_rate(&self) -> f64 {
        self.interest_rate
    }

    pub fn outstanding(&self) -> f64 {
        self.outstanding
    }

    pub fn status(&self) -> LoanStatus {
        self.status
    }

    /// Repayments in the order they were made
    pub fn repayments(&self) -> &[f64] {
        &self.repayments
    }

    pub fn total_repaid(&self) -> f64 {
        self.repayments.iter().sum()
    }

    /// Nothing left to repay. Not a status: the record keeps its status.
    pub fn is_settled(&self) -> bool {
        self.outstanding <= 0.0
    }
}
