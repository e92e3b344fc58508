//! Loan Contract
//!
//! The four ledger operations. Each one reads the loan's record (if any),
//! validates the transition, and writes the updated record back through the
//! caller's transaction handle. Failures return before the write.

use std::sync::Arc;

use crate::domain::entities::{LoanApplication, LoanRecord};
use crate::domain::policies::ContractPolicy;
use crate::domain::ports::{LedgerStub, LoanEvent, LoanEventSink, NoopEventSink};
use crate::domain::value_objects::LoanStatus;
use crate::error::{LoanError, LoanResult};

pub const APPLY_FOR_LOAN: &str = "ApplyForLoan";
pub const APPROVE_LOAN: &str = "ApproveLoan";
pub const MAKE_REPAYMENT: &str = "MakeRepayment";
pub const CHECK_LOAN_BALANCE: &str = "CheckLoanBalance";

/// Loan contract - stateless apart from its policy and event sink
///
/// Holds no records between invocations; the ledger owns all state.
pub struct LoanContract {
    policy: ContractPolicy,
    events: Arc<dyn LoanEventSink>,
}

impl Default for LoanContract {
    fn default() -> Self {
        Self::new(ContractPolicy::default(), Arc::new(NoopEventSink))
    }
}

impl LoanContract {
    /// Create a contract with the given guards and event sink
    pub fn new(policy: ContractPolicy, events: Arc<dyn LoanEventSink>) -> Self {
        Self { policy, events }
    }

    pub fn policy(&self) -> &ContractPolicy {
        &self.policy
    }

    pub fn events(&self) -> &Arc<dyn LoanEventSink> {
        &self.events
    }

    /// Create a record for a new loan id
    pub fn apply_for_loan<S>(&self, tx: &mut S, application: LoanApplication) -> LoanResult<()>
    where
        S: LedgerStub + ?Sized,
    {
        let loan_id = application.loan_id.clone();
        let result = self.try_apply(tx, application);
        self.observe(APPLY_FOR_LOAN, &loan_id, result)
    }

    /// Change the status of an existing, not yet approved loan
    pub fn approve_loan<S>(&self, tx: &mut S, loan_id: &str, status: LoanStatus) -> LoanResult<()>
    where
        S: LedgerStub + ?Sized,
    {
        let result = self.try_approve(tx, loan_id, status);
        self.observe(APPROVE_LOAN, loan_id, result)
    }

    /// Record a repayment against an existing loan
    pub fn make_repayment<S>(&self, tx: &mut S, loan_id: &str, amount: f64) -> LoanResult<()>
    where
        S: LedgerStub + ?Sized,
    {
        let result = self.try_repay(tx, loan_id, amount);
        self.observe(MAKE_REPAYMENT, loan_id, result)
    }

    /// Read a loan's full record. Never writes.
    pub fn check_loan_balance<S>(&self, tx: &S, loan_id: &str) -> LoanResult<LoanRecord>
    where
        S: LedgerStub + ?Sized,
    {
        let result = require_record(tx, loan_id);
        if result.is_ok() && self.events.wants_detailed_events() {
            self.events.on_event(LoanEvent::Queried {
                loan_id: loan_id.to_string(),
            });
        }
        self.observe(CHECK_LOAN_BALANCE, loan_id, result)
    }

    fn try_apply<S>(&self, tx: &mut S, application: LoanApplication) -> LoanResult<()>
    where
        S: LedgerStub + ?Sized,
    {
        application.validate()?;
        if read_record(tx, &application.loan_id)?.is_some() {
            return Err(LoanError::AlreadyExists {
                loan_id: application.loan_id,
            });
        }

        let record = LoanRecord::open(application)?;
        write_record(tx, &record)?;

        self.events.on_event(LoanEvent::Applied {
            loan_id: record.loan_id().to_string(),
            applicant_name: record.applicant_name().to_string(),
            principal: record.principal(),
        });
        Ok(())
    }

    fn try_approve<S>(&self, tx: &mut S, loan_id: &str, status: LoanStatus) -> LoanResult<()>
    where
        S: LedgerStub + ?Sized,
    {
        let mut record = require_record(tx, loan_id)?;
        record.approve(status, &self.policy)?;
        write_record(tx, &record)?;

        self.events.on_event(LoanEvent::Approved {
            loan_id: loan_id.to_string(),
            status,
        });
        Ok(())
    }

    fn try_repay<S>(&self, tx: &mut S, loan_id: &str, amount: f64) -> LoanResult<()>
    where
        S: LedgerStub + ?Sized,
    {
        let mut record = require_record(tx, loan_id)?;
        record.apply_repayment(amount, &self.policy)?;
        write_record(tx, &record)?;

        self.events.on_event(LoanEvent::Repaid {
            loan_id: loan_id.to_string(),
            amount,
            outstanding: record.outstanding(),
        });
        Ok(())
    }

    /// Report a failure to the sink and hand the result back unchanged
    fn observe<T>(&self, operation: &'static str, loan_id: &str, result: LoanResult<T>) -> LoanResult<T> {
        if let Err(err) = &result {
            self.events.on_event(LoanEvent::Rejected {
                operation,
                loan_id: loan_id.to_string(),
                code: err.code(),
                reason: err.to_string(),
            });
        }
        result
    }
}

/// Load and decode the record under `loan_id`, if there is one
pub fn read_record<S>(tx: &S, loan_id: &str) -> LoanResult<Option<LoanRecord>>
where
    S: LedgerStub + ?Sized,
{
    let bytes = tx
        .get_state(loan_id)
        .map_err(|source| LoanError::LedgerRead {
            key: loan_id.to_string(),
            source,
        })?;

    bytes
        .map(|bytes| LoanRecord::from_json(loan_id, &bytes))
        .transpose()
}

/// Like [`read_record`], but absence is `NotFound`
pub fn require_record<S>(tx: &S, loan_id: &str) -> LoanResult<LoanRecord>
where
    S: LedgerStub + ?Sized,
{
    read_record(tx, loan_id)?.ok_or_else(|| LoanError::NotFound {
        loan_id: loan_id.to_string(),
    })
}

fn write_record<S>(tx: &mut S, record: &LoanRecord) -> LoanResult<()>
where
    S: LedgerStub + ?Sized,
{
    let bytes = record.to_json()?;
    tx.put_state(record.loan_id(), bytes)
        .map_err(|source| LoanError::LedgerWrite {
            key: record.loan_id().to_string(),
            source,
        })
}
