//! Lifecycle contracts (LIFE-001 through LIFE-006)
//!
//! Every contract runs against both bundled ledgers, so the rules hold
//! regardless of where the world state lives.

use crate::common::*;
use loan_ledger::{
    ContractPolicy, ContractRouter, FileLedger, LoanContract, LoanError, LoanRecord, LoanStatus,
    MemoryLedger, TransactionalLedger,
};

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn router() -> ContractRouter {
    ContractRouter::new(LoanContract::default())
}

fn apply<L: TransactionalLedger>(ledger: &L, loan_id: &str, principal: &str) {
    router()
        .execute(
            ledger,
            "ApplyForLoan",
            &args(&[loan_id, "Alice", principal, "12", "0.05"]),
        )
        .unwrap();
}

fn query<L: TransactionalLedger>(ledger: &L, loan_id: &str) -> Result<LoanRecord, LoanError> {
    let payload = router().execute(ledger, "CheckLoanBalance", &args(&[loan_id]))?;
    LoanRecord::from_json(loan_id, &payload)
}

// Runs the body once over a fresh memory ledger and once over a file ledger
macro_rules! on_each_ledger {
    ($name:ident, |$ledger:ident| $body:block) => {
        mod $name {
            use super::*;

            #[test]
            fn memory() {
                let $ledger = MemoryLedger::new();
                $body
            }

            #[test]
            fn file() {
                let dir = tempfile::tempdir().unwrap();
                let $ledger = FileLedger::new(dir.path().join("world-state.json"));
                $body
            }
        }
    };
}

// CONTRACT LIFE-001: a new loan starts Applied with the full principal outstanding
on_each_ledger!(contract_apply_opens_loan, |ledger| {
    apply(&ledger, LOAN_ID, "1000");

    let record = query(&ledger, LOAN_ID).unwrap();
    assert_eq!(record.outstanding(), 1000.0);
    assert_eq!(record.principal(), 1000.0);
    assert_eq!(record.status(), LoanStatus::Applied);
    assert!(record.repayments().is_empty());
});

// CONTRACT LIFE-002: a loan id is used once; the first record survives
on_each_ledger!(contract_apply_twice_keeps_first, |ledger| {
    apply(&ledger, LOAN_ID, "1000");

    let err = router()
        .execute(
            &ledger,
            "ApplyForLoan",
            &args(&[LOAN_ID, "Mallory", "5", "1", "0.9"]),
        )
        .unwrap_err();
    assert!(matches!(err, LoanError::AlreadyExists { .. }));

    let record = query(&ledger, LOAN_ID).unwrap();
    assert_eq!(record.applicant_name(), "Alice");
    assert_eq!(record.principal(), 1000.0);
});

// CONTRACT LIFE-003: approval is refused for unknown loans and after approval
on_each_ledger!(contract_approval_rules, |ledger| {
    let err = router()
        .execute(&ledger, "ApproveLoan", &args(&["missing", "Approved"]))
        .unwrap_err();
    assert!(matches!(err, LoanError::NotFound { .. }));

    apply(&ledger, LOAN_ID, "1000");
    router()
        .execute(&ledger, "ApproveLoan", &args(&[LOAN_ID, "Approved"]))
        .unwrap();
    let err = router()
        .execute(&ledger, "ApproveLoan", &args(&[LOAN_ID, "Applied"]))
        .unwrap_err();
    assert!(matches!(err, LoanError::AlreadyApproved { .. }));

    assert_eq!(query(&ledger, LOAN_ID).unwrap().status(), LoanStatus::Approved);
});

// CONTRACT LIFE-004: repayments reduce outstanding and may overshoot by default
on_each_ledger!(contract_repayment_accounting, |ledger| {
    apply(&ledger, LOAN_ID, "500");

    router()
        .execute(&ledger, "MakeRepayment", &args(&[LOAN_ID, "100"]))
        .unwrap();
    let record = query(&ledger, LOAN_ID).unwrap();
    assert_eq!(record.outstanding(), 400.0);
    assert_eq!(record.repayments(), &[100.0]);

    router()
        .execute(&ledger, "MakeRepayment", &args(&[LOAN_ID, "450"]))
        .unwrap();
    let record = query(&ledger, LOAN_ID).unwrap();
    assert_eq!(record.outstanding(), -50.0);
    assert_eq!(record.repayments(), &[100.0, 450.0]);
});

// CONTRACT LIFE-005: a paid-off loan refuses further repayments
on_each_ledger!(contract_paid_loan_rejects_repayment, |ledger| {
    apply(&ledger, LOAN_ID, "300");
    router()
        .execute(&ledger, "MakeRepayment", &args(&[LOAN_ID, "300"]))
        .unwrap();

    let err = router()
        .execute(&ledger, "MakeRepayment", &args(&[LOAN_ID, "1"]))
        .unwrap_err();
    assert!(matches!(err, LoanError::AlreadyPaid { .. }));

    let record = query(&ledger, LOAN_ID).unwrap();
    assert_eq!(record.repayments(), &[300.0]);
    assert!(record.is_settled());
});

// CONTRACT LIFE-006: the documented end-to-end scenario
on_each_ledger!(contract_reference_scenario, |ledger| {
    apply(&ledger, "L1", "1000");

    let record = query(&ledger, "L1").unwrap();
    assert_eq!(record.outstanding(), 1000.0);
    assert_eq!(record.status(), LoanStatus::Applied);

    router()
        .execute(&ledger, "ApproveLoan", &args(&["L1", "Approved"]))
        .unwrap();
    router()
        .execute(&ledger, "MakeRepayment", &args(&["L1", "200"]))
        .unwrap();

    let record = query(&ledger, "L1").unwrap();
    assert_eq!(record.outstanding(), 800.0);
    assert_eq!(record.status(), LoanStatus::Approved);
    assert_eq!(record.repayments(), &[200.0]);
});

// CONTRACT LIFE-007: strict policy guards apply through the same entry point
on_each_ledger!(contract_strict_policy, |ledger| {
    let strict = ContractRouter::new(LoanContract::new(
        ContractPolicy::strict(),
        std::sync::Arc::new(loan_ledger::domain::ports::NoopEventSink),
    ));
    apply(&ledger, LOAN_ID, "100");

    let err = strict
        .execute(&ledger, "ApproveLoan", &args(&[LOAN_ID, "Applied"]))
        .unwrap_err();
    assert!(matches!(err, LoanError::InvalidTransition { .. }));

    let err = strict
        .execute(&ledger, "MakeRepayment", &args(&[LOAN_ID, "150"]))
        .unwrap_err();
    assert!(matches!(err, LoanError::Overpayment { .. }));

    let err = strict
        .execute(&ledger, "MakeRepayment", &args(&[LOAN_ID, "0"]))
        .unwrap_err();
    assert!(matches!(err, LoanError::InvalidAmount { .. }));

    assert_eq!(query(&ledger, LOAN_ID).unwrap().outstanding(), 100.0);
});
