//! Reusable fixtures.

use loan_ledger::LoanApplication;

pub const LOAN_ID: &str = "LN-1001";

/// CLI arguments applying for the standard test loan
pub const APPLY_ARGS: &[&str] = &["apply", LOAN_ID, "Alice", "1000", "12", "0.05"];

pub const STRICT_POLICY: &str = r#"
[policy]
strict_approval = true
reject_overpayment = true
reject_non_positive_repayment = true
"#;

pub fn application(loan_id: &str, principal: f64) -> LoanApplication {
    LoanApplication::new(loan_id, "Alice", principal, 12, 0.05)
}
