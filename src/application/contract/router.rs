//! Function dispatcher
//!
//! Platforms invoke contracts by function name with string arguments.
//! The router parses those arguments into typed calls on [`LoanContract`]
//! and encodes the response payload.

use std::fmt;
use std::str::FromStr;

use crate::application::invocation::{evaluate, submit};
use crate::domain::entities::LoanApplication;
use crate::domain::ports::{LedgerStub, LoanEvent, TransactionalLedger};
use crate::domain::value_objects::LoanStatus;
use crate::error::{LoanError, LoanResult};

use super::use_case::{
    LoanContract, APPLY_FOR_LOAN, APPROVE_LOAN, CHECK_LOAN_BALANCE, MAKE_REPAYMENT,
};

/// Functions exposed to the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractFunction {
    ApplyForLoan,
    ApproveLoan,
    MakeRepayment,
    CheckLoanBalance,
}

impl ContractFunction {
    pub const ALL: [ContractFunction; 4] = [
        ContractFunction::ApplyForLoan,
        ContractFunction::ApproveLoan,
        ContractFunction::MakeRepayment,
        ContractFunction::CheckLoanBalance,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ContractFunction::ApplyForLoan => APPLY_FOR_LOAN,
            ContractFunction::ApproveLoan => APPROVE_LOAN,
            ContractFunction::MakeRepayment => MAKE_REPAYMENT,
            ContractFunction::CheckLoanBalance => CHECK_LOAN_BALANCE,
        }
    }

    /// Parameter names, in call order
    pub fn params(&self) -> &'static [&'static str] {
        match self {
            ContractFunction::ApplyForLoan => &[
                "loanID",
                "applicantName",
                "loanAmount",
                "termMonths",
                "interestRate",
            ],
            ContractFunction::ApproveLoan => &["loanID", "status"],
            ContractFunction::MakeRepayment => &["loanID", "repaymentAmount"],
            ContractFunction::CheckLoanBalance => &["loanID"],
        }
    }

    /// Read-only functions are evaluated, never committed
    pub fn is_read_only(&self) -> bool {
        matches!(self, ContractFunction::CheckLoanBalance)
    }
}

impl fmt::Display for ContractFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ContractFunction {
    type Err = LoanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContractFunction::ALL
            .into_iter()
            .find(|function| function.name() == s)
            .ok_or_else(|| LoanError::UnknownFunction {
                name: s.to_string(),
            })
    }
}

/// Name-based entry point over a [`LoanContract`]
pub struct ContractRouter {
    contract: LoanContract,
}

impl ContractRouter {
    pub fn new(contract: LoanContract) -> Self {
        Self { contract }
    }

    pub fn contract(&self) -> &LoanContract {
        &self.contract
    }

    /// Run `function` inside an existing transaction and return its payload
    ///
    /// The payload is the record JSON for `CheckLoanBalance` and empty for
    /// the state-changing functions.
    pub fn invoke<S>(&self, tx: &mut S, function: &str, args: &[String]) -> LoanResult<Vec<u8>>
    where
        S: LedgerStub + ?Sized,
    {
        let function: ContractFunction = function.parse()?;
        let args = Args::new(function, args)?;

        match function {
            ContractFunction::ApplyForLoan => {
                let application = LoanApplication::new(
                    args.text(0),
                    args.text(1),
                    args.number(2)?,
                    args.parse::<u32>(3)?,
                    args.number(4)?,
                );
                self.contract.apply_for_loan(tx, application)?;
                Ok(Vec::new())
            }
            ContractFunction::ApproveLoan => {
                let status: LoanStatus = args.text(1).parse()?;
                self.contract.approve_loan(tx, args.text(0), status)?;
                Ok(Vec::new())
            }
            ContractFunction::MakeRepayment => {
                let amount = args.number(1)?;
                self.contract.make_repayment(tx, args.text(0), amount)?;
                Ok(Vec::new())
            }
            ContractFunction::CheckLoanBalance => {
                let record = self.contract.check_loan_balance(&*tx, args.text(0))?;
                record.to_json()
            }
        }
    }

    /// Run `function` as its own invocation against `ledger`
    ///
    /// State-changing functions are committed only when they succeed;
    /// `CheckLoanBalance` is evaluated without committing.
    pub fn execute<L>(&self, ledger: &L, function: &str, args: &[String]) -> LoanResult<Vec<u8>>
    where
        L: TransactionalLedger,
    {
        let parsed: ContractFunction = function.parse()?;
        if parsed.is_read_only() {
            return evaluate(ledger, |tx| self.invoke(tx, function, args));
        }

        let payload = submit(ledger, |tx| self.invoke(tx, function, args))?;
        let events = self.contract.events();
        if events.wants_detailed_events() {
            events.on_event(LoanEvent::Committed {
                operation: parsed.name(),
            });
        }
        Ok(payload)
    }
}

/// Positional arguments checked against a function's arity
struct Args<'a> {
    function: ContractFunction,
    values: &'a [String],
}

impl<'a> Args<'a> {
    fn new(function: ContractFunction, values: &'a [String]) -> LoanResult<Self> {
        let expected = function.params().len();
        if values.len() != expected {
            return Err(LoanError::InvalidArguments {
                function: function.name(),
                message: format!(
                    "expected {} argument(s) ({}), got {}",
                    expected,
                    function.params().join(", "),
                    values.len()
                ),
            });
        }
        Ok(Self { function, values })
    }

    fn text(&self, index: usize) -> &'a str {
        &self.values[index]
    }

    fn number(&self, index: usize) -> LoanResult<f64> {
        self.parse::<f64>(index)
    }

    fn parse<T: FromStr>(&self, index: usize) -> LoanResult<T> {
        self.values[index]
            .trim()
            .parse()
            .map_err(|_| LoanError::InvalidArguments {
                function: self.function.name(),
                message: format!(
                    "{} must be a number, got '{}'",
                    self.function.params()[index],
                    self.values[index]
                ),
            })
    }
}
