//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! Global flags (--json, --verbose, --ledger, --config, --strict) are
//! inherited by all subcommands. Every run is one contract invocation.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::application::ContractFunction;
use crate::domain::value_objects::LoanStatus;

/// loan-ledger - loan lifecycle contract over a key/value ledger
#[derive(Parser, Debug)]
#[command(name = "loan-ledger")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Ledger file (overrides config and LOAN_LEDGER_PATH)
    #[arg(long, global = true, value_name = "PATH")]
    pub ledger: Option<PathBuf>,

    /// Config file to use instead of the discovered one
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable every contract policy guard
    #[arg(long, global = true)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open a new loan in the Applied state
    #[command(allow_negative_numbers = true)]
    Apply {
        /// Loan identifier (ledger key)
        loan_id: String,

        /// Applicant name
        applicant: String,

        /// Principal amount
        amount: f64,

        /// Loan term in months
        term_months: u32,

        /// Annual interest rate (e.g. 0.05)
        rate: f64,
    },

    /// Set the status of an existing loan
    Approve {
        /// Loan identifier
        loan_id: String,

        /// Status to record
        #[arg(long, default_value = "Approved")]
        status: LoanStatus,
    },

    /// Record a repayment against a loan
    #[command(allow_negative_numbers = true)]
    Repay {
        /// Loan identifier
        loan_id: String,

        /// Repayment amount
        amount: f64,
    },

    /// Show the stored record of a loan
    Query {
        /// Loan identifier
        loan_id: String,
    },

    /// Invoke a contract function by name with raw string arguments
    ///
    /// Global flags may follow the arguments. Put arguments that start with
    /// `-` (other than negative numbers) after `--`.
    #[command(allow_negative_numbers = true)]
    Invoke {
        /// ApplyForLoan, ApproveLoan, MakeRepayment or CheckLoanBalance
        function: String,

        /// Positional arguments, passed through unparsed
        args: Vec<String>,
    },
}

impl Commands {
    /// Contract function name and positional arguments for this command
    pub fn invocation(&self) -> (String, Vec<String>) {
        match self {
            Commands::Apply {
                loan_id,
                applicant,
                amount,
                term_months,
                rate,
            } => (
                ContractFunction::ApplyForLoan.name().to_string(),
                vec![
                    loan_id.clone(),
                    applicant.clone(),
                    amount.to_string(),
                    term_months.to_string(),
                    rate.to_string(),
                ],
            ),
            Commands::Approve { loan_id, status } => (
                ContractFunction::ApproveLoan.name().to_string(),
                vec![loan_id.clone(), status.as_str().to_string()],
            ),
            Commands::Repay { loan_id, amount } => (
                ContractFunction::MakeRepayment.name().to_string(),
                vec![loan_id.clone(), amount.to_string()],
            ),
            Commands::Query { loan_id } => (
                ContractFunction::CheckLoanBalance.name().to_string(),
                vec![loan_id.clone()],
            ),
            Commands::Invoke { function, args } => (function.clone(), args.clone()),
        }
    }
}
