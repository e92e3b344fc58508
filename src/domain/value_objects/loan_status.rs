//! Loan Status Value Object
//!
//! The lifecycle stage of a loan record. The set is closed: anything other
//! than the variants below is rejected, both when decoding a stored record
//! and when parsing caller input.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LoanError;

/// Loan lifecycle status
///
/// The only forward edge is `Applied -> Approved`. There is no
/// closed/paid-off variant; settlement is derived from the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LoanStatus {
    /// Application recorded, awaiting approval
    #[default]
    Applied,
    /// Approved; no transition leaves this state
    Approved,
}

impl LoanStatus {
    pub const ALL: [LoanStatus; 2] = [LoanStatus::Applied, LoanStatus::Approved];

    /// Wire/display name
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Applied => "Applied",
            LoanStatus::Approved => "Approved",
        }
    }

    /// Whether the state machine has an edge from `self` to `next`
    pub fn can_transition_to(&self, next: LoanStatus) -> bool {
        matches!((self, next), (LoanStatus::Applied, LoanStatus::Approved))
    }

    pub fn is_approved(&self) -> bool {
        *self == LoanStatus::Approved
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoanStatus {
    type Err = LoanError;

    /// Case-insensitive, so CLI users can type `approved`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "applied" => Ok(LoanStatus::Applied),
            "approved" => Ok(LoanStatus::Approved),
            _ => Err(LoanError::InvalidStatus {
                value: s.to_string(),
            }),
        }
    }
}
