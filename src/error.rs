use odra::prelude::*;
use core::fmt;

/// Errors raised by the mortgage ledger, the staking pool and the settlement token.
#[odra::odra_error]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LendingError {
    // 0
    InvalidAmount = 0,
    InvalidState = 1,
    AlreadyDistributed = 2,
    InsufficientShares = 3,
    InsufficientBalance = 4,

    // 5
    Unauthorized = 5,
    InvalidConfig = 6,
    MathOverflow = 7,
    InsufficientAllowance = 8,
}

impl LendingError {
    pub fn message(&self) -> &str {
        match self {
            LendingError::InvalidAmount => "Input amount is invalid",
            LendingError::InvalidState => "Mortgage does not exist or is not in the required state",
            LendingError::AlreadyDistributed => "Appreciation has already been distributed",
            LendingError::InsufficientShares => "Share balance is too small",
            LendingError::InsufficientBalance => "Settlement token balance is too small",
            LendingError::Unauthorized => "Caller is not allowed to perform this action",
            LendingError::InvalidConfig => "Input config value is invalid",
            LendingError::MathOverflow => "Math operation overflow",
            LendingError::InsufficientAllowance => "Settlement token allowance is too small",
        }
    }
}

impl fmt::Display for LendingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
