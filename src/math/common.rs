//! Shared scalers and checked-arithmetic traits for `Decimal` and `Rate`.

use crate::error::LendingError;

/// Decimal places of a WAD
pub const SCALE: usize = 18;
/// 1.0 as a WAD
pub const WAD: u64 = 1_000_000_000_000_000_000;
/// 0.5 as a WAD, used for half-up rounding
pub const HALF_WAD: u64 = 500_000_000_000_000_000;
/// One basis point as a WAD
pub const BPS_SCALER: u64 = 100_000_000_000_000;
/// Basis points in one whole
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Checked subtraction; underflow is `MathOverflow`
pub trait TrySub: Sized {
    fn try_sub(self, rhs: Self) -> Result<Self, LendingError>;
}

/// Checked addition
pub trait TryAdd: Sized {
    fn try_add(self, rhs: Self) -> Result<Self, LendingError>;
}

/// Checked division; a zero divisor is an error too
pub trait TryDiv<RHS>: Sized {
    fn try_div(self, rhs: RHS) -> Result<Self, LendingError>;
}

/// Checked multiplication
pub trait TryMul<RHS>: Sized {
    fn try_mul(self, rhs: RHS) -> Result<Self, LendingError>;
}
