//! Fixed-point math used by the ledger and the pool.

pub mod common;
pub mod decimal;
pub mod rate;

pub use common::{TryAdd, TryDiv, TryMul, TrySub};
pub use decimal::Decimal;
pub use rate::Rate;

use crate::error::LendingError;
use odra::casper_types::U256;

/// Computes `value * numerator / denominator` rounding down, without losing
/// precision in the intermediate product.
pub fn mul_div_floor(value: U256, numerator: U256, denominator: U256) -> Result<U256, LendingError> {
    value
        .checked_mul(numerator)
        .ok_or(LendingError::MathOverflow)?
        .checked_div(denominator)
        .ok_or(LendingError::MathOverflow)
}

/// Applies a basis-point ratio to an amount, rounding down.
pub fn apply_bps(amount: U256, bps: u32) -> Result<U256, LendingError> {
    mul_div_floor(amount, U256::from(bps), U256::from(common::BPS_DENOMINATOR))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn mul_div_floors() {
        let result = mul_div_floor(U256::from(10u64), U256::from(2u64), U256::from(3u64));
        assert_eq!(result, Ok(U256::from(6u64)));
    }

    #[test]
    fn mul_div_rejects_zero_denominator() {
        let result = mul_div_floor(U256::one(), U256::one(), U256::zero());
        assert_eq!(result, Err(LendingError::MathOverflow));
    }

    #[test]
    fn bps_of_price() {
        let price = U256::from(150_000u64);
        assert_eq!(apply_bps(price, 2_000), Ok(U256::from(30_000u64)));
        assert_eq!(apply_bps(price, 300), Ok(U256::from(4_500u64)));
    }
}
