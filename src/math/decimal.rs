//! Large fixed-point decimal backed by `U256`, precise to 18 digits.

#![allow(clippy::manual_range_contains)]

use {
    crate::{
        error::LendingError,
        math::{common::*, Rate},
    },
    alloc::{string::ToString, vec},
    core::fmt,
    odra::casper_types::U256,
};

/// Large decimal values, precise to 18 digits
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Eq, Ord)]
pub struct Decimal(pub U256);

impl Decimal {
    /// One
    pub fn one() -> Self {
        Self(Self::wad())
    }

    fn wad() -> U256 {
        U256::from(WAD)
    }

    fn half_wad() -> U256 {
        U256::from(HALF_WAD)
    }

    /// Scale a raw token amount into a decimal
    pub fn from_amount(amount: U256) -> Result<Self, LendingError> {
        Ok(Self(
            amount
                .checked_mul(Self::wad())
                .ok_or(LendingError::MathOverflow)?,
        ))
    }

    /// Return raw scaled value
    pub fn to_scaled_val(&self) -> U256 {
        self.0
    }

    /// Create decimal from scaled value
    pub fn from_scaled_val(scaled_val: U256) -> Self {
        Self(scaled_val)
    }

    /// Round scaled decimal to a raw amount, half up
    pub fn try_round(&self) -> Result<U256, LendingError> {
        Self::half_wad()
            .checked_add(self.0)
            .ok_or(LendingError::MathOverflow)?
            .checked_div(Self::wad())
            .ok_or(LendingError::MathOverflow)
    }

    /// Ceiling scaled decimal to a raw amount
    pub fn try_ceil(&self) -> Result<U256, LendingError> {
        Self::wad()
            .checked_sub(U256::one())
            .ok_or(LendingError::MathOverflow)?
            .checked_add(self.0)
            .ok_or(LendingError::MathOverflow)?
            .checked_div(Self::wad())
            .ok_or(LendingError::MathOverflow)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut scaled_val = self.0.to_string();
        if scaled_val.len() <= SCALE {
            scaled_val.insert_str(0, &vec!["0"; SCALE - scaled_val.len()].join(""));
            scaled_val.insert_str(0, "0.");
        } else {
            scaled_val.insert(scaled_val.len() - SCALE, '.');
        }
        f.write_str(&scaled_val)
    }
}

impl From<u64> for Decimal {
    fn from(val: u64) -> Self {
        // u64::MAX * WAD fits comfortably in 256 bits
        Self(Self::wad() * U256::from(val))
    }
}

impl From<Rate> for Decimal {
    fn from(rate: Rate) -> Self {
        Self::from_scaled_val(rate.to_scaled_val())
    }
}

impl TryDiv<u64> for Decimal {
    fn try_div(self, rhs: u64) -> Result<Self, LendingError> {
        Ok(Self(
            self.0
                .checked_div(U256::from(rhs))
                .ok_or(LendingError::MathOverflow)?,
        ))
    }
}

impl TryDiv<Decimal> for Decimal {
    fn try_div(self, rhs: Self) -> Result<Self, LendingError> {
        Ok(Self(
            self.0
                .checked_mul(Self::wad())
                .ok_or(LendingError::MathOverflow)?
                .checked_div(rhs.0)
                .ok_or(LendingError::MathOverflow)?,
        ))
    }
}

impl TryMul<Decimal> for Decimal {
    fn try_mul(self, rhs: Self) -> Result<Self, LendingError> {
        Ok(Self(
            self.0
                .checked_mul(rhs.0)
                .ok_or(LendingError::MathOverflow)?
                .checked_div(Self::wad())
                .ok_or(LendingError::MathOverflow)?,
        ))
    }
}

impl TryMul<Rate> for Decimal {
    fn try_mul(self, rhs: Rate) -> Result<Self, LendingError> {
        self.try_mul(Decimal::from(rhs))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use alloc::format;

    #[test]
    fn test_scaler() {
        assert_eq!(U256::from(WAD), Decimal::wad());
    }

    #[test]
    fn rounding_modes() {
        let one_and_half = Decimal::from(3u64).try_div(2u64).unwrap();
        assert_eq!(one_and_half.try_round().unwrap(), U256::from(2u64));
        assert_eq!(one_and_half.try_ceil().unwrap(), U256::from(2u64));

        let exact = Decimal::from(7u64);
        assert_eq!(exact.try_ceil().unwrap(), U256::from(7u64));
    }

    #[test]
    fn divide_by_zero_is_overflow() {
        assert_eq!(
            Decimal::one().try_div(Decimal::default()),
            Err(LendingError::MathOverflow)
        );
    }

    #[test]
    fn display_pads_fraction() {
        let tenth = Decimal::one().try_div(10u64).unwrap();
        assert_eq!(format!("{}", tenth), "0.100000000000000000");
        assert_eq!(format!("{}", Decimal::from(11u64)), "11.000000000000000000");
    }
}
