//! Rate type for interest rate calculations using U256

use {
    crate::{
        error::LendingError,
        math::common::*,
    },
    alloc::{format, string::ToString},
    core::fmt,
    odra::casper_types::U256,
};

/// Interest rate as a scaled value
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Eq, Ord)]
pub struct Rate(pub U256);

impl Rate {
    /// One (100%)
    pub fn one() -> Self {
        Self(Self::wad())
    }

    /// Zero (0%)
    pub fn zero() -> Self {
        Self(U256::zero())
    }

    fn wad() -> U256 {
        U256::from(WAD)
    }

    /// Create rate from basis points (10000 = 100%)
    pub fn from_bps(bps: u32) -> Self {
        Self(U256::from(bps as u64 * BPS_SCALER))
    }

    /// Monthly rate of an annual rate quoted in basis points
    pub fn monthly_from_annual_bps(annual_bps: u32) -> Result<Self, LendingError> {
        Self::from_bps(annual_bps).try_div(12u64)
    }

    /// Return raw scaled value
    pub fn to_scaled_val(&self) -> U256 {
        self.0
    }

    /// Calculate power (for compound interest)
    pub fn try_pow(&self, exponent: u64) -> Result<Self, LendingError> {
        if exponent == 0 {
            return Ok(Self::one());
        }

        let mut result = Self::one();
        let mut base = *self;
        let mut exp = exponent;

        while exp > 0 {
            if exp % 2 == 1 {
                result = result.try_mul(base)?;
            }
            exp /= 2;
            if exp > 0 {
                base = base.try_mul(base)?;
            }
        }

        Ok(result)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut scaled_val = self.0.to_string();
        if scaled_val.len() <= SCALE {
            let padding = "0".repeat(SCALE - scaled_val.len());
            scaled_val = format!("0.{}{}", padding, scaled_val);
        } else {
            scaled_val.insert(scaled_val.len() - SCALE, '.');
        }
        f.write_str(&scaled_val)
    }
}

impl TryAdd for Rate {
    fn try_add(self, rhs: Self) -> Result<Self, LendingError> {
        Ok(Self(self.0.checked_add(rhs.0).ok_or(LendingError::MathOverflow)?))
    }
}

impl TrySub for Rate {
    fn try_sub(self, rhs: Self) -> Result<Self, LendingError> {
        Ok(Self(self.0.checked_sub(rhs.0).ok_or(LendingError::MathOverflow)?))
    }
}

impl TryDiv<u64> for Rate {
    fn try_div(self, rhs: u64) -> Result<Self, LendingError> {
        Ok(Self(self.0.checked_div(U256::from(rhs)).ok_or(LendingError::MathOverflow)?))
    }
}

impl TryMul<Rate> for Rate {
    fn try_mul(self, rhs: Self) -> Result<Self, LendingError> {
        Ok(Self(
            self.0
                .checked_mul(rhs.0)
                .ok_or(LendingError::MathOverflow)?
                .checked_div(Self::wad())
                .ok_or(LendingError::MathOverflow)?
        ))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_rate_bps() {
        let rate = Rate::from_bps(500);
        assert_eq!(rate.to_scaled_val(), U256::from(50_000_000_000_000_000u64));
        assert_eq!(Rate::from_bps(10_000), Rate::one());
    }

    #[test]
    fn test_monthly_rate() {
        // 12% APR is exactly 1% per month
        let monthly = Rate::monthly_from_annual_bps(1_200).unwrap();
        assert_eq!(monthly, Rate::from_bps(100));
    }

    #[test]
    fn test_rate_pow() {
        let rate = Rate::from_bps(1_000);
        let squared = rate.try_pow(2).unwrap();
        assert_eq!(squared, Rate::from_bps(100));

        let growth = Rate::one().try_add(Rate::from_bps(1_000)).unwrap();
        // 1.1^3 = 1.331
        assert_eq!(growth.try_pow(3).unwrap(), Rate::from_bps(13_310));
        assert_eq!(growth.try_pow(0).unwrap(), Rate::one());
    }
}
