use odra::prelude::*;
use odra::casper_types::U256;

use crate::error::LendingError;
use crate::math::{mul_div_floor, Decimal, TryDiv};

/// Exchange rate used while the pool has no shares outstanding
pub const INITIAL_EXCHANGE_RATE: u64 = 1;

/// Staking pool totals, stored as a single snapshot
#[odra::odra_type]
#[derive(Default)]
pub struct PoolState {
    pub total_assets: U256,
    pub total_shares: U256,
    pub total_interest_received: U256,
    pub total_appreciation_received: U256,
}

/// Read projection returned by `get_pool_metrics`
#[odra::odra_type]
pub struct PoolMetrics {
    pub total_assets: U256,
    pub total_shares: U256,
    /// WAD-scaled assets per share
    pub exchange_rate: U256,
    pub total_interest_received: U256,
    pub total_appreciation_received: U256,
}

impl PoolState {
    /// Assets per share, bootstrapped at 1.0 for an empty pool
    pub fn exchange_rate(&self) -> Result<Decimal, LendingError> {
        if self.total_shares.is_zero() {
            return Ok(Decimal::from(INITIAL_EXCHANGE_RATE));
        }
        Decimal::from_amount(self.total_assets)?.try_div(Decimal::from_amount(self.total_shares)?)
    }

    /// Shares minted for `amount` at the current rate
    pub fn shares_for(&self, amount: U256) -> Result<U256, LendingError> {
        if self.total_shares.is_zero() {
            return Ok(amount);
        }
        mul_div_floor(amount, self.total_shares, self.total_assets)
    }

    /// Assets redeemed for `shares` at the current rate
    pub fn assets_for(&self, shares: U256) -> Result<U256, LendingError> {
        if self.total_shares.is_zero() {
            return Ok(U256::zero());
        }
        mul_div_floor(shares, self.total_assets, self.total_shares)
    }

    pub fn deposit(&mut self, amount: U256, min_deposit: U256) -> Result<U256, LendingError> {
        if amount.is_zero() || amount < min_deposit {
            return Err(LendingError::InvalidAmount);
        }
        let shares = self.shares_for(amount)?;
        if shares.is_zero() {
            return Err(LendingError::InvalidAmount);
        }

        self.total_assets = self
            .total_assets
            .checked_add(amount)
            .ok_or(LendingError::MathOverflow)?;
        self.total_shares = self
            .total_shares
            .checked_add(shares)
            .ok_or(LendingError::MathOverflow)?;
        Ok(shares)
    }

    pub fn withdraw(&mut self, shares: U256, balance: U256) -> Result<U256, LendingError> {
        if shares.is_zero() {
            return Err(LendingError::InvalidAmount);
        }
        if shares > balance || shares > self.total_shares {
            return Err(LendingError::InsufficientShares);
        }
        let amount = self.assets_for(shares)?;

        self.total_assets = self
            .total_assets
            .checked_sub(amount)
            .ok_or(LendingError::MathOverflow)?;
        self.total_shares -= shares;
        Ok(amount)
    }

    pub fn receive_interest(&mut self, amount: U256) -> Result<(), LendingError> {
        self.credit(amount)?;
        self.total_interest_received = self
            .total_interest_received
            .checked_add(amount)
            .ok_or(LendingError::MathOverflow)?;
        Ok(())
    }

    pub fn receive_appreciation(&mut self, amount: U256) -> Result<(), LendingError> {
        self.credit(amount)?;
        self.total_appreciation_received = self
            .total_appreciation_received
            .checked_add(amount)
            .ok_or(LendingError::MathOverflow)?;
        Ok(())
    }

    /// Adds an inflow to the assets backing existing shares. An empty pool has
    /// nobody to credit, so the inflow is refused.
    fn credit(&mut self, amount: U256) -> Result<(), LendingError> {
        if amount.is_zero() {
            return Err(LendingError::InvalidAmount);
        }
        if self.total_shares.is_zero() {
            return Err(LendingError::InvalidState);
        }
        self.total_assets = self
            .total_assets
            .checked_add(amount)
            .ok_or(LendingError::MathOverflow)?;
        Ok(())
    }

    pub fn metrics(&self) -> Result<PoolMetrics, LendingError> {
        Ok(PoolMetrics {
            total_assets: self.total_assets,
            total_shares: self.total_shares,
            exchange_rate: self.exchange_rate()?.to_scaled_val(),
            total_interest_received: self.total_interest_received,
            total_appreciation_received: self.total_appreciation_received,
        })
    }
}
