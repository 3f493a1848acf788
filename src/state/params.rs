use odra::prelude::*;
use odra::casper_types::U256;
use serde::{Deserialize, Serialize};

use crate::error::LendingError;
use crate::math::{apply_bps, common::BPS_DENOMINATOR, Decimal, Rate, TryAdd, TryDiv, TryMul, TrySub};
use crate::state::{
    APPRECIATION_STAKER_BPS, DOWN_PAYMENT_BPS, FLAT_MONTHLY_PAYMENT_BPS, INTEREST_RATE_BPS,
    MANAGEMENT_FEE_BPS, MIN_DEPOSIT, PLATFORM_FEE_BPS, TERM_MONTHS,
};

/// How the fixed monthly payment of a mortgage is derived
#[odra::odra_type]
#[derive(Default, Copy, Serialize, Deserialize)]
pub enum PaymentModel {
    /// Standard annuity: `L * r / (1 - (1 + r)^-n)`
    #[default]
    Amortizing = 0,
    /// Flat 1.21% of the loan per month with equal principal installments
    FlatApproximation = 1,
}

/// What an appraisal below the purchase price does
#[odra::odra_type]
#[derive(Default, Copy, Serialize, Deserialize)]
pub enum DepreciationPolicy {
    /// Record the appraisal with zero appreciation
    #[default]
    DistributeZero = 0,
    /// Refuse the appraisal
    Reject = 1,
}

/// Immutable protocol policy handed to both contracts at construction
#[odra::odra_type]
#[derive(Copy, Serialize, Deserialize)]
pub struct EconomicParams {
    pub down_payment_bps: u32,
    pub platform_fee_bps: u32,
    pub interest_rate_bps: u32,
    pub term_months: u32,
    pub management_fee_bps: u32,
    /// Raw settlement units
    pub min_deposit: u64,
    pub appreciation_staker_bps: u32,
    pub depreciation_policy: DepreciationPolicy,
    pub payment_model: PaymentModel,
}

impl Default for EconomicParams {
    fn default() -> Self {
        Self {
            down_payment_bps: DOWN_PAYMENT_BPS,
            platform_fee_bps: PLATFORM_FEE_BPS,
            interest_rate_bps: INTEREST_RATE_BPS,
            term_months: TERM_MONTHS,
            management_fee_bps: MANAGEMENT_FEE_BPS,
            min_deposit: MIN_DEPOSIT,
            appreciation_staker_bps: APPRECIATION_STAKER_BPS,
            depreciation_policy: DepreciationPolicy::DistributeZero,
            payment_model: PaymentModel::Amortizing,
        }
    }
}

/// Figures shown to a buyer before purchase
#[odra::odra_type]
pub struct PurchaseQuote {
    pub property_price: U256,
    pub down_payment: U256,
    pub platform_fee: U256,
    pub total_due: U256,
    pub loan_amount: U256,
    pub monthly_payment: U256,
    pub total_payments: U256,
    pub total_interest: U256,
}

impl EconomicParams {
    pub fn validate(&self) -> Result<(), LendingError> {
        let max = BPS_DENOMINATOR as u32;
        if self.down_payment_bps >= max {
            return Err(LendingError::InvalidConfig);
        }
        if self.platform_fee_bps > max
            || self.interest_rate_bps > max
            || self.management_fee_bps > max
            || self.appreciation_staker_bps > max
        {
            return Err(LendingError::InvalidConfig);
        }
        if self.term_months == 0 || self.min_deposit == 0 {
            return Err(LendingError::InvalidConfig);
        }
        Ok(())
    }

    pub fn down_payment(&self, property_price: U256) -> Result<U256, LendingError> {
        apply_bps(property_price, self.down_payment_bps)
    }

    pub fn platform_fee(&self, property_price: U256) -> Result<U256, LendingError> {
        apply_bps(property_price, self.platform_fee_bps)
    }

    /// Monthly rate derived from the annual rate
    pub fn monthly_rate(&self) -> Result<Rate, LendingError> {
        Rate::monthly_from_annual_bps(self.interest_rate_bps)
    }

    /// Fixed monthly payment for a loan under the configured payment model.
    pub fn monthly_payment(&self, loan_amount: U256) -> Result<U256, LendingError> {
        match self.payment_model {
            PaymentModel::Amortizing => self.amortized_payment(loan_amount),
            PaymentModel::FlatApproximation => apply_bps(loan_amount, FLAT_MONTHLY_PAYMENT_BPS),
        }
    }

    fn amortized_payment(&self, loan_amount: U256) -> Result<U256, LendingError> {
        let rate = self.monthly_rate()?;
        let loan = Decimal::from_amount(loan_amount)?;
        if rate == Rate::zero() {
            return loan.try_div(self.term_months as u64)?.try_ceil();
        }

        // (1 + r)^n
        let growth = Rate::one().try_add(rate)?.try_pow(self.term_months as u64)?;
        let discount = Decimal::from(growth.try_sub(Rate::one())?);

        loan.try_mul(rate)?
            .try_mul(growth)?
            .try_div(discount)?
            .try_round()
    }

    pub fn quote(&self, property_price: U256) -> Result<PurchaseQuote, LendingError> {
        if property_price.is_zero() {
            return Err(LendingError::InvalidAmount);
        }
        let down_payment = self.down_payment(property_price)?;
        let platform_fee = self.platform_fee(property_price)?;
        let loan_amount = property_price
            .checked_sub(down_payment)
            .ok_or(LendingError::MathOverflow)?;
        let monthly_payment = self.monthly_payment(loan_amount)?;
        let total_payments = monthly_payment
            .checked_mul(U256::from(self.term_months))
            .ok_or(LendingError::MathOverflow)?;

        Ok(PurchaseQuote {
            property_price,
            down_payment,
            platform_fee,
            total_due: down_payment
                .checked_add(platform_fee)
                .ok_or(LendingError::MathOverflow)?,
            loan_amount,
            monthly_payment,
            total_payments,
            total_interest: total_payments.saturating_sub(loan_amount),
        })
    }
}
