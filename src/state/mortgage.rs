use odra::prelude::*;
use odra::casper_types::U256;

use crate::error::LendingError;
use crate::math::{apply_bps, Decimal, TryMul};
use crate::state::params::{DepreciationPolicy, EconomicParams, PaymentModel};

/// Basis points reported for a fully repaid mortgage
pub const FULL_PROGRESS_BPS: u32 = 10_000;

// --- Mortgage State ---

/// One loan per property purchase, keyed by token id in the ledger
#[odra::odra_type]
pub struct MortgageRecord {
    pub borrower: Address,
    pub property_price: U256,
    pub loan_amount: U256,
    pub monthly_payment: U256,
    pub outstanding_principal: U256,
    pub payments_made: u32,
    pub total_interest_paid: U256,
    pub is_active: bool,
}

/// Split of a single installment
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Installment {
    pub interest: U256,
    pub principal: U256,
}

impl Installment {
    /// Amount the payer is charged for this installment
    pub fn amount_due(&self) -> Result<U256, LendingError> {
        self.interest
            .checked_add(self.principal)
            .ok_or(LendingError::MathOverflow)
    }
}

impl MortgageRecord {
    pub fn new(borrower: Address, property_price: U256, params: &EconomicParams) -> Result<Self, LendingError> {
        if property_price.is_zero() {
            return Err(LendingError::InvalidAmount);
        }
        let loan_amount = property_price
            .checked_sub(params.down_payment(property_price)?)
            .ok_or(LendingError::MathOverflow)?;

        Ok(Self {
            borrower,
            property_price,
            loan_amount,
            monthly_payment: params.monthly_payment(loan_amount)?,
            outstanding_principal: loan_amount,
            payments_made: 0,
            total_interest_paid: U256::zero(),
            is_active: true,
        })
    }

    /// Interest and principal owed by the next payment.
    ///
    /// The final installment retires whatever principal is left so the loan
    /// always closes at exactly zero.
    pub fn next_installment(&self, params: &EconomicParams) -> Result<Installment, LendingError> {
        if !self.is_active || self.payments_made >= params.term_months {
            return Err(LendingError::InvalidState);
        }

        let (interest, principal) = match params.payment_model {
            PaymentModel::Amortizing => {
                let interest = Decimal::from_amount(self.outstanding_principal)?
                    .try_mul(params.monthly_rate()?)?
                    .try_round()?;
                (interest, self.monthly_payment.saturating_sub(interest))
            }
            PaymentModel::FlatApproximation => {
                let principal = self.loan_amount / U256::from(params.term_months);
                (self.monthly_payment.saturating_sub(principal), principal)
            }
        };

        let is_final = self.payments_made + 1 == params.term_months;
        let principal = if is_final {
            self.outstanding_principal
        } else {
            principal.min(self.outstanding_principal)
        };

        Ok(Installment { interest, principal })
    }

    /// Books an installment. Returns true when it completes the mortgage.
    pub fn apply_installment(&mut self, installment: &Installment, term_months: u32) -> Result<bool, LendingError> {
        if !self.is_active || self.payments_made >= term_months {
            return Err(LendingError::InvalidState);
        }

        self.outstanding_principal = self
            .outstanding_principal
            .checked_sub(installment.principal)
            .ok_or(LendingError::MathOverflow)?;
        self.total_interest_paid = self
            .total_interest_paid
            .checked_add(installment.interest)
            .ok_or(LendingError::MathOverflow)?;
        self.payments_made += 1;
        self.is_active = self.payments_made < term_months;

        Ok(!self.is_active)
    }

    pub fn payments_remaining(&self, term_months: u32) -> u32 {
        term_months.saturating_sub(self.payments_made)
    }

    /// Repayment progress in basis points
    pub fn progress_bps(&self, term_months: u32) -> u32 {
        if term_months == 0 {
            return FULL_PROGRESS_BPS;
        }
        ((self.payments_made as u64 * FULL_PROGRESS_BPS as u64) / term_months as u64) as u32
    }
}

/// Read projection of a mortgage
#[odra::odra_type]
pub struct MortgageView {
    pub borrower: Address,
    pub property_price: U256,
    pub loan_amount: U256,
    pub monthly_payment: U256,
    pub payments_made: u32,
    pub payments_remaining: u32,
    pub outstanding_principal: U256,
    pub total_interest_paid: U256,
    pub is_active: bool,
    pub progress_bps: u32,
}

impl MortgageView {
    pub fn new(record: &MortgageRecord, term_months: u32) -> Self {
        Self {
            borrower: record.borrower,
            property_price: record.property_price,
            loan_amount: record.loan_amount,
            monthly_payment: record.monthly_payment,
            payments_made: record.payments_made,
            payments_remaining: record.payments_remaining(term_months),
            outstanding_principal: record.outstanding_principal,
            total_interest_paid: record.total_interest_paid,
            is_active: record.is_active,
            progress_bps: record.progress_bps(term_months),
        }
    }
}

// --- Appraisal ---

/// Single appraisal of a mortgaged property and its distribution status
#[odra::odra_type]
pub struct AppraisalRecord {
    pub appraised_value: U256,
    /// Zero when the appraisal is at or below the purchase price
    pub appreciation: U256,
    pub depreciated: bool,
    pub treasury_share: U256,
    pub staker_share: U256,
    pub distributed: bool,
}

impl AppraisalRecord {
    pub fn new(property_price: U256, appraised_value: U256, policy: DepreciationPolicy) -> Result<Self, LendingError> {
        if appraised_value.is_zero() {
            return Err(LendingError::InvalidAmount);
        }
        let depreciated = appraised_value < property_price;
        if depreciated && policy == DepreciationPolicy::Reject {
            return Err(LendingError::InvalidAmount);
        }

        Ok(Self {
            appraised_value,
            appreciation: appraised_value.saturating_sub(property_price),
            depreciated,
            treasury_share: U256::zero(),
            staker_share: U256::zero(),
            distributed: false,
        })
    }

    /// Splits the appreciation between stakers and the treasury, once.
    pub fn distribute(&mut self, staker_bps: u32) -> Result<(), LendingError> {
        if self.distributed {
            return Err(LendingError::AlreadyDistributed);
        }
        let staker_share = apply_bps(self.appreciation, staker_bps)?;
        self.treasury_share = self
            .appreciation
            .checked_sub(staker_share)
            .ok_or(LendingError::MathOverflow)?;
        self.staker_share = staker_share;
        self.distributed = true;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn borrower() -> Address {
        odra_test::env().get_account(1)
    }

    fn reference_mortgage(params: &EconomicParams) -> MortgageRecord {
        MortgageRecord::new(borrower(), U256::from(150_000_000_000u64), params).unwrap()
    }

    fn pay(record: &mut MortgageRecord, params: &EconomicParams) -> (Installment, bool) {
        let installment = record.next_installment(params).unwrap();
        let completed = record.apply_installment(&installment, params.term_months).unwrap();
        (installment, completed)
    }

    #[test]
    fn new_mortgage_finances_eighty_percent() {
        let params = EconomicParams::default();
        let record = reference_mortgage(&params);
        assert_eq!(record.loan_amount, U256::from(120_000_000_000u64));
        assert_eq!(record.outstanding_principal, record.loan_amount);
        assert_eq!(record.payments_made, 0);
        assert!(record.is_active);
        assert_eq!(record.payments_remaining(params.term_months), 120);
    }

    #[test]
    fn zero_price_is_rejected() {
        let params = EconomicParams::default();
        assert_eq!(
            MortgageRecord::new(borrower(), U256::zero(), &params),
            Err(LendingError::InvalidAmount)
        );
    }

    #[test]
    fn first_installment_splits_interest_and_principal() {
        let params = EconomicParams::default();
        let record = reference_mortgage(&params);
        let installment = record.next_installment(&params).unwrap();
        // 120_000 USDT at 8% / 12 = 800 USDT interest
        assert_eq!(installment.interest, U256::from(800_000_000u64));
        assert_eq!(installment.amount_due().unwrap(), record.monthly_payment);
    }

    #[test]
    fn full_term_retires_the_loan() {
        let params = EconomicParams::default();
        let mut record = reference_mortgage(&params);

        for k in 1..=params.term_months {
            let (_, completed) = pay(&mut record, &params);
            assert_eq!(record.payments_made, k);
            assert_eq!(record.is_active, k < params.term_months);
            assert_eq!(completed, k == params.term_months);
        }

        assert!(record.outstanding_principal.is_zero());
        assert_eq!(record.progress_bps(params.term_months), FULL_PROGRESS_BPS);
        assert_eq!(record.next_installment(&params), Err(LendingError::InvalidState));
        assert!(record.total_interest_paid > U256::from(54_000_000_000u64));
        assert!(record.total_interest_paid < U256::from(55_000_000_000u64));
    }

    #[test]
    fn completed_mortgage_rejects_further_payments() {
        let params = EconomicParams {
            term_months: 2,
            ..EconomicParams::default()
        };
        let mut record = reference_mortgage(&params);
        pay(&mut record, &params);
        let (_, completed) = pay(&mut record, &params);
        assert!(completed);

        let stray = Installment { interest: U256::one(), principal: U256::zero() };
        assert_eq!(record.apply_installment(&stray, 2), Err(LendingError::InvalidState));
        assert_eq!(record.payments_made, 2);
    }

    #[test]
    fn flat_model_repays_equal_principal() {
        let params = EconomicParams {
            payment_model: PaymentModel::FlatApproximation,
            ..EconomicParams::default()
        };
        let mut record = reference_mortgage(&params);
        let (first, _) = pay(&mut record, &params);
        assert_eq!(first.principal, U256::from(1_000_000_000u64));
        assert_eq!(first.amount_due().unwrap(), record.monthly_payment);

        while record.is_active {
            pay(&mut record, &params);
        }
        assert!(record.outstanding_principal.is_zero());
    }

    #[test]
    fn progress_is_proportional() {
        let params = EconomicParams::default();
        let mut record = reference_mortgage(&params);
        for _ in 0..30 {
            pay(&mut record, &params);
        }
        assert_eq!(record.progress_bps(params.term_months), 2_500);
        assert_eq!(record.payments_remaining(params.term_months), 90);
    }

    #[test]
    fn appreciation_split_follows_config() {
        let mut appraisal = AppraisalRecord::new(
            U256::from(450_000u64),
            U256::from(495_000u64),
            DepreciationPolicy::DistributeZero,
        )
        .unwrap();
        assert_eq!(appraisal.appreciation, U256::from(45_000u64));
        assert!(!appraisal.depreciated);

        appraisal.distribute(7_000).unwrap();
        assert_eq!(appraisal.staker_share, U256::from(31_500u64));
        assert_eq!(appraisal.treasury_share, U256::from(13_500u64));
        assert!(appraisal.distributed);
    }

    #[test]
    fn second_distribution_is_rejected() {
        let mut appraisal = AppraisalRecord::new(
            U256::from(100u64),
            U256::from(201u64),
            DepreciationPolicy::DistributeZero,
        )
        .unwrap();
        appraisal.distribute(5_000).unwrap();
        let before = appraisal.clone();

        assert_eq!(appraisal.distribute(5_000), Err(LendingError::AlreadyDistributed));
        assert_eq!(appraisal, before);
        assert_eq!(appraisal.staker_share, U256::from(50u64));
        assert_eq!(appraisal.treasury_share, U256::from(51u64));
    }

    #[test]
    fn depreciation_distributes_zero_by_default() {
        let mut appraisal = AppraisalRecord::new(
            U256::from(500u64),
            U256::from(400u64),
            DepreciationPolicy::DistributeZero,
        )
        .unwrap();
        assert!(appraisal.depreciated);
        assert!(appraisal.appreciation.is_zero());

        appraisal.distribute(5_000).unwrap();
        assert!(appraisal.staker_share.is_zero());
        assert!(appraisal.treasury_share.is_zero());
    }

    #[test]
    fn depreciation_can_be_rejected() {
        assert_eq!(
            AppraisalRecord::new(U256::from(500u64), U256::from(400u64), DepreciationPolicy::Reject),
            Err(LendingError::InvalidAmount)
        );
        assert!(
            AppraisalRecord::new(U256::from(500u64), U256::from(500u64), DepreciationPolicy::Reject).is_ok()
        );
    }
}
