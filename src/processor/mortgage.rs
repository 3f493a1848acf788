use odra::casper_types::U256;
use odra::prelude::*;
use odra::ContractRef;

use crate::error::LendingError;
use crate::events::{
    AppraiseProperty, AppreciationDistributed, MortgageCompleted, MortgageCreated, MortgageTransferred,
    PaymentMade,
};
use crate::processor::staking_pool::StakingPoolContractRef;
use crate::processor::{collect, revert_on_err};
use crate::state::{AppraisalRecord, EconomicParams, MortgageRecord, MortgageView, PurchaseQuote};

/// Property mortgages, one non-fungible token per purchase
#[odra::module(events = [
    MortgageCreated,
    PaymentMade,
    MortgageCompleted,
    AppraiseProperty,
    AppreciationDistributed,
    MortgageTransferred
])]
pub struct MortgageLedger {
    // Protocol wiring
    owner: Var<Address>,
    token: Var<Address>,
    staking_pool: Var<Address>,
    treasury: Var<Address>,
    params: Var<EconomicParams>,

    // Mortgages, keyed by token id
    last_token_id: Var<u64>,
    mortgages: Mapping<u64, MortgageRecord>,
    appraisals: Mapping<u64, AppraisalRecord>,

    // Token ownership with per-owner enumeration
    owners: Mapping<u64, Address>,
    balances: Mapping<Address, u32>,
    owned_tokens: Mapping<(Address, u32), u64>,
    owned_index: Mapping<u64, u32>,
}

#[odra::module]
impl MortgageLedger {
    pub fn init(&mut self, token: Address, staking_pool: Address, treasury: Address, params: EconomicParams) {
        revert_on_err(&self.env(), params.validate());

        self.owner.set(self.env().caller());
        self.token.set(token);
        self.staking_pool.set(staking_pool);
        self.treasury.set(treasury);
        self.params.set(params);
        self.last_token_id.set(0);
    }

    // ===========================================================================
    // PURCHASE AND PAYMENTS
    // ===========================================================================

    /// Opens a mortgage for the caller, who pays the down payment and platform
    /// fee up front. Returns the new token id.
    pub fn purchase_property(&mut self, property_price: U256) -> u64 {
        let borrower = self.env().caller();
        let params = self.params();

        let record = revert_on_err(&self.env(), MortgageRecord::new(borrower, property_price, &params));
        let quote = revert_on_err(&self.env(), params.quote(property_price));

        let token_id = self.last_token_id.get_or_default() + 1;
        self.last_token_id.set(token_id);
        self.mortgages.set(&token_id, record.clone());
        self.mint(borrower, token_id);

        collect(self.env(), self.token_address(), borrower, self.treasury_address(), quote.total_due);

        self.env().emit_event(MortgageCreated {
            token_id,
            borrower,
            property_price,
            loan_amount: record.loan_amount,
            monthly_payment: record.monthly_payment,
        });
        token_id
    }

    /// Pays the next installment. Interest goes to the staking pool, principal
    /// to the treasury. While the pool has no shares the interest goes to the
    /// treasury as well. Anyone may pay on behalf of the borrower.
    pub fn make_payment(&mut self, token_id: u64) {
        let payer = self.env().caller();
        let params = self.params();
        let mut record = self.mortgage(token_id);

        let installment = revert_on_err(&self.env(), record.next_installment(&params));
        let completed = revert_on_err(&self.env(), record.apply_installment(&installment, params.term_months));
        let amount_due = revert_on_err(&self.env(), installment.amount_due());
        let payment_number = record.payments_made;
        self.mortgages.set(&token_id, record);

        let token = self.token_address();
        let pool = self.staking_pool_address();
        if self.settlement_balance(payer) < amount_due {
            self.env().revert(LendingError::InsufficientBalance);
        }
        let treasury = self.treasury_address();
        if !installment.interest.is_zero() {
            let mut staking_pool = StakingPoolContractRef::new(self.env(), pool);
            if staking_pool.total_supply().is_zero() {
                collect(self.env(), token, payer, treasury, installment.interest);
            } else {
                collect(self.env(), token, payer, pool, installment.interest);
                staking_pool.receive_interest(installment.interest);
            }
        }
        collect(self.env(), token, payer, treasury, installment.principal);

        self.env().emit_event(PaymentMade {
            token_id,
            payment_number,
            interest_paid: installment.interest,
            principal_paid: installment.principal,
        });
        if completed {
            self.env().emit_event(MortgageCompleted { token_id });
        }
    }

    // ===========================================================================
    // APPRAISAL
    // ===========================================================================

    /// Records the single appraisal of a mortgaged property (owner only).
    pub fn appraise_property(&mut self, token_id: u64, appraised_value: U256) {
        self.require_owner();
        let record = self.mortgage(token_id);
        if self.appraisals.get(&token_id).is_some() {
            self.env().revert(LendingError::InvalidState);
        }

        let appraisal = revert_on_err(
            &self.env(),
            AppraisalRecord::new(record.property_price, appraised_value, self.params().depreciation_policy),
        );
        let appreciation = appraisal.appreciation;
        self.appraisals.set(&token_id, appraisal);

        self.env().emit_event(AppraiseProperty {
            token_id,
            appraised_value,
            appreciation,
        });
    }

    /// Splits the recorded appreciation between the treasury and the staking
    /// pool. The caller funds both shares. The staker share goes to the
    /// treasury while the pool has no shares.
    pub fn distribute_appreciation(&mut self, token_id: u64) {
        self.require_owner();
        let distributor = self.env().caller();
        let mut appraisal = self
            .appraisals
            .get(&token_id)
            .unwrap_or_else(|| self.env().revert(LendingError::InvalidState));

        revert_on_err(&self.env(), appraisal.distribute(self.params().appreciation_staker_bps));
        let staker_share = appraisal.staker_share;
        let treasury_share = appraisal.treasury_share;
        self.appraisals.set(&token_id, appraisal);

        let token = self.token_address();
        let pool = self.staking_pool_address();
        if self.settlement_balance(distributor) < staker_share + treasury_share {
            self.env().revert(LendingError::InsufficientBalance);
        }
        let treasury = self.treasury_address();
        if !staker_share.is_zero() {
            let mut staking_pool = StakingPoolContractRef::new(self.env(), pool);
            if staking_pool.total_supply().is_zero() {
                collect(self.env(), token, distributor, treasury, staker_share);
            } else {
                collect(self.env(), token, distributor, pool, staker_share);
                staking_pool.receive_appreciation(staker_share);
            }
        }
        collect(self.env(), token, distributor, treasury, treasury_share);

        self.env().emit_event(AppreciationDistributed {
            token_id,
            treasury_share,
            staker_share,
        });
    }

    // ===========================================================================
    // OWNERSHIP
    // ===========================================================================

    pub fn transfer(&mut self, token_id: u64, recipient: Address) {
        let from = self.owner_of(token_id);
        if from != self.env().caller() {
            self.env().revert(LendingError::Unauthorized);
        }
        self.burn(from, token_id);
        self.mint(recipient, token_id);

        self.env().emit_event(MortgageTransferred {
            token_id,
            from,
            to: recipient,
        });
    }

    pub fn owner_of(&self, token_id: u64) -> Address {
        self.owners
            .get(&token_id)
            .unwrap_or_else(|| self.env().revert(LendingError::InvalidState))
    }

    pub fn balance_of(&self, owner: Address) -> u32 {
        self.balances.get(&owner).unwrap_or_default()
    }

    pub fn token_of_owner_by_index(&self, owner: Address, index: u32) -> u64 {
        if index >= self.balance_of(owner) {
            self.env().revert(LendingError::InvalidState);
        }
        self.owned_tokens.get(&(owner, index)).unwrap_or_default()
    }

    // ===========================================================================
    // VIEWS
    // ===========================================================================

    pub fn get_mortgage(&self, token_id: u64) -> MortgageView {
        MortgageView::new(&self.mortgage(token_id), self.params().term_months)
    }

    pub fn get_appraisal(&self, token_id: u64) -> Option<AppraisalRecord> {
        self.appraisals.get(&token_id)
    }

    /// Purchase figures for a price without opening a mortgage
    pub fn quote_purchase(&self, property_price: U256) -> PurchaseQuote {
        revert_on_err(&self.env(), self.params().quote(property_price))
    }

    pub fn total_mortgages(&self) -> u64 {
        self.last_token_id.get_or_default()
    }

    pub fn params(&self) -> EconomicParams {
        self.params.get_or_default()
    }

    pub fn down_payment_bps(&self) -> u32 {
        self.params().down_payment_bps
    }

    pub fn platform_fee_bps(&self) -> u32 {
        self.params().platform_fee_bps
    }

    pub fn interest_rate_bps(&self) -> u32 {
        self.params().interest_rate_bps
    }

    pub fn term_months(&self) -> u32 {
        self.params().term_months
    }

    pub fn token(&self) -> Option<Address> {
        self.token.get()
    }

    pub fn staking_pool(&self) -> Option<Address> {
        self.staking_pool.get()
    }

    pub fn treasury(&self) -> Option<Address> {
        self.treasury.get()
    }

    pub fn owner(&self) -> Option<Address> {
        self.owner.get()
    }

    // ===========================================================================
    // HELPERS
    // ===========================================================================

    fn mortgage(&self, token_id: u64) -> MortgageRecord {
        self.mortgages
            .get(&token_id)
            .unwrap_or_else(|| self.env().revert(LendingError::InvalidState))
    }

    fn mint(&mut self, owner: Address, token_id: u64) {
        let index = self.balance_of(owner);
        self.owned_tokens.set(&(owner, index), token_id);
        self.owned_index.set(&token_id, index);
        self.balances.set(&owner, index + 1);
        self.owners.set(&token_id, owner);
    }

    /// Swap-removes `token_id` from the owner's enumeration.
    fn burn(&mut self, owner: Address, token_id: u64) {
        let last = self.balance_of(owner) - 1;
        let index = self.owned_index.get(&token_id).unwrap_or_default();
        if index != last {
            let moved = self.owned_tokens.get(&(owner, last)).unwrap_or_default();
            self.owned_tokens.set(&(owner, index), moved);
            self.owned_index.set(&moved, index);
        }
        self.balances.set(&owner, last);
    }

    fn settlement_balance(&self, account: Address) -> U256 {
        crate::token::SettlementTokenContractRef::new(self.env(), self.token_address()).balance_of(account)
    }

    fn token_address(&self) -> Address {
        self.token
            .get()
            .unwrap_or_else(|| self.env().revert(LendingError::InvalidConfig))
    }

    fn staking_pool_address(&self) -> Address {
        self.staking_pool
            .get()
            .unwrap_or_else(|| self.env().revert(LendingError::InvalidConfig))
    }

    fn treasury_address(&self) -> Address {
        self.treasury
            .get()
            .unwrap_or_else(|| self.env().revert(LendingError::InvalidConfig))
    }

    fn require_owner(&self) {
        if self.owner.get() != Some(self.env().caller()) {
            self.env().revert(LendingError::Unauthorized);
        }
    }
}
