use odra::casper_types::U256;
use odra::prelude::*;
use odra::ContractRef;

use crate::error::LendingError;
use crate::events::{AppreciationReceived, Deposited, InterestReceived, Withdrawn};
use crate::processor::{collect, revert_on_err};
use crate::state::{EconomicParams, PoolMetrics, PoolState};
use crate::token::SettlementTokenContractRef;

/// Share-based vault fed by mortgage interest and property appreciation
#[odra::module(events = [Deposited, Withdrawn, InterestReceived, AppreciationReceived])]
pub struct StakingPool {
    owner: Var<Address>,
    token: Var<Address>,
    mortgage_contract: Var<Address>,
    params: Var<EconomicParams>,
    state: Var<PoolState>,
    shares: Mapping<Address, U256>,
}

#[odra::module]
impl StakingPool {
    pub fn init(&mut self, token: Address, params: EconomicParams) {
        revert_on_err(&self.env(), params.validate());

        self.owner.set(self.env().caller());
        self.token.set(token);
        self.params.set(params);
        self.state.set(PoolState::default());
    }

    /// Registers the ledger allowed to push interest and appreciation. One-shot.
    pub fn set_mortgage_contract(&mut self, mortgage_contract: Address) {
        self.require_owner();
        if self.mortgage_contract.get().is_some() {
            self.env().revert(LendingError::InvalidState);
        }
        self.mortgage_contract.set(mortgage_contract);
    }

    // ===========================================================================
    // DEPOSIT / WITHDRAW
    // ===========================================================================

    pub fn deposit(&mut self, amount: U256) -> U256 {
        let caller = self.env().caller();
        let mut state = self.pool_state();
        let min_deposit = U256::from(self.params().min_deposit);

        let shares_minted = revert_on_err(&self.env(), state.deposit(amount, min_deposit));
        let balance = self.balance_of(caller);

        self.state.set(state);
        self.shares.set(&caller, balance + shares_minted);
        collect(self.env(), self.token_address(), caller, self.env().self_address(), amount);

        self.env().emit_event(Deposited {
            user: caller,
            usdt_amount: amount,
            shares_minted,
        });
        shares_minted
    }

    pub fn withdraw(&mut self, shares: U256) -> U256 {
        let caller = self.env().caller();
        let mut state = self.pool_state();
        let balance = self.balance_of(caller);

        let usdt_amount = revert_on_err(&self.env(), state.withdraw(shares, balance));

        self.state.set(state);
        self.shares.set(&caller, balance - shares);
        if !usdt_amount.is_zero() {
            let mut token = SettlementTokenContractRef::new(self.env(), self.token_address());
            token.transfer(caller, usdt_amount);
        }

        self.env().emit_event(Withdrawn {
            user: caller,
            usdt_amount,
            shares_burned: shares,
        });
        usdt_amount
    }

    // ===========================================================================
    // INFLOWS (mortgage ledger only)
    // ===========================================================================

    pub fn receive_interest(&mut self, amount: U256) {
        self.require_mortgage_contract();
        let mut state = self.pool_state();
        revert_on_err(&self.env(), state.receive_interest(amount));
        self.state.set(state);

        self.env().emit_event(InterestReceived { amount });
    }

    pub fn receive_appreciation(&mut self, amount: U256) {
        self.require_mortgage_contract();
        let mut state = self.pool_state();
        revert_on_err(&self.env(), state.receive_appreciation(amount));
        self.state.set(state);

        self.env().emit_event(AppreciationReceived { amount });
    }

    // ===========================================================================
    // VIEWS
    // ===========================================================================

    pub fn get_pool_metrics(&self) -> PoolMetrics {
        revert_on_err(&self.env(), self.pool_state().metrics())
    }

    /// WAD-scaled assets per share
    pub fn exchange_rate(&self) -> U256 {
        revert_on_err(&self.env(), self.pool_state().exchange_rate()).to_scaled_val()
    }

    pub fn balance_of(&self, account: Address) -> U256 {
        self.shares.get(&account).unwrap_or_default()
    }

    pub fn total_supply(&self) -> U256 {
        self.pool_state().total_shares
    }

    /// Settlement value of an account's shares at the current rate
    pub fn assets_of(&self, account: Address) -> U256 {
        revert_on_err(&self.env(), self.pool_state().assets_for(self.balance_of(account)))
    }

    pub fn total_assets_under_management(&self) -> U256 {
        self.pool_state().total_assets
    }

    pub fn total_interest_received(&self) -> U256 {
        self.pool_state().total_interest_received
    }

    pub fn total_appreciation_received(&self) -> U256 {
        self.pool_state().total_appreciation_received
    }

    pub fn min_deposit(&self) -> U256 {
        U256::from(self.params().min_deposit)
    }

    pub fn management_fee_bps(&self) -> u32 {
        self.params().management_fee_bps
    }

    pub fn params(&self) -> EconomicParams {
        self.params.get_or_default()
    }

    pub fn token(&self) -> Option<Address> {
        self.token.get()
    }

    pub fn mortgage_contract(&self) -> Option<Address> {
        self.mortgage_contract.get()
    }

    pub fn owner(&self) -> Option<Address> {
        self.owner.get()
    }

    // ===========================================================================
    // HELPERS
    // ===========================================================================

    fn pool_state(&self) -> PoolState {
        self.state.get_or_default()
    }

    fn token_address(&self) -> Address {
        self.token
            .get()
            .unwrap_or_else(|| self.env().revert(LendingError::InvalidConfig))
    }

    fn require_owner(&self) {
        if self.owner.get() != Some(self.env().caller()) {
            self.env().revert(LendingError::Unauthorized);
        }
    }

    fn require_mortgage_contract(&self) {
        if self.mortgage_contract.get() != Some(self.env().caller()) {
            self.env().revert(LendingError::Unauthorized);
        }
    }
}
