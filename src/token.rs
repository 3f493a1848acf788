//! Settlement asset: the fungible-token surface the ledger and pool call into,
//! plus a 6-decimal mock USDT used on test networks.

use odra::prelude::*;
use odra::casper_types::U256;

use crate::error::LendingError;
use crate::state::SETTLEMENT_DECIMALS;

/// CEP-18 style token surface used to move settlement value
#[odra::external_contract]
pub trait SettlementToken {
    fn balance_of(&self, owner: Address) -> U256;
    fn allowance(&self, owner: Address, spender: Address) -> U256;
    fn approve(&mut self, spender: Address, amount: U256);
    fn transfer(&mut self, recipient: Address, amount: U256);
    fn transfer_from(&mut self, owner: Address, recipient: Address, amount: U256);
}

pub mod events {
    use odra::prelude::*;
    use odra::casper_types::U256;

    #[odra::event]
    pub struct Transfer {
        pub from: Option<Address>,
        pub to: Address,
        pub amount: U256,
    }

    #[odra::event]
    pub struct Approval {
        pub owner: Address,
        pub spender: Address,
        pub amount: U256,
    }
}

/// Mock USDT with an open faucet
#[odra::module(events = [events::Transfer, events::Approval])]
pub struct MockUsdt {
    balances: Mapping<Address, U256>,
    allowances: Mapping<(Address, Address), U256>,
    total_supply: Var<U256>,
}

#[odra::module]
impl MockUsdt {
    pub fn name(&self) -> String {
        String::from("Mock USDT")
    }

    pub fn symbol(&self) -> String {
        String::from("USDT")
    }

    pub fn decimals(&self) -> u8 {
        SETTLEMENT_DECIMALS
    }

    pub fn total_supply(&self) -> U256 {
        self.total_supply.get_or_default()
    }

    pub fn balance_of(&self, owner: Address) -> U256 {
        self.balances.get(&owner).unwrap_or_default()
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances.get(&(owner, spender)).unwrap_or_default()
    }

    /// Faucet: anyone may mint test funds
    pub fn mint(&mut self, recipient: Address, amount: U256) {
        let supply = self
            .total_supply()
            .checked_add(amount)
            .unwrap_or_else(|| self.env().revert(LendingError::MathOverflow));
        let balance = self.balance_of(recipient) + amount;
        self.balances.set(&recipient, balance);
        self.total_supply.set(supply);

        self.env().emit_event(events::Transfer {
            from: None,
            to: recipient,
            amount,
        });
    }

    pub fn approve(&mut self, spender: Address, amount: U256) {
        let owner = self.env().caller();
        self.allowances.set(&(owner, spender), amount);

        self.env().emit_event(events::Approval {
            owner,
            spender,
            amount,
        });
    }

    pub fn transfer(&mut self, recipient: Address, amount: U256) {
        let owner = self.env().caller();
        self.move_tokens(owner, recipient, amount);
    }

    pub fn transfer_from(&mut self, owner: Address, recipient: Address, amount: U256) {
        let spender = self.env().caller();
        let allowance = self.allowance(owner, spender);
        if allowance < amount {
            self.env().revert(LendingError::InsufficientAllowance);
        }
        self.allowances.set(&(owner, spender), allowance - amount);
        self.move_tokens(owner, recipient, amount);
    }

    fn move_tokens(&mut self, owner: Address, recipient: Address, amount: U256) {
        let from_balance = self.balance_of(owner);
        if from_balance < amount {
            self.env().revert(LendingError::InsufficientBalance);
        }
        self.balances.set(&owner, from_balance - amount);
        let to_balance = self
            .balance_of(recipient)
            .checked_add(amount)
            .unwrap_or_else(|| self.env().revert(LendingError::MathOverflow));
        self.balances.set(&recipient, to_balance);

        self.env().emit_event(events::Transfer {
            from: Some(owner),
            to: recipient,
            amount,
        });
    }
}
