//! Events emitted by the mortgage ledger and the staking pool.

use odra::prelude::*;
use odra::casper_types::U256;

// --- Mortgage ledger ---

#[odra::event]
pub struct MortgageCreated {
    pub token_id: u64,
    pub borrower: Address,
    pub property_price: U256,
    pub loan_amount: U256,
    pub monthly_payment: U256,
}

#[odra::event]
pub struct PaymentMade {
    pub token_id: u64,
    pub payment_number: u32,
    pub interest_paid: U256,
    pub principal_paid: U256,
}

#[odra::event]
pub struct MortgageCompleted {
    pub token_id: u64,
}

#[odra::event]
pub struct AppraiseProperty {
    pub token_id: u64,
    pub appraised_value: U256,
    pub appreciation: U256,
}

#[odra::event]
pub struct AppreciationDistributed {
    pub token_id: u64,
    pub treasury_share: U256,
    pub staker_share: U256,
}

#[odra::event]
pub struct MortgageTransferred {
    pub token_id: u64,
    pub from: Address,
    pub to: Address,
}

// --- Staking pool ---

#[odra::event]
pub struct Deposited {
    pub user: Address,
    pub usdt_amount: U256,
    pub shares_minted: U256,
}

#[odra::event]
pub struct Withdrawn {
    pub user: Address,
    pub usdt_amount: U256,
    pub shares_burned: U256,
}

#[odra::event]
pub struct InterestReceived {
    pub amount: U256,
}

#[odra::event]
pub struct AppreciationReceived {
    pub amount: U256,
}
