//! Contract entry points: the mortgage ledger and the staking pool.
//!
//! State changes are computed on local copies with the fallible `state` API and
//! only written back once every check has passed; any error reverts the call.

pub mod mortgage;
pub mod staking_pool;

pub use mortgage::MortgageLedger;
pub use staking_pool::StakingPool;

use alloc::rc::Rc;
use odra::casper_types::U256;
use odra::prelude::*;
use odra::{ContractEnv, ContractRef};

use crate::error::LendingError;
use crate::token::SettlementTokenContractRef;

/// Unwraps a state transition or reverts the whole call with its error.
pub(crate) fn revert_on_err<T>(env: &ContractEnv, result: Result<T, LendingError>) -> T {
    match result {
        Ok(value) => value,
        Err(error) => env.revert(error),
    }
}

/// Pulls `amount` of the settlement token from `payer` to `recipient`.
///
/// The caller contract must hold an allowance from `payer`.
pub(crate) fn collect(env: Rc<ContractEnv>, token: Address, payer: Address, recipient: Address, amount: U256) {
    if amount.is_zero() {
        return;
    }
    let mut token = SettlementTokenContractRef::new(env.clone(), token);
    if token.balance_of(payer) < amount {
        env.revert(LendingError::InsufficientBalance);
    }
    if token.allowance(payer, env.self_address()) < amount {
        env.revert(LendingError::InsufficientAllowance);
    }
    token.transfer_from(payer, recipient, amount);
}
