#![cfg_attr(not(test), no_std)]
#![cfg_attr(not(test), no_main)]
#![allow(clippy::arithmetic_side_effects)]

//! Property mortgages and a staking pool for the casper blockchain.

extern crate alloc;

pub mod error;
pub mod events;
pub mod math;
pub mod processor;
pub mod state;
pub mod token;
