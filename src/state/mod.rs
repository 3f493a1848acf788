// Plain state records shared by the ledger and pool contracts

pub mod mortgage;
pub mod params;
pub mod pool;

pub use mortgage::*;
pub use params::*;
pub use pool::*;

/// Settlement token decimals (USDT)
pub const SETTLEMENT_DECIMALS: u8 = 6;
/// One whole settlement token in raw units
pub const ONE_USDT: u64 = 1_000_000;

/// Share of the property price paid up front, in basis points
pub const DOWN_PAYMENT_BPS: u32 = 2_000;
/// Platform fee charged at purchase, in basis points
pub const PLATFORM_FEE_BPS: u32 = 300;
/// Annual interest rate, in basis points
pub const INTEREST_RATE_BPS: u32 = 800;
/// Mortgage term
pub const TERM_MONTHS: u32 = 120;
/// Pool management fee, in basis points
pub const MANAGEMENT_FEE_BPS: u32 = 200;
/// Smallest accepted pool deposit in raw units (100 USDT)
pub const MIN_DEPOSIT: u64 = 100 * ONE_USDT;
/// Share of distributed appreciation credited to stakers, in basis points
pub const APPRECIATION_STAKER_BPS: u32 = 5_000;
/// Monthly payment of the flat approximation, in basis points of the loan
pub const FLAT_MONTHLY_PAYMENT_BPS: u32 = 121;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn min_deposit_is_one_hundred_usdt() {
        assert_eq!(MIN_DEPOSIT, 100 * 10u64.pow(SETTLEMENT_DECIMALS as u32));
    }
}
