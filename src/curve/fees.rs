//! Trade-fee computation and splitting.
//!
//! The trade fee rounds up (the pool never undercharges); the protocol
//! and fund shares carved out of it round down (the splits never exceed
//! the fee). The LP share is the remainder.

use crate::domain::{FeeRate, FEE_RATE_DENOMINATOR};

/// The trade fee charged on `amount`, ceiling-rounded.
#[must_use]
pub fn trading_fee(amount: u128, trade_fee_rate: FeeRate) -> Option<u128> {
    ceil_div(amount, u128::from(trade_fee_rate.get()))
}

/// The protocol share of a trade fee, floor-rounded.
#[must_use]
pub fn protocol_fee(trade_fee: u128, protocol_fee_rate: FeeRate) -> Option<u128> {
    floor_div(trade_fee, u128::from(protocol_fee_rate.get()))
}

/// The fund share of a trade fee, floor-rounded.
#[must_use]
pub fn fund_fee(trade_fee: u128, fund_fee_rate: FeeRate) -> Option<u128> {
    floor_div(trade_fee, u128::from(fund_fee_rate.get()))
}

/// The minimal gross amount whose trade fee still leaves `post_fee_amount`.
///
/// `ceil(post * DENOMINATOR / (DENOMINATOR - rate))`. Used by exact-output
/// pricing to discover the fee-inclusive amount. The [`FeeRate`]
/// constructor guarantees the divisor is non-zero.
#[must_use]
pub fn pre_trade_fee_amount(post_fee_amount: u128, trade_fee_rate: FeeRate) -> Option<u128> {
    if trade_fee_rate.is_zero() {
        return Some(post_fee_amount);
    }
    let denominator = u128::from(FEE_RATE_DENOMINATOR);
    let net_rate = denominator - u128::from(trade_fee_rate.get());
    let numerator = post_fee_amount.checked_mul(denominator)?;
    let quotient = numerator / net_rate;
    if numerator % net_rate == 0 {
        Some(quotient)
    } else {
        quotient.checked_add(1)
    }
}

fn ceil_div(amount: u128, rate: u128) -> Option<u128> {
    let denominator = u128::from(FEE_RATE_DENOMINATOR);
    amount
        .checked_mul(rate)?
        .checked_add(denominator - 1)?
        .checked_div(denominator)
}

fn floor_div(amount: u128, rate: u128) -> Option<u128> {
    let denominator = u128::from(FEE_RATE_DENOMINATOR);
    amount.checked_mul(rate)?.checked_div(denominator)
}
