//! The constant-product invariant `x * y = k`.

use crate::domain::Rounding;

/// Output amount for a given input, floor-rounded.
///
/// `delta_y = floor(delta_x * y / (x + delta_x))`. Flooring keeps the
/// rounding loss inside the pool. Returns `None` on overflow or when the
/// denominator is zero.
#[must_use]
pub fn swap_input_amount_out(
    input_amount: u128,
    input_reserve: u128,
    output_reserve: u128,
) -> Option<u128> {
    let numerator = input_amount.checked_mul(output_reserve)?;
    let denominator = input_reserve.checked_add(input_amount)?;
    numerator.checked_div(denominator)
}

/// Input amount required for a given output, ceiling-rounded.
///
/// `delta_x = ceil(x * delta_y / (y - delta_y))`. The ceiling makes the
/// caller pay for the truncated fraction, so the invariant never drops.
/// Returns `None` when `output_amount >= output_reserve` (the pool can
/// never be drained through a swap) or on overflow.
#[must_use]
pub fn swap_output_amount_in(
    output_amount: u128,
    input_reserve: u128,
    output_reserve: u128,
) -> Option<u128> {
    let numerator = input_reserve.checked_mul(output_amount)?;
    let denominator = output_reserve.checked_sub(output_amount)?;
    if denominator == 0 {
        return None;
    }
    ceil_div(numerator, denominator)
}

/// Converts an LP-share amount into the two trading-token amounts it
/// represents, as a simple pro-rata share of the reserves.
///
/// With [`Rounding::Up`] the per-token ceiling is only applied when the
/// floored amount is non-zero: for tiny share amounts worth less than
/// one token unit the result stays zero, so the caller can reject the
/// operation instead of overcharging.
#[must_use]
pub fn lp_tokens_to_trading_tokens(
    lp_amount: u128,
    lp_supply: u128,
    reserve_0: u128,
    reserve_1: u128,
    rounding: Rounding,
) -> Option<(u128, u128)> {
    let mut amount_0 = lp_amount.checked_mul(reserve_0)?.checked_div(lp_supply)?;
    let mut amount_1 = lp_amount.checked_mul(reserve_1)?.checked_div(lp_supply)?;
    if rounding.is_up() {
        let remainder_0 = lp_amount.checked_mul(reserve_0)?.checked_rem(lp_supply)?;
        if remainder_0 > 0 && amount_0 > 0 {
            amount_0 += 1;
        }
        let remainder_1 = lp_amount.checked_mul(reserve_1)?.checked_rem(lp_supply)?;
        if remainder_1 > 0 && amount_1 > 0 {
            amount_1 += 1;
        }
    }
    Some((amount_0, amount_1))
}

/// Integer square root, used for the first-deposit liquidity amount
/// `isqrt(amount_0 * amount_1)`.
#[must_use]
pub const fn integer_sqrt(value: u128) -> u128 {
    if value < 2 {
        return value;
    }
    // Newton's method on integers converges from above.
    let mut x = value;
    let mut y = (x + 1) / 2;
    while y < x {
        x = y;
        y = (x + value / x) / 2;
    }
    x
}

const fn ceil_div(numerator: u128, denominator: u128) -> Option<u128> {
    // denominator > 0 checked by callers; (n + d - 1) may overflow, so
    // split into quotient and remainder.
    let quotient = numerator / denominator;
    if numerator % denominator == 0 {
        Some(quotient)
    } else {
        quotient.checked_add(1)
    }
}
