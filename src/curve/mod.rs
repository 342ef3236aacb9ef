//! Constant-product pricing and trade-fee math.
//!
//! Everything in this module is pure `u128` arithmetic: no pool state,
//! no transfer fees. Amounts are widened from 64 bits by the caller so
//! products of two reserves can never overflow. The engine layer wraps
//! these functions with status gates, transfer-fee legs, and state
//! mutation.

pub mod constant_product;
pub mod fees;

use crate::domain::FeeRate;

/// The direction of a trade through a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TradeDirection {
    /// Input token 0, output token 1.
    ZeroForOne,
    /// Input token 1, output token 0.
    OneForZero,
}

impl TradeDirection {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn opposite(&self) -> Self {
        match self {
            Self::ZeroForOne => Self::OneForZero,
            Self::OneForZero => Self::ZeroForOne,
        }
    }
}

/// The result of pricing one swap, before transfer-fee legs.
///
/// `input_amount` is the total credited to the input vault (including
/// the trade fee when it is charged on the input side); `output_amount`
/// is the total debited from the output vault (excluding the trade fee
/// when it is charged on the output side, since that portion stays in
/// the vault as an accrued fee). The `new_*_reserve` fields are pricing
/// reserves, with all fee accruals excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapResult {
    /// Pricing reserve of the input token after the swap.
    pub new_input_reserve: u128,
    /// Pricing reserve of the output token after the swap.
    pub new_output_reserve: u128,
    /// Amount credited to the input vault.
    pub input_amount: u128,
    /// Amount debited from the output vault.
    pub output_amount: u128,
    /// Total trade fee, denominated in the fee-side token.
    pub trade_fee: u128,
    /// Protocol share of the trade fee.
    pub protocol_fee: u128,
    /// Fund share of the trade fee.
    pub fund_fee: u128,
    /// `true` if the trade fee is denominated in the input token.
    pub fee_on_input: bool,
}

impl SwapResult {
    /// The LP share of the trade fee: whatever protocol and fund do not
    /// take.
    #[must_use]
    pub const fn lp_fee(&self) -> u128 {
        self.trade_fee - self.protocol_fee - self.fund_fee
    }
}

/// Prices an exact-input swap over the given pricing reserves.
///
/// `amount_in` is the amount actually credited to the pool, after any
/// input-side transfer fee. Returns `None` when any intermediate
/// overflows or when the trade would move zero tokens on either side.
pub fn swap_exact_input(
    amount_in: u128,
    input_reserve: u128,
    output_reserve: u128,
    trade_fee_rate: FeeRate,
    protocol_fee_rate: FeeRate,
    fund_fee_rate: FeeRate,
    fee_on_input: bool,
) -> Option<SwapResult> {
    if amount_in == 0 {
        return None;
    }
    if fee_on_input {
        let trade_fee = fees::trading_fee(amount_in, trade_fee_rate)?;
        let amount_in_net = amount_in.checked_sub(trade_fee)?;
        let amount_out =
            constant_product::swap_input_amount_out(amount_in_net, input_reserve, output_reserve)?;
        if amount_in_net == 0 || amount_out == 0 {
            return None;
        }
        Some(SwapResult {
            new_input_reserve: input_reserve.checked_add(amount_in_net)?,
            new_output_reserve: output_reserve.checked_sub(amount_out)?,
            input_amount: amount_in,
            output_amount: amount_out,
            trade_fee,
            protocol_fee: fees::protocol_fee(trade_fee, protocol_fee_rate)?,
            fund_fee: fees::fund_fee(trade_fee, fund_fee_rate)?,
            fee_on_input: true,
        })
    } else {
        let gross_out =
            constant_product::swap_input_amount_out(amount_in, input_reserve, output_reserve)?;
        let trade_fee = fees::trading_fee(gross_out, trade_fee_rate)?;
        let amount_out = gross_out.checked_sub(trade_fee)?;
        if amount_out == 0 {
            return None;
        }
        Some(SwapResult {
            new_input_reserve: input_reserve.checked_add(amount_in)?,
            new_output_reserve: output_reserve.checked_sub(gross_out)?,
            input_amount: amount_in,
            output_amount: amount_out,
            trade_fee,
            protocol_fee: fees::protocol_fee(trade_fee, protocol_fee_rate)?,
            fund_fee: fees::fund_fee(trade_fee, fund_fee_rate)?,
            fee_on_input: false,
        })
    }
}

/// Prices an exact-output swap over the given pricing reserves.
///
/// `amount_out` is the amount that must leave the pool toward the user
/// before any output-side transfer fee. Returns `None` when any
/// intermediate overflows, when `amount_out` cannot be served by the
/// output reserve, or when the required input rounds to zero.
pub fn swap_exact_output(
    amount_out: u128,
    input_reserve: u128,
    output_reserve: u128,
    trade_fee_rate: FeeRate,
    protocol_fee_rate: FeeRate,
    fund_fee_rate: FeeRate,
    fee_on_input: bool,
) -> Option<SwapResult> {
    if amount_out == 0 {
        return None;
    }
    if fee_on_input {
        let amount_in_net =
            constant_product::swap_output_amount_in(amount_out, input_reserve, output_reserve)?;
        let amount_in = fees::pre_trade_fee_amount(amount_in_net, trade_fee_rate)?;
        let trade_fee = fees::trading_fee(amount_in, trade_fee_rate)?;
        // The gross-up guarantees input minus its own fee still covers
        // the curve-required net input.
        let credited = amount_in.checked_sub(trade_fee)?;
        if amount_in == 0 {
            return None;
        }
        Some(SwapResult {
            new_input_reserve: input_reserve.checked_add(credited)?,
            new_output_reserve: output_reserve.checked_sub(amount_out)?,
            input_amount: amount_in,
            output_amount: amount_out,
            trade_fee,
            protocol_fee: fees::protocol_fee(trade_fee, protocol_fee_rate)?,
            fund_fee: fees::fund_fee(trade_fee, fund_fee_rate)?,
            fee_on_input: true,
        })
    } else {
        // The pool must price the requested output plus the fee retained
        // on the output side.
        let gross_out = fees::pre_trade_fee_amount(amount_out, trade_fee_rate)?;
        let trade_fee = fees::trading_fee(gross_out, trade_fee_rate)?;
        let amount_in =
            constant_product::swap_output_amount_in(gross_out, input_reserve, output_reserve)?;
        if amount_in == 0 {
            return None;
        }
        Some(SwapResult {
            new_input_reserve: input_reserve.checked_add(amount_in)?,
            new_output_reserve: output_reserve.checked_sub(gross_out)?,
            input_amount: amount_in,
            output_amount: gross_out.checked_sub(trade_fee)?,
            trade_fee,
            protocol_fee: fees::protocol_fee(trade_fee, protocol_fee_rate)?,
            fund_fee: fees::fund_fee(trade_fee, fund_fee_rate)?,
            fee_on_input: false,
        })
    }
}
