//! Swap execution: status gates, transfer-fee legs, curve pricing, and
//! state mutation.

use tracing::debug;

use super::Pool;
use crate::curve::{self, SwapResult, TradeDirection};
use crate::domain::{Amount, TokenMint};
use crate::error::{AmmError, Result};
use crate::state::PoolOperation;

/// What the hosting runtime must move to realize one swap.
///
/// `amount_in` is the user-side gross input, including any input-mint
/// transfer fee; `amount_received` is what actually lands in the user's
/// account after any output-mint transfer fee. The vault fields are the
/// pool-side movements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapOutcome {
    /// Direction the trade was executed in.
    pub direction: TradeDirection,
    /// Gross amount the user sends.
    pub amount_in: Amount,
    /// Net amount the user receives.
    pub amount_received: Amount,
    /// Amount credited to the input-side vault.
    pub vault_in_credit: Amount,
    /// Amount debited from the output-side vault.
    pub vault_out_debit: Amount,
    /// Total trade fee, in the fee-side token.
    pub trade_fee: Amount,
    /// Protocol share of the trade fee.
    pub protocol_fee: Amount,
    /// Fund share of the trade fee.
    pub fund_fee: Amount,
    /// LP share of the trade fee.
    pub lp_fee: Amount,
}

impl Pool {
    /// Swaps a fixed input for as much output as the curve allows.
    ///
    /// `amount_in` is the gross user-side amount; the input mint's
    /// transfer fee is deducted before pricing. Fails with
    /// [`AmmError::SlippageExceeded`] if the net received amount falls
    /// below `minimum_amount_out`.
    pub fn swap_exact_input(
        &mut self,
        direction: TradeDirection,
        amount_in: Amount,
        minimum_amount_out: Amount,
    ) -> Result<SwapOutcome> {
        self.state.require_enabled(PoolOperation::Swap)?;
        let (input_mint, output_mint) = self.oriented_mints(direction);

        let actual_in = amount_in
            .checked_sub(&input_mint.transfer_fee_on(amount_in))
            .ok_or(AmmError::Underflow("input transfer fee"))?;
        if actual_in.is_zero() {
            return Err(AmmError::ZeroTradingTokens(
                "swap input nets to zero after transfer fee",
            ));
        }

        let (input_reserve, output_reserve) = self.oriented_reserves(direction)?;
        let result = curve::swap_exact_input(
            actual_in.as_u128(),
            input_reserve,
            output_reserve,
            self.config.trade_fee_rate(),
            self.config.protocol_fee_rate(),
            self.config.fund_fee_rate(),
            self.state.is_fee_on_input(direction),
        )
        .ok_or(AmmError::ZeroTradingTokens("swap amounts round to zero"))?;
        self.check_invariant(&result, input_reserve, output_reserve)?;

        let vault_out_debit = Amount::try_from_u128(result.output_amount)
            .ok_or(AmmError::Overflow("swap output"))?;
        let amount_received = vault_out_debit
            .checked_sub(&output_mint.transfer_fee_on(vault_out_debit))
            .ok_or(AmmError::Underflow("output transfer fee"))?;
        if amount_received.is_zero() {
            return Err(AmmError::ZeroTradingTokens(
                "swap output nets to zero after transfer fee",
            ));
        }
        if amount_received < minimum_amount_out {
            return Err(AmmError::SlippageExceeded(
                "received amount below minimum",
            ));
        }

        let outcome = self.commit_swap(direction, amount_in, amount_received, &result)?;
        debug!(
            pool = ?self.id,
            ?direction,
            amount_in = %outcome.amount_in,
            amount_received = %outcome.amount_received,
            trade_fee = %outcome.trade_fee,
            "exact-input swap"
        );
        Ok(outcome)
    }

    /// Swaps as little input as the curve allows for a fixed output.
    ///
    /// `amount_out` is the net user-side amount; both the output mint's
    /// transfer fee and the trade fee are grossed up on top of it, and
    /// the input mint's transfer fee is grossed up onto the required
    /// input. Fails with [`AmmError::SlippageExceeded`] if the gross
    /// input exceeds `maximum_amount_in`.
    pub fn swap_exact_output(
        &mut self,
        direction: TradeDirection,
        amount_out: Amount,
        maximum_amount_in: Amount,
    ) -> Result<SwapOutcome> {
        self.state.require_enabled(PoolOperation::Swap)?;
        if amount_out.is_zero() {
            return Err(AmmError::ZeroTradingTokens("swap output of zero"));
        }
        let (input_mint, output_mint) = self.oriented_mints(direction);

        // The pool must send enough that the output transfer fee still
        // leaves the requested amount.
        let pool_must_send = amount_out
            .checked_add(&output_mint.inverse_transfer_fee(amount_out)?)
            .ok_or(AmmError::Overflow("output transfer fee gross-up"))?;

        let (input_reserve, output_reserve) = self.oriented_reserves(direction)?;
        let result = curve::swap_exact_output(
            pool_must_send.as_u128(),
            input_reserve,
            output_reserve,
            self.config.trade_fee_rate(),
            self.config.protocol_fee_rate(),
            self.config.fund_fee_rate(),
            self.state.is_fee_on_input(direction),
        )
        .ok_or(AmmError::InsufficientLiquidity(
            "requested output cannot be served by the reserves",
        ))?;
        self.check_invariant(&result, input_reserve, output_reserve)?;

        let pool_receives = Amount::try_from_u128(result.input_amount)
            .ok_or(AmmError::Overflow("swap input"))?;
        let amount_in = pool_receives
            .checked_add(&input_mint.inverse_transfer_fee(pool_receives)?)
            .ok_or(AmmError::Overflow("input transfer fee gross-up"))?;
        if amount_in > maximum_amount_in {
            return Err(AmmError::SlippageExceeded("required input above maximum"));
        }

        let vault_out_debit = Amount::try_from_u128(result.output_amount)
            .ok_or(AmmError::Overflow("swap output"))?;
        let amount_received = vault_out_debit
            .checked_sub(&output_mint.transfer_fee_on(vault_out_debit))
            .ok_or(AmmError::Underflow("output transfer fee"))?;

        let outcome = self.commit_swap(direction, amount_in, amount_received, &result)?;
        debug!(
            pool = ?self.id,
            ?direction,
            amount_in = %outcome.amount_in,
            amount_received = %outcome.amount_received,
            trade_fee = %outcome.trade_fee,
            "exact-output swap"
        );
        Ok(outcome)
    }

    fn oriented_mints(&self, direction: TradeDirection) -> (&TokenMint, &TokenMint) {
        match direction {
            TradeDirection::ZeroForOne => (&self.mint_0, &self.mint_1),
            TradeDirection::OneForZero => (&self.mint_1, &self.mint_0),
        }
    }

    fn oriented_reserves(&self, direction: TradeDirection) -> Result<(u128, u128)> {
        let (reserve_0, reserve_1) = self.state.pricing_reserves()?;
        let oriented = match direction {
            TradeDirection::ZeroForOne => (reserve_0.as_u128(), reserve_1.as_u128()),
            TradeDirection::OneForZero => (reserve_1.as_u128(), reserve_0.as_u128()),
        };
        if oriented.0 == 0 || oriented.1 == 0 {
            return Err(AmmError::InsufficientLiquidity("empty pricing reserve"));
        }
        Ok(oriented)
    }

    fn check_invariant(
        &self,
        result: &SwapResult,
        input_reserve: u128,
        output_reserve: u128,
    ) -> Result<()> {
        let before = input_reserve
            .checked_mul(output_reserve)
            .ok_or(AmmError::Overflow("invariant product"))?;
        let after = result
            .new_input_reserve
            .checked_mul(result.new_output_reserve)
            .ok_or(AmmError::Overflow("invariant product"))?;
        if after < before {
            return Err(AmmError::InvariantViolation("constant product decreased"));
        }
        Ok(())
    }

    fn commit_swap(
        &mut self,
        direction: TradeDirection,
        amount_in: Amount,
        amount_received: Amount,
        result: &SwapResult,
    ) -> Result<SwapOutcome> {
        let vault_in_credit = Amount::try_from_u128(result.input_amount)
            .ok_or(AmmError::Overflow("vault credit"))?;
        let vault_out_debit = Amount::try_from_u128(result.output_amount)
            .ok_or(AmmError::Overflow("vault debit"))?;
        let trade_fee =
            Amount::try_from_u128(result.trade_fee).ok_or(AmmError::Overflow("trade fee"))?;
        let protocol_fee = Amount::try_from_u128(result.protocol_fee)
            .ok_or(AmmError::Overflow("protocol fee"))?;
        let fund_fee =
            Amount::try_from_u128(result.fund_fee).ok_or(AmmError::Overflow("fund fee"))?;
        let lp_fee =
            Amount::try_from_u128(result.lp_fee()).ok_or(AmmError::Overflow("lp fee"))?;

        match direction {
            TradeDirection::ZeroForOne => {
                self.state.credit_vaults(vault_in_credit, Amount::ZERO)?;
                self.state.debit_vaults(Amount::ZERO, vault_out_debit)?;
            }
            TradeDirection::OneForZero => {
                self.state.credit_vaults(Amount::ZERO, vault_in_credit)?;
                self.state.debit_vaults(vault_out_debit, Amount::ZERO)?;
            }
        }
        let fee_on_token_0 = match direction {
            TradeDirection::ZeroForOne => result.fee_on_input,
            TradeDirection::OneForZero => !result.fee_on_input,
        };
        self.state
            .accrue_swap_fees(fee_on_token_0, protocol_fee, fund_fee, lp_fee)?;

        Ok(SwapOutcome {
            direction,
            amount_in,
            amount_received,
            vault_in_credit,
            vault_out_debit,
            trade_fee,
            protocol_fee,
            fund_fee,
            lp_fee,
        })
    }
}
