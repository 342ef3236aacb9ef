//! Liquidity deposits and withdrawals over any [`LiquidityClaim`].

use tracing::debug;

use super::Pool;
use crate::curve::constant_product;
use crate::domain::{Amount, Rounding};
use crate::error::{AmmError, Result};
use crate::state::PoolOperation;
use crate::traits::LiquidityClaim;

/// What the hosting runtime must move to realize a deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositOutcome {
    /// LP amount credited to the claim.
    pub lp_amount: Amount,
    /// Gross token 0 the user sends, transfer fee included.
    pub amount_0: Amount,
    /// Gross token 1 the user sends, transfer fee included.
    pub amount_1: Amount,
    /// Token 0 arriving in the vault.
    pub vault_0_credit: Amount,
    /// Token 1 arriving in the vault.
    pub vault_1_credit: Amount,
}

/// What the hosting runtime must move to realize a withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithdrawOutcome {
    /// LP amount debited from the claim.
    pub lp_amount: Amount,
    /// Net token 0 the user receives, after any transfer fee.
    pub amount_0: Amount,
    /// Net token 1 the user receives, after any transfer fee.
    pub amount_1: Amount,
    /// Token 0 leaving the vault.
    pub vault_0_debit: Amount,
    /// Token 1 leaving the vault.
    pub vault_1_debit: Amount,
}

impl Pool {
    /// Deposits both tokens for a fixed LP amount.
    ///
    /// The token amounts are the claim's pro-rata share of the pricing
    /// reserves, ceiling-rounded so the pool is never underpaid, then
    /// grossed up for transfer fees on the user side. The claim is
    /// settled against the fee accumulators before its size changes.
    ///
    /// # Errors
    ///
    /// - [`AmmError::SlippageExceeded`] if a gross amount exceeds its
    ///   `maximum_amount_*` bound.
    /// - [`AmmError::ZeroTradingTokens`] if the LP amount converts to
    ///   zero of either token.
    pub fn deposit<C: LiquidityClaim>(
        &mut self,
        claim: &mut C,
        lp_amount: Amount,
        maximum_amount_0: Amount,
        maximum_amount_1: Amount,
    ) -> Result<DepositOutcome> {
        self.state.require_enabled(PoolOperation::Deposit)?;
        self.require_claim(claim)?;
        if lp_amount.is_zero() {
            return Err(AmmError::InvalidInput("deposit of zero lp amount"));
        }

        let (reserve_0, reserve_1) = self.state.pricing_reserves()?;
        let (raw_0, raw_1) = constant_product::lp_tokens_to_trading_tokens(
            lp_amount.as_u128(),
            self.state.lp_supply().as_u128(),
            reserve_0.as_u128(),
            reserve_1.as_u128(),
            Rounding::Up,
        )
        .ok_or(AmmError::Overflow("deposit conversion"))?;
        if raw_0 == 0 || raw_1 == 0 {
            return Err(AmmError::ZeroTradingTokens(
                "lp amount converts to zero of a token",
            ));
        }
        let vault_0_credit =
            Amount::try_from_u128(raw_0).ok_or(AmmError::Overflow("deposit amount"))?;
        let vault_1_credit =
            Amount::try_from_u128(raw_1).ok_or(AmmError::Overflow("deposit amount"))?;

        // Users of fee-on-transfer mints send more so the vault receives
        // the priced amounts.
        let amount_0 = vault_0_credit
            .checked_add(&self.mint_0.inverse_transfer_fee(vault_0_credit)?)
            .ok_or(AmmError::Overflow("deposit transfer fee gross-up"))?;
        let amount_1 = vault_1_credit
            .checked_add(&self.mint_1.inverse_transfer_fee(vault_1_credit)?)
            .ok_or(AmmError::Overflow("deposit transfer fee gross-up"))?;
        if amount_0 > maximum_amount_0 || amount_1 > maximum_amount_1 {
            return Err(AmmError::SlippageExceeded("deposit cost above maximum"));
        }

        claim.settle(
            self.state.fees_token_0_per_lp(),
            self.state.fees_token_1_per_lp(),
        )?;
        self.state.credit_vaults(vault_0_credit, vault_1_credit)?;
        self.state.update_lp_supply(lp_amount, true)?;
        claim.credit(lp_amount)?;

        debug!(
            pool = ?self.id,
            lp_amount = %lp_amount,
            %amount_0,
            %amount_1,
            "deposit"
        );
        Ok(DepositOutcome {
            lp_amount,
            amount_0,
            amount_1,
            vault_0_credit,
            vault_1_credit,
        })
    }

    /// Withdraws both tokens for a fixed LP amount.
    ///
    /// The token amounts are the claim's pro-rata share of the pricing
    /// reserves, floor-rounded and clamped to the reserves, then reduced
    /// by transfer fees on the user side. The claim is settled against
    /// the fee accumulators before its size changes.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientLiquidity`] if the claim holds less
    ///   than `lp_amount`.
    /// - [`AmmError::SlippageExceeded`] if a net amount falls below its
    ///   `minimum_amount_*` bound.
    /// - [`AmmError::ZeroTradingTokens`] if the LP amount converts to
    ///   zero of either token.
    pub fn withdraw<C: LiquidityClaim>(
        &mut self,
        claim: &mut C,
        lp_amount: Amount,
        minimum_amount_0: Amount,
        minimum_amount_1: Amount,
    ) -> Result<WithdrawOutcome> {
        self.state.require_enabled(PoolOperation::Withdraw)?;
        self.require_claim(claim)?;
        if lp_amount.is_zero() {
            return Err(AmmError::InvalidInput("withdrawal of zero lp amount"));
        }
        if claim.lp_amount() < lp_amount {
            return Err(AmmError::InsufficientLiquidity(
                "claim holds less than the withdrawn amount",
            ));
        }

        let (reserve_0, reserve_1) = self.state.pricing_reserves()?;
        let (raw_0, raw_1) = constant_product::lp_tokens_to_trading_tokens(
            lp_amount.as_u128(),
            self.state.lp_supply().as_u128(),
            reserve_0.as_u128(),
            reserve_1.as_u128(),
            Rounding::Down,
        )
        .ok_or(AmmError::Overflow("withdrawal conversion"))?;
        // Flooring cannot exceed the reserves, but clamp anyway so a
        // full-supply withdrawal can never touch accrued fees.
        let vault_0_debit =
            Amount::try_from_u128(raw_0.min(reserve_0.as_u128()))
                .ok_or(AmmError::Overflow("withdrawal amount"))?;
        let vault_1_debit =
            Amount::try_from_u128(raw_1.min(reserve_1.as_u128()))
                .ok_or(AmmError::Overflow("withdrawal amount"))?;
        if vault_0_debit.is_zero() || vault_1_debit.is_zero() {
            return Err(AmmError::ZeroTradingTokens(
                "lp amount converts to zero of a token",
            ));
        }

        let amount_0 = vault_0_debit
            .checked_sub(&self.mint_0.transfer_fee_on(vault_0_debit))
            .ok_or(AmmError::Underflow("withdrawal transfer fee"))?;
        let amount_1 = vault_1_debit
            .checked_sub(&self.mint_1.transfer_fee_on(vault_1_debit))
            .ok_or(AmmError::Underflow("withdrawal transfer fee"))?;
        if amount_0 < minimum_amount_0 || amount_1 < minimum_amount_1 {
            return Err(AmmError::SlippageExceeded(
                "withdrawal proceeds below minimum",
            ));
        }

        claim.settle(
            self.state.fees_token_0_per_lp(),
            self.state.fees_token_1_per_lp(),
        )?;
        claim.debit(lp_amount)?;
        self.state.debit_vaults(vault_0_debit, vault_1_debit)?;
        self.state.update_lp_supply(lp_amount, false)?;

        debug!(
            pool = ?self.id,
            lp_amount = %lp_amount,
            %amount_0,
            %amount_1,
            "withdrawal"
        );
        Ok(WithdrawOutcome {
            lp_amount,
            amount_0,
            amount_1,
            vault_0_debit,
            vault_1_debit,
        })
    }
}
