//! Pool record: reserves, LP-share accounting, fee accumulators, and the
//! status bitmask.

use crate::curve::TradeDirection;
use crate::domain::Amount;
use crate::error::{AmmError, Result};
use crate::math::CheckedArithmetic;

/// Fixed-point scale for the fee-per-share accumulators (2^64).
///
/// The scale must dominate `lp_supply`: each accrual truncates up to
/// `lp_supply / scale` fee units, so a 64-bit supply needs a 2^64 scale
/// to keep the loss below one unit per swap.
pub const Q64: u128 = 1 << 64;

/// The operations gated by the pool status bitmask.
///
/// Each operation owns one bit; a set bit means the operation is
/// disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolOperation {
    /// Liquidity deposits (bit 0).
    Deposit,
    /// Liquidity withdrawals (bit 1).
    Withdraw,
    /// Swaps in either direction (bit 2).
    Swap,
}

impl PoolOperation {
    const fn mask(self) -> u8 {
        match self {
            Self::Deposit => 1 << 0,
            Self::Withdraw => 1 << 1,
            Self::Swap => 1 << 2,
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdraw => "withdraw",
            Self::Swap => "swap",
        }
    }
}

/// Which token the trade fee is denominated in.
///
/// For mixed-standard pairs the fee accounting can be pinned to one
/// side; [`FeeMode::BothTokens`] charges whatever the input token is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FeeMode {
    /// Fee is charged on the input side of every swap.
    #[default]
    BothTokens,
    /// Fee is always denominated in token 0.
    OnlyToken0,
    /// Fee is always denominated in token 1.
    OnlyToken1,
}

/// Mutable pool accounting: vault balances, LP supply, accrued fees, and
/// the per-share fee accumulators.
///
/// The vaults hold everything the pool owns, including fees accrued but
/// not yet collected; [`PoolState::pricing_reserves`] derives the
/// amounts that actually participate in pricing by subtracting every
/// fee counter, so accrued fees can never distort the price or be
/// counted twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolState {
    vault_0: Amount,
    vault_1: Amount,
    lp_supply: Amount,
    protocol_fees_token_0: Amount,
    protocol_fees_token_1: Amount,
    fund_fees_token_0: Amount,
    fund_fees_token_1: Amount,
    lp_fees_token_0: Amount,
    lp_fees_token_1: Amount,
    fees_token_0_per_lp: u128,
    fees_token_1_per_lp: u128,
    status: u8,
    fee_mode: FeeMode,
}

impl PoolState {
    /// Creates an empty pool record with all operations enabled.
    #[must_use]
    pub fn new(fee_mode: FeeMode) -> Self {
        Self {
            fee_mode,
            ..Self::default()
        }
    }

    /// Vault balance of token 0, fees included.
    pub const fn vault_0(&self) -> Amount {
        self.vault_0
    }

    /// Vault balance of token 1, fees included.
    pub const fn vault_1(&self) -> Amount {
        self.vault_1
    }

    /// Total outstanding LP claims.
    pub const fn lp_supply(&self) -> Amount {
        self.lp_supply
    }

    /// Accrued, uncollected protocol fees.
    pub const fn protocol_fees(&self) -> (Amount, Amount) {
        (self.protocol_fees_token_0, self.protocol_fees_token_1)
    }

    /// Accrued, uncollected fund fees.
    pub const fn fund_fees(&self) -> (Amount, Amount) {
        (self.fund_fees_token_0, self.fund_fees_token_1)
    }

    /// Outstanding LP fees not yet collected through a position.
    pub const fn lp_fees(&self) -> (Amount, Amount) {
        (self.lp_fees_token_0, self.lp_fees_token_1)
    }

    /// Fee-per-share accumulator for token 0, scaled by [`Q64`].
    #[must_use]
    pub const fn fees_token_0_per_lp(&self) -> u128 {
        self.fees_token_0_per_lp
    }

    /// Fee-per-share accumulator for token 1, scaled by [`Q64`].
    #[must_use]
    pub const fn fees_token_1_per_lp(&self) -> u128 {
        self.fees_token_1_per_lp
    }

    /// The raw status bitmask.
    #[must_use]
    pub const fn status(&self) -> u8 {
        self.status
    }

    /// The fee denomination mode.
    pub const fn fee_mode(&self) -> FeeMode {
        self.fee_mode
    }

    /// Replaces the whole status bitmask.
    pub fn set_status(&mut self, status: u8) {
        self.status = status;
    }

    /// Enables or disables one operation.
    pub fn set_enabled(&mut self, operation: PoolOperation, enabled: bool) {
        if enabled {
            self.status &= !operation.mask();
        } else {
            self.status |= operation.mask();
        }
    }

    /// Returns `true` if the operation's status bit is clear.
    #[must_use]
    pub const fn is_enabled(&self, operation: PoolOperation) -> bool {
        self.status & operation.mask() == 0
    }

    /// Fails with [`AmmError::OperationDisabled`] if the operation's
    /// status bit is set.
    pub fn require_enabled(&self, operation: PoolOperation) -> Result<()> {
        if self.is_enabled(operation) {
            Ok(())
        } else {
            Err(AmmError::OperationDisabled(operation.name()))
        }
    }

    /// Whether the trade fee for a swap in `direction` is charged on the
    /// input token.
    #[must_use]
    pub const fn is_fee_on_input(&self, direction: TradeDirection) -> bool {
        matches!(
            (self.fee_mode, direction),
            (FeeMode::BothTokens, _)
                | (FeeMode::OnlyToken0, TradeDirection::ZeroForOne)
                | (FeeMode::OnlyToken1, TradeDirection::OneForZero)
        )
    }

    /// Vault balances with every accrued fee excluded: the reserves that
    /// participate in pricing.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Underflow`] if a vault does not cover its fee
    /// counters, which indicates corrupted state.
    pub fn pricing_reserves(&self) -> Result<(Amount, Amount)> {
        let fees_0 = self
            .protocol_fees_token_0
            .safe_add(&self.fund_fees_token_0)?
            .safe_add(&self.lp_fees_token_0)?;
        let fees_1 = self
            .protocol_fees_token_1
            .safe_add(&self.fund_fees_token_1)?
            .safe_add(&self.lp_fees_token_1)?;
        Ok((self.vault_0.safe_sub(&fees_0)?, self.vault_1.safe_sub(&fees_1)?))
    }

    /// Adds or removes LP supply.
    pub fn update_lp_supply(&mut self, delta: Amount, add: bool) -> Result<()> {
        self.lp_supply = if add {
            self.lp_supply.safe_add(&delta)?
        } else {
            self.lp_supply.safe_sub(&delta)?
        };
        Ok(())
    }

    pub(crate) fn credit_vaults(&mut self, delta_0: Amount, delta_1: Amount) -> Result<()> {
        let vault_0 = self.vault_0.safe_add(&delta_0)?;
        let vault_1 = self.vault_1.safe_add(&delta_1)?;
        self.vault_0 = vault_0;
        self.vault_1 = vault_1;
        Ok(())
    }

    pub(crate) fn debit_vaults(&mut self, delta_0: Amount, delta_1: Amount) -> Result<()> {
        let vault_0 = self.vault_0.safe_sub(&delta_0)?;
        let vault_1 = self.vault_1.safe_sub(&delta_1)?;
        self.vault_0 = vault_0;
        self.vault_1 = vault_1;
        Ok(())
    }

    /// Accrues one swap's fee split on the fee-side token and advances
    /// the per-share accumulator by the LP share.
    ///
    /// The accumulator increment is skipped when `lp_supply` is zero,
    /// leaving the per-share value unchanged.
    pub(crate) fn accrue_swap_fees(
        &mut self,
        fee_on_token_0: bool,
        protocol_fee: Amount,
        fund_fee: Amount,
        lp_fee: Amount,
    ) -> Result<()> {
        let per_lp_delta = if self.lp_supply.is_zero() {
            0
        } else {
            lp_fee
                .as_u128()
                .checked_mul(Q64)
                .ok_or(AmmError::Overflow("fee-per-share increment"))?
                / self.lp_supply.as_u128()
        };
        if fee_on_token_0 {
            self.protocol_fees_token_0 = self.protocol_fees_token_0.safe_add(&protocol_fee)?;
            self.fund_fees_token_0 = self.fund_fees_token_0.safe_add(&fund_fee)?;
            self.lp_fees_token_0 = self.lp_fees_token_0.safe_add(&lp_fee)?;
            self.fees_token_0_per_lp = self
                .fees_token_0_per_lp
                .checked_add(per_lp_delta)
                .ok_or(AmmError::Overflow("fee-per-share accumulator"))?;
        } else {
            self.protocol_fees_token_1 = self.protocol_fees_token_1.safe_add(&protocol_fee)?;
            self.fund_fees_token_1 = self.fund_fees_token_1.safe_add(&fund_fee)?;
            self.lp_fees_token_1 = self.lp_fees_token_1.safe_add(&lp_fee)?;
            self.fees_token_1_per_lp = self
                .fees_token_1_per_lp
                .checked_add(per_lp_delta)
                .ok_or(AmmError::Overflow("fee-per-share accumulator"))?;
        }
        Ok(())
    }

    /// Zeroes the protocol fee counters and returns what they held.
    pub(crate) fn drain_protocol_fees(&mut self) -> (Amount, Amount) {
        let drained = (self.protocol_fees_token_0, self.protocol_fees_token_1);
        self.protocol_fees_token_0 = Amount::ZERO;
        self.protocol_fees_token_1 = Amount::ZERO;
        drained
    }

    /// Zeroes the fund fee counters and returns what they held.
    pub(crate) fn drain_fund_fees(&mut self) -> (Amount, Amount) {
        let drained = (self.fund_fees_token_0, self.fund_fees_token_1);
        self.fund_fees_token_0 = Amount::ZERO;
        self.fund_fees_token_1 = Amount::ZERO;
        drained
    }

    /// Zeroes the outstanding LP fee counters and returns what they
    /// held.
    pub(crate) fn drain_lp_fees(&mut self) -> (Amount, Amount) {
        let drained = (self.lp_fees_token_0, self.lp_fees_token_1);
        self.lp_fees_token_0 = Amount::ZERO;
        self.lp_fees_token_1 = Amount::ZERO;
        drained
    }

    /// Reduces the outstanding LP fee counters by amounts collected
    /// through a position.
    pub(crate) fn deduct_lp_fees(&mut self, owed_0: Amount, owed_1: Amount) -> Result<()> {
        let lp_fees_0 = self.lp_fees_token_0.safe_sub(&owed_0)?;
        let lp_fees_1 = self.lp_fees_token_1.safe_sub(&owed_1)?;
        self.lp_fees_token_0 = lp_fees_0;
        self.lp_fees_token_1 = lp_fees_1;
        Ok(())
    }
}
