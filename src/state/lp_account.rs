//! Fungible LP-token balance.

use crate::domain::{Amount, PoolId};
use crate::error::{AmmError, Result};
use crate::traits::LiquidityClaim;

/// A plain LP-token balance for one pool.
///
/// A fungible balance carries no fee bookkeeping, so
/// [`LiquidityClaim::settle`] is a no-op here. Swap fees accrue to the
/// pool's outstanding LP-fee counters, which only a
/// [`Position`](crate::state::Position) settles against; pricing
/// excludes the counters, so a fungible withdrawal returns principal at
/// the fee-free reserves. A host that issues only fungible claims
/// drains the counters with
/// [`Pool::collect_lp_fees`](crate::engine::Pool::collect_lp_fees) and
/// distributes the proceeds to holders itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FungibleLpAccount {
    pool_id: PoolId,
    amount: Amount,
}

impl FungibleLpAccount {
    /// Creates an empty balance for `pool_id`.
    #[must_use]
    pub const fn new(pool_id: PoolId) -> Self {
        Self {
            pool_id,
            amount: Amount::ZERO,
        }
    }
}

impl LiquidityClaim for FungibleLpAccount {
    fn pool_id(&self) -> PoolId {
        self.pool_id
    }

    fn lp_amount(&self) -> Amount {
        self.amount
    }

    fn settle(&mut self, _fees_token_0_per_lp: u128, _fees_token_1_per_lp: u128) -> Result<()> {
        Ok(())
    }

    fn credit(&mut self, lp_amount: Amount) -> Result<()> {
        self.amount = self
            .amount
            .checked_add(&lp_amount)
            .ok_or(AmmError::Overflow("lp account balance"))?;
        Ok(())
    }

    fn debit(&mut self, lp_amount: Amount) -> Result<()> {
        self.amount = self
            .amount
            .checked_sub(&lp_amount)
            .ok_or(AmmError::InsufficientLiquidity(
                "lp account holds less than the debited amount",
            ))?;
        Ok(())
    }
}
