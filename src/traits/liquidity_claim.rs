//! The claim abstraction shared by both ownership models.

use crate::domain::{Amount, PoolId};
use crate::error::Result;

/// A claim on a share of a pool's liquidity.
///
/// The liquidity engine deposits into and withdraws from any claim
/// through this trait, so both ownership models go through one code
/// path:
///
/// - [`FungibleLpAccount`](crate::state::FungibleLpAccount): a plain
///   balance of LP tokens with no per-holder fee bookkeeping, so
///   [`settle`](Self::settle) has nothing to do. Its share of the LP
///   fees stays in the pool's outstanding counters until drained at
///   the pool level.
/// - [`Position`](crate::state::Position): an NFT-backed record that
///   accrues its pro-rata share of LP fees explicitly;
///   [`settle`](Self::settle) folds the pool's fee-per-share
///   accumulators into its owed balances.
pub trait LiquidityClaim {
    /// The pool this claim belongs to.
    fn pool_id(&self) -> PoolId;

    /// LP amount currently held by the claim.
    fn lp_amount(&self) -> Amount;

    /// Brings the claim's fee bookkeeping up to date against the pool's
    /// current fee-per-share accumulators.
    ///
    /// Must be called before any change to the claim's LP amount, so
    /// fees earned at the old share size are not recomputed at the new
    /// one.
    fn settle(&mut self, fees_token_0_per_lp: u128, fees_token_1_per_lp: u128) -> Result<()>;

    /// Adds LP amount to the claim.
    fn credit(&mut self, lp_amount: Amount) -> Result<()>;

    /// Removes LP amount from the claim.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientLiquidity`](crate::error::AmmError::InsufficientLiquidity)
    /// if the claim holds less than `lp_amount`.
    fn debit(&mut self, lp_amount: Amount) -> Result<()>;
}
