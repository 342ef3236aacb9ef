//! NFT-backed position record with explicit fee accrual.

use crate::domain::{Amount, MintId, PoolId};
use crate::error::{AmmError, Result};
use crate::state::pool::Q64;
use crate::traits::LiquidityClaim;

/// A liquidity position owned through an NFT.
///
/// Unlike a fungible LP balance, a position tracks the LP fees its
/// share earned: at every liquidity change the pool's fee-per-share
/// accumulators are folded into `fees_owed_*` via
/// [`LiquidityClaim::settle`], and the owner collects the owed amounts
/// out of the vaults separately from the principal.
///
/// Settlement is lazy. Between settlements the owed balances are stale;
/// they are always brought current before the LP amount changes, so the
/// delta `accumulator - snapshot` is applied at the share size that
/// earned it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    nft_mint: MintId,
    pool_id: PoolId,
    lp_amount: Amount,
    fees_owed_token_0: Amount,
    fees_owed_token_1: Amount,
    fees_token_0_per_lp_last: u128,
    fees_token_1_per_lp_last: u128,
}

impl Position {
    /// Opens an empty position, snapshotting the pool's current
    /// accumulators so no fees from before the open are attributed to
    /// it.
    #[must_use]
    pub const fn open(
        nft_mint: MintId,
        pool_id: PoolId,
        fees_token_0_per_lp: u128,
        fees_token_1_per_lp: u128,
    ) -> Self {
        Self {
            nft_mint,
            pool_id,
            lp_amount: Amount::ZERO,
            fees_owed_token_0: Amount::ZERO,
            fees_owed_token_1: Amount::ZERO,
            fees_token_0_per_lp_last: fees_token_0_per_lp,
            fees_token_1_per_lp_last: fees_token_1_per_lp,
        }
    }

    /// The NFT that owns this position.
    pub const fn nft_mint(&self) -> MintId {
        self.nft_mint
    }

    /// Settled but uncollected fees, `(token_0, token_1)`.
    pub const fn fees_owed(&self) -> (Amount, Amount) {
        (self.fees_owed_token_0, self.fees_owed_token_1)
    }

    /// Accumulator snapshots from the last settlement.
    #[must_use]
    pub const fn fee_snapshots(&self) -> (u128, u128) {
        (self.fees_token_0_per_lp_last, self.fees_token_1_per_lp_last)
    }

    /// A position can be closed once nothing is left in it.
    #[must_use]
    pub const fn is_closable(&self) -> bool {
        self.lp_amount.is_zero()
            && self.fees_owed_token_0.is_zero()
            && self.fees_owed_token_1.is_zero()
    }

    /// Zeroes the owed balances and returns what they held.
    pub(crate) fn take_fees_owed(&mut self) -> (Amount, Amount) {
        let owed = (self.fees_owed_token_0, self.fees_owed_token_1);
        self.fees_owed_token_0 = Amount::ZERO;
        self.fees_owed_token_1 = Amount::ZERO;
        owed
    }

    fn pending(&self, accumulator: u128, snapshot: u128) -> Result<Amount> {
        let delta = accumulator
            .checked_sub(snapshot)
            .ok_or(AmmError::Underflow("fee accumulator regressed"))?;
        let earned = self
            .lp_amount
            .as_u128()
            .checked_mul(delta)
            .ok_or(AmmError::Overflow("pending fee product"))?
            / Q64;
        Amount::try_from_u128(earned).ok_or(AmmError::Overflow("pending fee amount"))
    }
}

impl LiquidityClaim for Position {
    fn pool_id(&self) -> PoolId {
        self.pool_id
    }

    fn lp_amount(&self) -> Amount {
        self.lp_amount
    }

    fn settle(&mut self, fees_token_0_per_lp: u128, fees_token_1_per_lp: u128) -> Result<()> {
        if !self.lp_amount.is_zero() {
            let pending_0 = self.pending(fees_token_0_per_lp, self.fees_token_0_per_lp_last)?;
            let pending_1 = self.pending(fees_token_1_per_lp, self.fees_token_1_per_lp_last)?;
            self.fees_owed_token_0 = self
                .fees_owed_token_0
                .checked_add(&pending_0)
                .ok_or(AmmError::Overflow("fees owed token 0"))?;
            self.fees_owed_token_1 = self
                .fees_owed_token_1
                .checked_add(&pending_1)
                .ok_or(AmmError::Overflow("fees owed token 1"))?;
        }
        // Snapshots advance even at zero size, so fees accrued while the
        // position was empty are never attributed to it.
        self.fees_token_0_per_lp_last = fees_token_0_per_lp;
        self.fees_token_1_per_lp_last = fees_token_1_per_lp;
        Ok(())
    }

    fn credit(&mut self, lp_amount: Amount) -> Result<()> {
        self.lp_amount = self
            .lp_amount
            .checked_add(&lp_amount)
            .ok_or(AmmError::Overflow("position lp amount"))?;
        Ok(())
    }

    fn debit(&mut self, lp_amount: Amount) -> Result<()> {
        self.lp_amount = self
            .lp_amount
            .checked_sub(&lp_amount)
            .ok_or(AmmError::InsufficientLiquidity(
                "position holds less than the debited amount",
            ))?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn position() -> Position {
        Position::open(
            MintId::from_bytes([9; 32]),
            PoolId::from_bytes([1; 32]),
            0,
            0,
        )
    }

    #[test]
    fn open_is_empty_and_closable() {
        let p = position();
        assert_eq!(p.lp_amount(), Amount::ZERO);
        assert_eq!(p.fees_owed(), (Amount::ZERO, Amount::ZERO));
        assert!(p.is_closable());
    }

    #[test]
    fn settle_accrues_pro_rata() {
        let mut p = position();
        let Ok(()) = p.credit(Amount::new(1_000)) else {
            panic!("credit failed");
        };
        // 500 fee units spread over 1_000 shares.
        let per_lp = 500 * Q64 / 1_000;
        let Ok(()) = p.settle(per_lp, 0) else {
            panic!("settle failed");
        };
        assert_eq!(p.fees_owed(), (Amount::new(500), Amount::ZERO));
        assert_eq!(p.fee_snapshots(), (per_lp, 0));
    }

    #[test]
    fn settle_at_zero_size_only_moves_snapshots() {
        let mut p = position();
        let Ok(()) = p.settle(7 * Q64, 3 * Q64) else {
            panic!("settle failed");
        };
        assert_eq!(p.fees_owed(), (Amount::ZERO, Amount::ZERO));
        assert_eq!(p.fee_snapshots(), (7 * Q64, 3 * Q64));
    }

    #[test]
    fn settle_is_idempotent_at_same_accumulator() {
        let mut p = position();
        let Ok(()) = p.credit(Amount::new(100)) else {
            panic!("credit failed");
        };
        let Ok(()) = p.settle(Q64, Q64) else {
            panic!("settle failed");
        };
        let Ok(()) = p.settle(Q64, Q64) else {
            panic!("settle failed");
        };
        assert_eq!(p.fees_owed(), (Amount::new(100), Amount::new(100)));
    }

    #[test]
    fn take_fees_owed_zeroes() {
        let mut p = position();
        let Ok(()) = p.credit(Amount::new(10)) else {
            panic!("credit failed");
        };
        let Ok(()) = p.settle(Q64, 0) else {
            panic!("settle failed");
        };
        assert_eq!(p.take_fees_owed(), (Amount::new(10), Amount::ZERO));
        assert_eq!(p.fees_owed(), (Amount::ZERO, Amount::ZERO));
    }

    #[test]
    fn debit_below_balance_fails() {
        let mut p = position();
        let Ok(()) = p.credit(Amount::new(5)) else {
            panic!("credit failed");
        };
        let Err(AmmError::InsufficientLiquidity(_)) = p.debit(Amount::new(6)) else {
            panic!("expected InsufficientLiquidity");
        };
        let Ok(()) = p.debit(Amount::new(5)) else {
            panic!("debit failed");
        };
        assert!(p.is_closable());
    }

    #[test]
    fn not_closable_with_owed_fees() {
        let mut p = position();
        let Ok(()) = p.credit(Amount::new(10)) else {
            panic!("credit failed");
        };
        let Ok(()) = p.settle(Q64, 0) else {
            panic!("settle failed");
        };
        let Ok(()) = p.debit(Amount::new(10)) else {
            panic!("debit failed");
        };
        assert!(!p.is_closable());
        let _ = p.take_fees_owed();
        assert!(p.is_closable());
    }

    #[test]
    fn regressed_accumulator_is_an_error() {
        let mut p = position();
        let Ok(()) = p.credit(Amount::new(10)) else {
            panic!("credit failed");
        };
        let Ok(()) = p.settle(Q64, Q64) else {
            panic!("settle failed");
        };
        let Err(AmmError::Underflow(_)) = p.settle(0, Q64) else {
            panic!("expected Underflow");
        };
    }
}
