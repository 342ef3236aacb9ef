//! Fee-on-transfer formula, as observed from the token standard.
//!
//! The engine does not implement the transfer-fee extension; it consumes
//! the extension's externally observable formula so it can gross amounts
//! up before requesting a transfer and net them out after one.

use super::Amount;
use crate::error::{AmmError, Result};

/// Basis-point denominator for transfer fees: 10,000 = 100%.
pub const MAX_FEE_BASIS_POINTS: u16 = 10_000;

/// A mint's fee-on-transfer configuration: a basis-point rate with a flat
/// per-transfer cap.
///
/// `calculate_fee` uses ceiling division so the fee never undercharges;
/// `calculate_pre_fee_amount` is its inverse, with one documented
/// exception: when the flat cap binds, the inverse is not exact, because
/// a grossed-up amount can still be charged the full cap. Callers must
/// tolerate that discrepancy explicitly (slippage bounds do this for the
/// pool operations).
///
/// # Examples
///
/// ```
/// use basin_amm::domain::{Amount, TransferFee};
///
/// let fee = TransferFee::new(100, Amount::new(1_000_000))?; // 1%, capped
/// assert_eq!(fee.calculate_fee(Amount::new(10_000)), Amount::new(100));
/// # Ok::<(), basin_amm::error::AmmError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransferFee {
    basis_points: u16,
    maximum_fee: Amount,
}

impl TransferFee {
    /// Creates a transfer-fee configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFeeConfig`] if `basis_points` exceeds
    /// [`MAX_FEE_BASIS_POINTS`].
    pub const fn new(basis_points: u16, maximum_fee: Amount) -> Result<Self> {
        if basis_points > MAX_FEE_BASIS_POINTS {
            return Err(AmmError::InvalidFeeConfig(
                "transfer fee above 10000 basis points",
            ));
        }
        Ok(Self {
            basis_points,
            maximum_fee,
        })
    }

    /// Returns the basis-point rate.
    #[must_use]
    pub const fn basis_points(&self) -> u16 {
        self.basis_points
    }

    /// Returns the flat per-transfer cap.
    pub const fn maximum_fee(&self) -> Amount {
        self.maximum_fee
    }

    /// The fee deducted by the transfer layer when `amount` is sent.
    ///
    /// `min(maximum_fee, ceil(amount * basis_points / 10_000))`; zero for
    /// a zero rate. Always `<= amount` and `<= maximum_fee`.
    pub fn calculate_fee(&self, amount: Amount) -> Amount {
        if self.basis_points == 0 || amount.is_zero() {
            return Amount::ZERO;
        }
        let bps = u128::from(self.basis_points);
        let denominator = u128::from(MAX_FEE_BASIS_POINTS);
        // Ceiling division; the product of a u64 and 10_000 fits u128.
        let raw = (amount.as_u128() * bps + denominator - 1) / denominator;
        // raw <= amount because bps <= denominator.
        let raw = Amount::new(raw as u64);
        raw.min(self.maximum_fee)
    }

    /// The minimal send amount such that, after the transfer layer
    /// deducts [`Self::calculate_fee`], at least `post_fee_amount`
    /// arrives.
    ///
    /// When the flat cap binds, the result is `post_fee_amount +
    /// maximum_fee`, which can overshoot the intended net amount: the
    /// inverse is not exact in that regime and callers must special-case
    /// it rather than assume equality.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the grossed-up amount does not
    /// fit in 64 bits.
    pub fn calculate_pre_fee_amount(&self, post_fee_amount: Amount) -> Result<Amount> {
        if self.basis_points == 0 || post_fee_amount.is_zero() {
            return Ok(post_fee_amount);
        }
        if self.basis_points == MAX_FEE_BASIS_POINTS {
            return post_fee_amount
                .checked_add(&self.maximum_fee)
                .ok_or(AmmError::Overflow("pre-fee amount at maximum rate"));
        }
        let denominator = u128::from(MAX_FEE_BASIS_POINTS);
        let net_rate = denominator - u128::from(self.basis_points);
        let raw = (post_fee_amount.as_u128() * denominator + net_rate - 1) / net_rate;
        let fee = raw - post_fee_amount.as_u128();
        if fee >= self.maximum_fee.as_u128() {
            post_fee_amount
                .checked_add(&self.maximum_fee)
                .ok_or(AmmError::Overflow("pre-fee amount at capped fee"))
        } else {
            Amount::try_from_u128(raw).ok_or(AmmError::Overflow("pre-fee amount"))
        }
    }

    /// The fee portion of [`Self::calculate_pre_fee_amount`], i.e. how
    /// much must be sent on top of `post_fee_amount`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the grossed-up amount does not
    /// fit in 64 bits.
    pub fn calculate_inverse_fee(&self, post_fee_amount: Amount) -> Result<Amount> {
        let pre = self.calculate_pre_fee_amount(post_fee_amount)?;
        pre.checked_sub(&post_fee_amount)
            .ok_or(AmmError::Underflow("inverse fee"))
    }
}
