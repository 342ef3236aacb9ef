//! Token mint description consumed by pool operations.

use super::{Amount, MintId, TransferFee};
use crate::error::{AmmError, Result};

/// A token mint as the engine sees it: an identity plus, for
/// fee-on-transfer mints, the externally observable fee configuration.
///
/// Plain mints carry no transfer-fee configuration and every fee query
/// returns zero.
///
/// # Examples
///
/// ```
/// use basin_amm::domain::{Amount, MintId, TokenMint, TransferFee};
///
/// let plain = TokenMint::new(MintId::from_bytes([1u8; 32]));
/// assert_eq!(plain.transfer_fee_on(Amount::new(1_000)), Amount::ZERO);
///
/// let taxed = TokenMint::with_transfer_fee(
///     MintId::from_bytes([2u8; 32]),
///     TransferFee::new(100, Amount::new(5_000))?,
/// );
/// assert_eq!(taxed.transfer_fee_on(Amount::new(1_000)), Amount::new(10));
/// # Ok::<(), basin_amm::error::AmmError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenMint {
    id: MintId,
    transfer_fee: Option<TransferFee>,
}

impl TokenMint {
    /// Creates a plain mint with no transfer fee.
    #[must_use]
    pub const fn new(id: MintId) -> Self {
        Self {
            id,
            transfer_fee: None,
        }
    }

    /// Creates a fee-on-transfer mint.
    #[must_use]
    pub const fn with_transfer_fee(id: MintId, transfer_fee: TransferFee) -> Self {
        Self {
            id,
            transfer_fee: Some(transfer_fee),
        }
    }

    /// Returns the mint identity.
    #[must_use]
    pub const fn id(&self) -> MintId {
        self.id
    }

    /// Returns the transfer-fee configuration, if the mint charges one.
    #[must_use]
    pub const fn transfer_fee(&self) -> Option<TransferFee> {
        self.transfer_fee
    }

    /// The fee deducted when `amount` is transferred; zero for plain
    /// mints.
    pub fn transfer_fee_on(&self, amount: Amount) -> Amount {
        match self.transfer_fee {
            Some(fee) => fee.calculate_fee(amount),
            None => Amount::ZERO,
        }
    }

    /// The extra amount that must be sent so that at least
    /// `post_fee_amount` arrives; zero for plain mints.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidInput`] if `post_fee_amount` is zero on
    /// a fee-charging mint, and [`AmmError::Overflow`] if the grossed-up
    /// amount does not fit in 64 bits.
    pub fn inverse_transfer_fee(&self, post_fee_amount: Amount) -> Result<Amount> {
        let Some(fee) = self.transfer_fee else {
            return Ok(Amount::ZERO);
        };
        if post_fee_amount.is_zero() {
            return Err(AmmError::InvalidInput("inverse fee of zero amount"));
        }
        fee.calculate_inverse_fee(post_fee_amount)
    }
}
