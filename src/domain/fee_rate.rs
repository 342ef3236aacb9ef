//! Trade/protocol/fund fee rate over a fixed millionths denominator.

use core::fmt;

use crate::error::{AmmError, Result};

/// The fixed-point denominator for [`FeeRate`]: rates are expressed in
/// millionths, so a rate of `2_500` is 0.25%.
pub const FEE_RATE_DENOMINATOR: u32 = 1_000_000;

/// A fee rate in millionths, validated to be strictly below the
/// denominator.
///
/// Used for the trade fee charged on swaps and for the protocol/fund
/// shares carved out of that trade fee.
///
/// # Examples
///
/// ```
/// use basin_amm::domain::FeeRate;
///
/// let rate = FeeRate::new(2_500)?; // 0.25%
/// assert_eq!(rate.get(), 2_500);
/// # Ok::<(), basin_amm::error::AmmError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct FeeRate(u32);

impl FeeRate {
    /// Zero rate.
    pub const ZERO: Self = Self(0);

    /// Creates a new `FeeRate`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFeeConfig`] if `millionths` is not
    /// strictly below [`FEE_RATE_DENOMINATOR`]. A 100% rate would make
    /// the pre-fee inverse divide by zero.
    pub const fn new(millionths: u32) -> Result<Self> {
        if millionths >= FEE_RATE_DENOMINATOR {
            return Err(AmmError::InvalidFeeConfig("fee rate at or above 100%"));
        }
        Ok(Self(millionths))
    }

    /// Returns the rate in millionths.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns `true` if the rate is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for FeeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, FEE_RATE_DENOMINATOR)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn new_valid() {
        let Ok(rate) = FeeRate::new(2_500) else {
            panic!("expected Ok");
        };
        assert_eq!(rate.get(), 2_500);
    }

    #[test]
    fn new_at_denominator_rejected() {
        let err = FeeRate::new(FEE_RATE_DENOMINATOR);
        let Err(AmmError::InvalidFeeConfig(_)) = err else {
            panic!("expected InvalidFeeConfig");
        };
    }

    #[test]
    fn new_above_denominator_rejected() {
        assert!(FeeRate::new(FEE_RATE_DENOMINATOR + 1).is_err());
    }

    #[test]
    fn max_valid_rate() {
        assert!(FeeRate::new(FEE_RATE_DENOMINATOR - 1).is_ok());
    }

    #[test]
    fn zero() {
        assert!(FeeRate::ZERO.is_zero());
        let Ok(rate) = FeeRate::new(0) else {
            panic!("expected Ok");
        };
        assert_eq!(rate, FeeRate::ZERO);
    }

    #[test]
    fn display() {
        let Ok(rate) = FeeRate::new(2_500) else {
            panic!("expected Ok");
        };
        assert_eq!(format!("{rate}"), "2500/1000000");
    }
}
