//! Per-index fee configuration record.

use crate::domain::{Amount, FeeRate, FEE_RATE_DENOMINATOR};
use crate::error::{AmmError, Result};

/// An immutable fee configuration, one per index.
///
/// Pools reference a config at creation and the rates are never
/// renegotiated afterwards; updating fees means creating a config at a
/// new index and new pools against it.
///
/// # Examples
///
/// ```
/// use basin_amm::domain::{Amount, FeeRate};
/// use basin_amm::state::AmmConfig;
///
/// let config = AmmConfig::new(
///     0,
///     FeeRate::new(2_500)?,   // 0.25% trade fee
///     FeeRate::new(120_000)?, // 12% of the trade fee to the protocol
///     FeeRate::new(40_000)?,  // 4% of the trade fee to the fund
///     Amount::new(100_000_000),
/// )?;
/// assert_eq!(config.config_index(), 0);
/// # Ok::<(), basin_amm::error::AmmError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmmConfig {
    config_index: u16,
    trade_fee_rate: FeeRate,
    protocol_fee_rate: FeeRate,
    fund_fee_rate: FeeRate,
    create_fee: Amount,
}

impl AmmConfig {
    /// Creates a config record.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFeeConfig`] if the protocol and fund
    /// shares together exceed 100% of the trade fee.
    pub fn new(
        config_index: u16,
        trade_fee_rate: FeeRate,
        protocol_fee_rate: FeeRate,
        fund_fee_rate: FeeRate,
        create_fee: Amount,
    ) -> Result<Self> {
        let split = u64::from(protocol_fee_rate.get()) + u64::from(fund_fee_rate.get());
        if split > u64::from(FEE_RATE_DENOMINATOR) {
            return Err(AmmError::InvalidFeeConfig(
                "protocol and fund shares exceed the trade fee",
            ));
        }
        Ok(Self {
            config_index,
            trade_fee_rate,
            protocol_fee_rate,
            fund_fee_rate,
            create_fee,
        })
    }

    /// Returns the config index.
    #[must_use]
    pub const fn config_index(&self) -> u16 {
        self.config_index
    }

    /// Returns the trade fee rate charged on swaps.
    pub const fn trade_fee_rate(&self) -> FeeRate {
        self.trade_fee_rate
    }

    /// Returns the protocol share of the trade fee.
    pub const fn protocol_fee_rate(&self) -> FeeRate {
        self.protocol_fee_rate
    }

    /// Returns the fund share of the trade fee.
    pub const fn fund_fee_rate(&self) -> FeeRate {
        self.fund_fee_rate
    }

    /// Returns the flat fee charged once at pool creation.
    pub const fn create_fee(&self) -> Amount {
        self.create_fee
    }
}
