//! Convenience re-exports for common types and traits.
//!
//! The prelude provides a single import to bring all commonly used items
//! into scope:
//!
//! ```rust
//! use basin_amm::prelude::*;
//! ```

// Re-export domain types
pub use crate::domain::{
    Amount, FeeRate, MintId, PoolId, Rounding, TokenMint, TransferFee,
};

// Re-export curve types
pub use crate::curve::TradeDirection;

// Re-export state records
pub use crate::state::{AmmConfig, FeeMode, FungibleLpAccount, PoolOperation, Position};

// Re-export the engine surface
pub use crate::engine::{
    DepositOutcome, InitializeOutcome, Pool, SwapOutcome, WithdrawOutcome,
};

// Re-export core traits
pub use crate::traits::LiquidityClaim;

// Re-export math utilities
pub use crate::math::CheckedArithmetic;

// Re-export error types
pub use crate::error::{AmmError, Result};
