//! Fundamental domain value types used throughout the AMM engine.
//!
//! This module contains the core value types that model the AMM domain:
//! token amounts, fee rates, mint and pool identities, and the
//! fee-on-transfer configuration consumed from the token standard.
//! All types use newtypes with validated constructors to enforce invariants.

mod amount;
mod fee_rate;
mod mint_id;
mod pool_id;
mod rounding;
mod token_mint;
mod transfer_fee;

pub use amount::Amount;
pub use fee_rate::{FeeRate, FEE_RATE_DENOMINATOR};
pub use mint_id::MintId;
pub use pool_id::PoolId;
pub use rounding::Rounding;
pub use token_mint::TokenMint;
pub use transfer_fee::{TransferFee, MAX_FEE_BASIS_POINTS};
