//! # Basin AMM
//!
//! Constant-product AMM engine: pricing, fee accrual, and liquidity
//! accounting for two-token pools, as a pure library.
//!
//! The crate computes what every pool operation must move and mutates
//! the in-memory pool record accordingly; it performs no I/O and no
//! token transfers. A hosting runtime persists the records and executes
//! the transfers each outcome describes.
//!
//! Supported surface:
//!
//! - **Swaps** — exact-input and exact-output, in both directions, with
//!   the trade fee charged on the input or output side per the pool's
//!   [`FeeMode`](state::FeeMode).
//! - **Fee-on-transfer tokens** — mints that tax transfers are priced
//!   on the amounts that actually move, with gross-ups where the caller
//!   fixes the post-fee side.
//! - **Two ownership models** — fungible LP balances and NFT-backed
//!   positions with explicit per-position fee accrual, both behind the
//!   [`LiquidityClaim`](traits::LiquidityClaim) trait.
//!
//! # Quick Start
//!
//! ```toml
//! [dependencies]
//! basin-amm = "0.1"
//! ```
//!
//! ## Create a pool and execute a swap
//!
//! ```rust
//! use basin_amm::curve::TradeDirection;
//! use basin_amm::domain::{Amount, FeeRate, MintId, PoolId, TokenMint};
//! use basin_amm::engine::Pool;
//! use basin_amm::state::{AmmConfig, FeeMode};
//!
//! // 1. A fee config: 0.25% trade fee, 12% / 4% carved out for the
//! //    protocol and fund.
//! let config = AmmConfig::new(
//!     0,
//!     FeeRate::new(2_500)?,
//!     FeeRate::new(120_000)?,
//!     FeeRate::new(40_000)?,
//!     Amount::ZERO,
//! )?;
//!
//! // 2. Two plain mints, in canonical order.
//! let mint_0 = TokenMint::new(MintId::from_bytes([1u8; 32]));
//! let mint_1 = TokenMint::new(MintId::from_bytes([2u8; 32]));
//!
//! // 3. Create the pool with its first deposit.
//! let (mut pool, created) = Pool::initialize(
//!     PoolId::from_bytes([7u8; 32]),
//!     config,
//!     mint_0,
//!     mint_1,
//!     FeeMode::BothTokens,
//!     Amount::new(1_000_000_000),
//!     Amount::new(2_000_000_000),
//! )?;
//! assert!(created.creator_lp_amount > Amount::ZERO);
//!
//! // 4. Swap 1_000_000 of token 0 for token 1.
//! let outcome = pool.swap_exact_input(
//!     TradeDirection::ZeroForOne,
//!     Amount::new(1_000_000),
//!     Amount::ZERO,
//! )?;
//! assert!(outcome.amount_received > Amount::ZERO);
//! assert!(outcome.trade_fee > Amount::ZERO);
//! # Ok::<(), basin_amm::error::AmmError>(())
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Runtime    │  persists records, executes transfers
//! └──────┬──────┘
//!        │ Pool methods -> outcome structs
//!        ▼
//! ┌─────────────┐
//! │   Engine     │  status gates, transfer-fee legs, state mutation
//! └──────┬──────┘
//!        │ pure u128 math
//!        ▼
//! ┌─────────────┐
//! │    Curve     │  x*y=k pricing, trade-fee split
//! └──────┬──────┘
//!        ▼
//! ┌─────────────┐
//! │   Domain     │  Amount, FeeRate, TransferFee, TokenMint, …
//! └─────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`Amount`](domain::Amount), [`FeeRate`](domain::FeeRate), [`TransferFee`](domain::TransferFee), etc. |
//! | [`curve`]  | Pure constant-product pricing and fee math over `u128` |
//! | [`state`]  | Persisted records: [`AmmConfig`](state::AmmConfig), [`PoolState`](state::PoolState), [`Position`](state::Position) |
//! | [`engine`] | [`Pool`](engine::Pool) operations: initialize, swap, deposit, withdraw, collect |
//! | [`traits`] | [`LiquidityClaim`](traits::LiquidityClaim), the seam between ownership models |
//! | [`math`]   | [`CheckedArithmetic`](math::CheckedArithmetic) for domain types |
//! | [`error`]  | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod curve;
pub mod domain;
pub mod engine;
pub mod error;
pub mod math;
pub mod prelude;
pub mod state;
pub mod traits;
