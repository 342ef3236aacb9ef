//! Behavioral contracts at the engine's seams.

mod liquidity_claim;

pub use liquidity_claim::LiquidityClaim;
