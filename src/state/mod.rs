//! Persisted records: configs, pool state, positions, LP accounts.
//!
//! These are plain data with validated mutation methods; the engine
//! module drives them. The hosting runtime persists them between
//! operations (the optional `serde` feature derives the traits it needs).

mod config;
mod lp_account;
mod pool;
mod position;

pub use config::AmmConfig;
pub use lp_account::FungibleLpAccount;
pub use pool::{FeeMode, PoolOperation, PoolState, Q64};
pub use position::Position;
