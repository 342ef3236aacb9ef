//! Unified error type for the Basin AMM engine.
//!
//! All fallible operations across the crate return [`AmmError`] as their
//! error type. Every error is detected before any state is mutated, so a
//! returned `Err` guarantees the pool, position, and claim records are
//! unchanged.

use thiserror::Error;

/// Errors produced by pool operations and the arithmetic beneath them.
///
/// Variants carry a `&'static str` describing the failing computation so
/// callers and logs can pinpoint the site without allocation.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AmmError {
    /// The pool's status bitmask has the bit for this operation set.
    #[error("operation disabled: {0}")]
    OperationDisabled(&'static str),

    /// A computed amount violates the caller's min/max bound.
    #[error("slippage exceeded: {0}")]
    SlippageExceeded(&'static str),

    /// The operation would exhaust or invalidate the pool's reserves,
    /// or a first deposit falls below the locked-liquidity floor.
    #[error("insufficient liquidity: {0}")]
    InsufficientLiquidity(&'static str),

    /// An intermediate value exceeded the representable range.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// A subtraction would have produced a negative amount.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A supplied record does not belong to the expected pool, or the
    /// pair ordering does not match the canonical form.
    #[error("mismatched account: {0}")]
    MismatchedAccount(&'static str),

    /// A parameter is outside its valid range.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    /// Fee rates that do not satisfy the config invariants.
    #[error("invalid fee configuration: {0}")]
    InvalidFeeConfig(&'static str),

    /// The computed trade or liquidity amounts round to zero on at
    /// least one side.
    #[error("zero trading tokens: {0}")]
    ZeroTradingTokens(&'static str),

    /// The constant-product invariant would decrease.
    #[error("invariant violation: {0}")]
    InvariantViolation(&'static str),
}

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, AmmError>;
