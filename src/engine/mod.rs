//! Pool operations: the stateful layer over the pure curve math.
//!
//! A [`Pool`] bundles the identity, fee config, mint descriptions, and
//! mutable [`PoolState`] of one trading pair and exposes every
//! operation as a method. Methods validate first and mutate last, so an
//! `Err` leaves the pool unchanged.

mod liquidity;
#[cfg(test)]
mod proptest_properties;
mod swap;

pub use liquidity::{DepositOutcome, WithdrawOutcome};
pub use swap::SwapOutcome;

use tracing::debug;

use crate::curve::constant_product;
use crate::domain::{Amount, MintId, PoolId, TokenMint};
use crate::error::{AmmError, Result};
use crate::state::{AmmConfig, FeeMode, PoolOperation, PoolState, Position};
use crate::traits::LiquidityClaim;

/// LP amount permanently locked at pool creation.
///
/// Locking a floor of liquidity keeps the pool from ever being fully
/// drained back to empty reserves, which would make later pricing
/// degenerate.
pub const MINIMUM_LIQUIDITY: u128 = 100;

/// What the hosting runtime must move to realize a pool creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitializeOutcome {
    /// LP amount credited to the creator.
    pub creator_lp_amount: Amount,
    /// LP amount locked forever.
    pub locked_lp_amount: Amount,
    /// Token 0 received by the vault, net of any transfer fee.
    pub vault_receive_0: Amount,
    /// Token 1 received by the vault, net of any transfer fee.
    pub vault_receive_1: Amount,
    /// Flat creation fee owed to the protocol treasury.
    pub create_fee: Amount,
}

/// One constant-product pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pool {
    id: PoolId,
    config: AmmConfig,
    mint_0: TokenMint,
    mint_1: TokenMint,
    state: PoolState,
}

impl Pool {
    /// Creates a pool and prices the first deposit.
    ///
    /// `init_amount_0` and `init_amount_1` are the amounts the creator
    /// sends; fee-on-transfer mints deliver less to the vaults and only
    /// the received amounts back liquidity. The first LP amount is
    /// `isqrt(received_0 * received_1)`, of which [`MINIMUM_LIQUIDITY`]
    /// is locked and the rest is credited to the creator.
    ///
    /// # Errors
    ///
    /// - [`AmmError::MismatchedAccount`] if the mints are not in
    ///   canonical order (`mint_0 < mint_1`).
    /// - [`AmmError::ZeroTradingTokens`] if either side nets to zero
    ///   after transfer fees.
    /// - [`AmmError::InsufficientLiquidity`] if the initial LP amount
    ///   does not exceed the locked minimum.
    pub fn initialize(
        id: PoolId,
        config: AmmConfig,
        mint_0: TokenMint,
        mint_1: TokenMint,
        fee_mode: FeeMode,
        init_amount_0: Amount,
        init_amount_1: Amount,
    ) -> Result<(Self, InitializeOutcome)> {
        if mint_0.id() >= mint_1.id() {
            return Err(AmmError::MismatchedAccount(
                "token mints not in canonical order",
            ));
        }
        let receive_0 = init_amount_0
            .checked_sub(&mint_0.transfer_fee_on(init_amount_0))
            .ok_or(AmmError::Underflow("initial transfer fee"))?;
        let receive_1 = init_amount_1
            .checked_sub(&mint_1.transfer_fee_on(init_amount_1))
            .ok_or(AmmError::Underflow("initial transfer fee"))?;
        if receive_0.is_zero() || receive_1.is_zero() {
            return Err(AmmError::ZeroTradingTokens(
                "initial deposit nets to zero after transfer fees",
            ));
        }

        let liquidity =
            constant_product::integer_sqrt(receive_0.as_u128() * receive_1.as_u128());
        if liquidity <= MINIMUM_LIQUIDITY {
            return Err(AmmError::InsufficientLiquidity(
                "initial liquidity does not exceed the locked minimum",
            ));
        }
        let lp_supply = Amount::try_from_u128(liquidity)
            .ok_or(AmmError::Overflow("initial liquidity"))?;
        let locked = Amount::new(MINIMUM_LIQUIDITY as u64);
        let creator_lp_amount = lp_supply
            .checked_sub(&locked)
            .ok_or(AmmError::Underflow("creator liquidity"))?;

        let mut state = PoolState::new(fee_mode);
        state.credit_vaults(receive_0, receive_1)?;
        state.update_lp_supply(lp_supply, true)?;

        let pool = Self {
            id,
            config,
            mint_0,
            mint_1,
            state,
        };
        debug!(
            pool = ?id,
            %receive_0,
            %receive_1,
            lp_supply = %lp_supply,
            creator_lp = %creator_lp_amount,
            "pool initialized"
        );
        Ok((
            pool,
            InitializeOutcome {
                creator_lp_amount,
                locked_lp_amount: locked,
                vault_receive_0: receive_0,
                vault_receive_1: receive_1,
                create_fee: config.create_fee(),
            },
        ))
    }

    /// The pool's identity.
    pub const fn id(&self) -> PoolId {
        self.id
    }

    /// The fee configuration the pool was created against.
    pub const fn config(&self) -> &AmmConfig {
        &self.config
    }

    /// Token 0 of the canonical pair.
    pub const fn mint_0(&self) -> &TokenMint {
        &self.mint_0
    }

    /// Token 1 of the canonical pair.
    pub const fn mint_1(&self) -> &TokenMint {
        &self.mint_1
    }

    /// The mutable accounting record.
    pub const fn state(&self) -> &PoolState {
        &self.state
    }

    /// Replaces the status bitmask.
    pub fn set_status(&mut self, status: u8) {
        self.state.set_status(status);
    }

    /// Enables or disables one operation.
    pub fn set_enabled(&mut self, operation: PoolOperation, enabled: bool) {
        self.state.set_enabled(operation, enabled);
    }

    /// Opens an empty position against this pool, owned by `nft_mint`.
    #[must_use]
    pub fn open_position(&self, nft_mint: MintId) -> Position {
        Position::open(
            nft_mint,
            self.id,
            self.state.fees_token_0_per_lp(),
            self.state.fees_token_1_per_lp(),
        )
    }

    /// Settles and pays out a position's accrued LP fees.
    ///
    /// Returns the `(token_0, token_1)` amounts leaving the vaults.
    /// Collecting with nothing owed succeeds and returns zeros.
    pub fn collect_position_fees(&mut self, position: &mut Position) -> Result<(Amount, Amount)> {
        if position.pool_id() != self.id {
            return Err(AmmError::MismatchedAccount(
                "position belongs to another pool",
            ));
        }
        position.settle(
            self.state.fees_token_0_per_lp(),
            self.state.fees_token_1_per_lp(),
        )?;
        let (owed_0, owed_1) = position.fees_owed();
        self.state.deduct_lp_fees(owed_0, owed_1)?;
        self.state.debit_vaults(owed_0, owed_1)?;
        let collected = position.take_fees_owed();
        debug!(pool = ?self.id, owed_0 = %owed_0, owed_1 = %owed_1, "position fees collected");
        Ok(collected)
    }

    /// Pays out the accrued protocol fees, zeroing the counters.
    pub fn collect_protocol_fees(&mut self) -> Result<(Amount, Amount)> {
        let (fees_0, fees_1) = self.state.protocol_fees();
        self.state.debit_vaults(fees_0, fees_1)?;
        let drained = self.state.drain_protocol_fees();
        debug!(pool = ?self.id, fees_0 = %fees_0, fees_1 = %fees_1, "protocol fees collected");
        Ok(drained)
    }

    /// Pays out the accrued fund fees, zeroing the counters.
    pub fn collect_fund_fees(&mut self) -> Result<(Amount, Amount)> {
        let (fees_0, fees_1) = self.state.fund_fees();
        self.state.debit_vaults(fees_0, fees_1)?;
        let drained = self.state.drain_fund_fees();
        debug!(pool = ?self.id, fees_0 = %fees_0, fees_1 = %fees_1, "fund fees collected");
        Ok(drained)
    }

    /// Pays out the outstanding LP fees wholesale, zeroing the counters.
    ///
    /// For pools whose supply is held entirely through fungible
    /// accounts, where no position ever settles against the counters;
    /// the host distributes the drained amounts to holders itself.
    /// Positions must collect before a drain, since a later
    /// [`Pool::collect_position_fees`] finds the counters empty and
    /// fails.
    pub fn collect_lp_fees(&mut self) -> Result<(Amount, Amount)> {
        let (fees_0, fees_1) = self.state.lp_fees();
        self.state.debit_vaults(fees_0, fees_1)?;
        let drained = self.state.drain_lp_fees();
        debug!(pool = ?self.id, fees_0 = %fees_0, fees_1 = %fees_1, "lp fees collected");
        Ok(drained)
    }

    fn require_claim(&self, claim: &impl LiquidityClaim) -> Result<()> {
        if claim.pool_id() == self.id {
            Ok(())
        } else {
            Err(AmmError::MismatchedAccount("claim belongs to another pool"))
        }
    }
}


#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::curve::TradeDirection;

    #[test]
    fn initialize_locks_minimum_liquidity() {
        let (pool, outcome) = plain_pool(10_000_000_000, 20_000_000_000);
        // isqrt(1e10 * 2e10) = 14_142_135_623
        assert_eq!(pool.state().lp_supply(), Amount::new(14_142_135_623));
        assert_eq!(outcome.locked_lp_amount, Amount::new(100));
        assert_eq!(
            outcome.creator_lp_amount,
            Amount::new(14_142_135_623 - 100)
        );
        assert_eq!(outcome.vault_receive_0, Amount::new(10_000_000_000));
        assert_eq!(outcome.vault_receive_1, Amount::new(20_000_000_000));
        assert_eq!(outcome.create_fee, Amount::new(1_000_000));
        assert_eq!(pool.state().vault_0(), Amount::new(10_000_000_000));
        assert_eq!(pool.state().vault_1(), Amount::new(20_000_000_000));
    }

    #[test]
    fn initialize_rejects_unordered_mints() {
        let (mint_0, mint_1) = plain_pair();
        let err = Pool::initialize(
            pool_id(),
            config(),
            mint_1,
            mint_0,
            FeeMode::BothTokens,
            Amount::new(1_000_000),
            Amount::new(1_000_000),
        );
        let Err(AmmError::MismatchedAccount(_)) = err else {
            panic!("expected MismatchedAccount");
        };
    }

    #[test]
    fn initialize_rejects_dust_deposit() {
        let (mint_0, mint_1) = plain_pair();
        // isqrt(100 * 100) = 100, not above the locked minimum.
        let err = Pool::initialize(
            pool_id(),
            config(),
            mint_0,
            mint_1,
            FeeMode::BothTokens,
            Amount::new(100),
            Amount::new(100),
        );
        let Err(AmmError::InsufficientLiquidity(_)) = err else {
            panic!("expected InsufficientLiquidity");
        };
    }

    #[test]
    fn initialize_nets_transfer_fees_into_vaults() {
        // 1% transfer fee on token 0.
        let mint_0 = taxed_mint(1, 100, u64::MAX);
        let mint_1 = TokenMint::new(MintId::from_bytes([2; 32]));
        let Ok((pool, outcome)) = Pool::initialize(
            pool_id(),
            config(),
            mint_0,
            mint_1,
            FeeMode::BothTokens,
            Amount::new(1_000_000),
            Amount::new(1_000_000),
        ) else {
            panic!("initialization failed");
        };
        assert_eq!(outcome.vault_receive_0, Amount::new(990_000));
        assert_eq!(outcome.vault_receive_1, Amount::new(1_000_000));
        assert_eq!(pool.state().vault_0(), Amount::new(990_000));
    }

    #[test]
    fn open_position_snapshots_current_accumulators() {
        let (pool, _) = plain_pool(1_000_000, 1_000_000);
        let position = pool.open_position(MintId::from_bytes([9; 32]));
        assert_eq!(position.fee_snapshots(), (0, 0));
        assert!(position.is_closable());
        assert_eq!(position.pool_id(), pool.id());
    }

    #[test]
    fn collect_with_nothing_owed_is_a_successful_noop() {
        let (mut pool, _) = plain_pool(1_000_000, 1_000_000);
        let mut position = pool.open_position(MintId::from_bytes([9; 32]));
        let Ok(collected) = pool.collect_position_fees(&mut position) else {
            panic!("collect failed");
        };
        assert_eq!(collected, (Amount::ZERO, Amount::ZERO));
    }

    #[test]
    fn collect_rejects_foreign_position() {
        let (mut pool, _) = plain_pool(1_000_000, 1_000_000);
        let mut foreign = Position::open(
            MintId::from_bytes([9; 32]),
            PoolId::from_bytes([99; 32]),
            0,
            0,
        );
        let Err(AmmError::MismatchedAccount(_)) =
            pool.collect_position_fees(&mut foreign)
        else {
            panic!("expected MismatchedAccount");
        };
    }

    #[test]
    fn collect_lp_fees_drains_counters_and_vault() {
        let (mut pool, _) = plain_pool(1_000_000_000, 1_000_000_000);
        let Ok(swap) = pool.swap_exact_input(
            TradeDirection::ZeroForOne,
            Amount::new(100_000_000),
            Amount::ZERO,
        ) else {
            panic!("swap failed");
        };
        let vault_0_before = pool.state().vault_0();

        let Ok(drained) = pool.collect_lp_fees() else {
            panic!("collect failed");
        };
        assert_eq!(drained, (swap.lp_fee, Amount::ZERO));
        assert_eq!(pool.state().lp_fees(), (Amount::ZERO, Amount::ZERO));
        assert_eq!(
            pool.state().vault_0().get(),
            vault_0_before.get() - swap.lp_fee.get()
        );

        // A second drain finds nothing.
        let Ok(again) = pool.collect_lp_fees() else {
            panic!("collect failed");
        };
        assert_eq!(again, (Amount::ZERO, Amount::ZERO));
    }

    #[test]
    fn status_admin_round_trips() {
        let (mut pool, _) = plain_pool(1_000_000, 1_000_000);
        pool.set_enabled(PoolOperation::Swap, false);
        assert!(!pool.state().is_enabled(PoolOperation::Swap));
        pool.set_status(0);
        assert!(pool.state().is_enabled(PoolOperation::Swap));
    }
}
