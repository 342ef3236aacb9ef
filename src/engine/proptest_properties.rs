//! Property-based tests using `proptest` for pool invariants.
//!
//! Covered properties:
//!
//! 1. **Invariant preservation** — the constant product never decreases
//!    across swaps.
//! 2. **Swap reversibility** — a round trip returns at most the
//!    original input.
//! 3. **Fee conservation** — protocol + fund + LP shares always equal
//!    the trade fee.
//! 4. **Exact-output delivery** — the user receives at least the
//!    requested amount.
//! 5. **Liquidity conservation** — deposit then withdraw of the same LP
//!    amount never profits.
//! 6. **Vault identity** — pricing reserves plus fee counters always
//!    reconstruct the vaults.
//! 7. **Transfer-fee gross-up** — the inverse fee always covers the
//!    charge, including when the fee cap binds.

use proptest::prelude::*;

use crate::curve::TradeDirection;
use crate::domain::{Amount, FeeRate, MintId, PoolId, TokenMint, TransferFee};
use crate::state::{AmmConfig, FeeMode, FungibleLpAccount};
use crate::traits::LiquidityClaim;

use super::Pool;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn config(trade_fee_rate: u32) -> AmmConfig {
    let Ok(trade) = FeeRate::new(trade_fee_rate) else {
        panic!("valid trade fee rate");
    };
    let Ok(protocol) = FeeRate::new(120_000) else {
        panic!("valid protocol fee rate");
    };
    let Ok(fund) = FeeRate::new(40_000) else {
        panic!("valid fund fee rate");
    };
    let Ok(cfg) = AmmConfig::new(0, trade, protocol, fund, Amount::ZERO) else {
        panic!("valid config");
    };
    cfg
}

fn make_pool(reserve_0: u64, reserve_1: u64, trade_fee_rate: u32) -> Pool {
    let mint_0 = TokenMint::new(MintId::from_bytes([1u8; 32]));
    let mint_1 = TokenMint::new(MintId::from_bytes([2u8; 32]));
    let Ok((pool, _)) = Pool::initialize(
        PoolId::from_bytes([7u8; 32]),
        config(trade_fee_rate),
        mint_0,
        mint_1,
        FeeMode::BothTokens,
        Amount::new(reserve_0),
        Amount::new(reserve_1),
    ) else {
        panic!("valid pool");
    };
    pool
}

fn invariant(pool: &Pool) -> u128 {
    let Ok((r0, r1)) = pool.state().pricing_reserves() else {
        panic!("pricing reserves");
    };
    r0.as_u128() * r1.as_u128()
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Reserve values in range [100_000, 10_000_000_000] to avoid extremes.
fn reserve_strategy() -> impl Strategy<Value = u64> {
    100_000u64..=10_000_000_000u64
}

/// Trade fee rates from zero up to 5%.
fn trade_fee_strategy() -> impl Strategy<Value = u32> {
    0u32..=50_000u32
}

/// Transfer fees up to the full 100% range.
fn basis_points_strategy() -> impl Strategy<Value = u16> {
    0u16..=10_000u16
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // -- Property 1: invariant preservation ------------------------------

    #[test]
    fn prop_invariant_never_decreases_exact_input(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        fee in trade_fee_strategy(),
        divisor in 2u64..=1_000u64,
    ) {
        let mut pool = make_pool(r0, r1, fee);
        let before = invariant(&pool);
        let amount_in = Amount::new((r0 / divisor).max(1));
        if pool
            .swap_exact_input(TradeDirection::ZeroForOne, amount_in, Amount::ZERO)
            .is_err()
        {
            return Ok(());
        }
        prop_assert!(invariant(&pool) >= before);
    }

    #[test]
    fn prop_invariant_never_decreases_exact_output(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        fee in trade_fee_strategy(),
        divisor in 2u64..=1_000u64,
    ) {
        let mut pool = make_pool(r0, r1, fee);
        let before = invariant(&pool);
        let amount_out = Amount::new((r1 / divisor).max(1));
        if pool
            .swap_exact_output(TradeDirection::ZeroForOne, amount_out, Amount::MAX)
            .is_err()
        {
            return Ok(());
        }
        prop_assert!(invariant(&pool) >= before);
    }

    // -- Property 2: swap reversibility -----------------------------------

    #[test]
    fn prop_round_trip_never_profits(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        fee in trade_fee_strategy(),
    ) {
        let swap_in = Amount::new((r0 / 1_000).max(1));
        let mut pool = make_pool(r0, r1, fee);
        let Ok(first) =
            pool.swap_exact_input(TradeDirection::ZeroForOne, swap_in, Amount::ZERO)
        else {
            return Ok(());
        };
        let Ok(second) = pool.swap_exact_input(
            TradeDirection::OneForZero,
            first.amount_received,
            Amount::ZERO,
        ) else {
            return Ok(());
        };
        prop_assert!(
            second.amount_received <= swap_in,
            "round-trip should lose value: final={} > original={}",
            second.amount_received, swap_in
        );
    }

    // -- Property 3: fee conservation --------------------------------------

    #[test]
    fn prop_fee_split_conserves_trade_fee(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        fee in trade_fee_strategy(),
        divisor in 2u64..=1_000u64,
    ) {
        let mut pool = make_pool(r0, r1, fee);
        let amount_in = Amount::new((r0 / divisor).max(1));
        let Ok(outcome) =
            pool.swap_exact_input(TradeDirection::ZeroForOne, amount_in, Amount::ZERO)
        else {
            return Ok(());
        };
        prop_assert_eq!(
            outcome.protocol_fee.get() + outcome.fund_fee.get() + outcome.lp_fee.get(),
            outcome.trade_fee.get()
        );
    }

    // -- Property 4: exact-output delivery ---------------------------------

    #[test]
    fn prop_exact_output_delivers_at_least_requested(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        fee in trade_fee_strategy(),
        divisor in 2u64..=1_000u64,
    ) {
        let mut pool = make_pool(r0, r1, fee);
        let amount_out = Amount::new((r1 / divisor).max(1));
        let Ok(outcome) =
            pool.swap_exact_output(TradeDirection::ZeroForOne, amount_out, Amount::MAX)
        else {
            return Ok(());
        };
        prop_assert!(outcome.amount_received >= amount_out);
    }

    // -- Property 5: liquidity conservation ---------------------------------

    #[test]
    fn prop_deposit_withdraw_never_profits(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        divisor in 2u64..=100u64,
    ) {
        let mut pool = make_pool(r0, r1, 2_500);
        let mut account = FungibleLpAccount::new(pool.id());
        let lp_amount = Amount::new((pool.state().lp_supply().get() / divisor).max(1));
        let Ok(deposit) = pool.deposit(&mut account, lp_amount, Amount::MAX, Amount::MAX)
        else {
            return Ok(());
        };
        let Ok(withdrawal) =
            pool.withdraw(&mut account, lp_amount, Amount::ZERO, Amount::ZERO)
        else {
            return Ok(());
        };
        prop_assert!(withdrawal.amount_0 <= deposit.amount_0);
        prop_assert!(withdrawal.amount_1 <= deposit.amount_1);
        prop_assert_eq!(account.lp_amount(), Amount::ZERO);
    }

    // -- Property 6: vault identity ------------------------------------------

    #[test]
    fn prop_vaults_reconstruct_from_reserves_and_fees(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        fee in trade_fee_strategy(),
        divisor in 2u64..=1_000u64,
    ) {
        let mut pool = make_pool(r0, r1, fee);
        let amount_in = Amount::new((r0 / divisor).max(1));
        let _ = pool.swap_exact_input(TradeDirection::ZeroForOne, amount_in, Amount::ZERO);
        let _ = pool.swap_exact_input(TradeDirection::OneForZero, amount_in, Amount::ZERO);

        let Ok((p0, p1)) = pool.state().pricing_reserves() else {
            panic!("pricing reserves");
        };
        let (proto_0, proto_1) = pool.state().protocol_fees();
        let (fund_0, fund_1) = pool.state().fund_fees();
        let (lp_0, lp_1) = pool.state().lp_fees();
        prop_assert_eq!(
            p0.get() + proto_0.get() + fund_0.get() + lp_0.get(),
            pool.state().vault_0().get()
        );
        prop_assert_eq!(
            p1.get() + proto_1.get() + fund_1.get() + lp_1.get(),
            pool.state().vault_1().get()
        );
    }

    // -- Property 7: transfer-fee gross-up ------------------------------------

    #[test]
    fn prop_inverse_transfer_fee_covers_charge(
        bps in basis_points_strategy(),
        max_fee in 1u64..=u64::MAX / 2,
        desired in 1u64..=1_000_000_000_000u64,
    ) {
        let Ok(transfer_fee) = TransferFee::new(bps, Amount::new(max_fee)) else {
            panic!("valid transfer fee");
        };
        let mint =
            TokenMint::with_transfer_fee(MintId::from_bytes([1u8; 32]), transfer_fee);
        let desired = Amount::new(desired);
        let Ok(extra) = mint.inverse_transfer_fee(desired) else {
            return Ok(());
        };
        let Some(send) = desired.checked_add(&extra) else {
            return Ok(());
        };
        let charged = mint.transfer_fee_on(send);
        prop_assert!(
            send.get() - charged.get() >= desired.get(),
            "send={} charged={} desired={}",
            send, charged, desired
        );
    }
}
