//! Property-based tests for the pool invariants.
//!
//! Three properties hold for every reachable pool state:
//!
//! 1. **k never decreases** — across any sequence of swaps the reserve
//!    product is monotonically non-decreasing.
//! 2. **Round trips lose value** — swapping A→B then B→A returns
//!    strictly less than the original input.
//! 3. **Rounding favors the pool** — mint then immediately burn the
//!    same shares returns at most the deposited amounts.

use proptest::prelude::*;

use crate::domain::{AccountId, Amount, FeeTier, PoolId, Shares, Timestamp, TokenId, TokenPair};
use crate::ledger::InMemoryLedger;
use crate::pool::Pool;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn tok(byte: u8) -> TokenId {
    TokenId::from_bytes([byte; 32])
}

fn acct(byte: u8) -> AccountId {
    AccountId::from_bytes([byte; 32])
}

/// Builds a seeded pool plus the ledger backing it.
fn seeded(rx: u128, ry: u128) -> Option<(InMemoryLedger, Pool)> {
    let ledger = InMemoryLedger::new(tok(9));
    let pair = TokenPair::new(tok(1), tok(2)).ok()?;
    let mut pool = Pool::new(PoolId::derive(&pair), pair, FeeTier::STANDARD);
    let alice = acct(10);
    ledger.credit(tok(1), alice, Amount::new(rx)).ok()?;
    ledger.credit(tok(2), alice, Amount::new(ry)).ok()?;
    pool.mint(
        &ledger,
        alice,
        alice,
        Amount::new(rx),
        Amount::new(ry),
        Timestamp::new(1),
    )
    .ok()?;
    Some((ledger, pool))
}

fn k_of(pool: &Pool) -> u128 {
    pool.reserve_x().get() * pool.reserve_y().get()
}

/// Reserve values deep enough that single-unit rounding noise does not
/// dominate, small enough that products stay far from overflow.
fn reserve_strategy() -> impl Strategy<Value = u128> {
    10_000u128..=10_000_000u128
}

fn direction_strategy() -> impl Strategy<Value = Vec<bool>> {
    proptest::collection::vec(any::<bool>(), 1..8)
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_k_never_decreases_across_swaps(
        rx in reserve_strategy(),
        ry in reserve_strategy(),
        directions in direction_strategy(),
    ) {
        let Some((ledger, mut pool)) = seeded(rx, ry) else {
            return Ok(());
        };
        let bob = acct(20);
        let _ = ledger.credit(tok(1), bob, Amount::new(u64::MAX as u128));
        let _ = ledger.credit(tok(2), bob, Amount::new(u64::MAX as u128));

        let mut k = k_of(&pool);
        for (step, input_is_x) in directions.into_iter().enumerate() {
            let amount = Amount::new((rx / 100).max(1));
            if pool
                .swap(&ledger, bob, bob, amount, input_is_x, Timestamp::new(step as u64 + 2))
                .is_err()
            {
                continue;
            }
            let k_after = k_of(&pool);
            prop_assert!(
                k_after >= k,
                "k decreased: before={k}, after={k_after}"
            );
            k = k_after;
        }
    }

    #[test]
    fn prop_round_trip_is_strictly_lossy(
        rx in reserve_strategy(),
        ry in reserve_strategy(),
    ) {
        let Some((ledger, mut pool)) = seeded(rx, ry) else {
            return Ok(());
        };
        let bob = acct(20);
        let swap_in = (rx / 500).max(10);
        let _ = ledger.credit(tok(1), bob, Amount::new(swap_in));

        let Ok(got_y) = pool.swap(&ledger, bob, bob, Amount::new(swap_in), true, Timestamp::new(2))
        else {
            return Ok(());
        };
        let Ok(got_x) = pool.swap(&ledger, bob, bob, got_y, false, Timestamp::new(3)) else {
            return Ok(());
        };

        prop_assert!(
            got_x.get() < swap_in,
            "round trip must lose value: got {} back from {}",
            got_x.get(),
            swap_in
        );
    }

    #[test]
    fn prop_mint_then_burn_returns_at_most_deposit(
        rx in reserve_strategy(),
        ry in reserve_strategy(),
        dx in 100u128..=100_000u128,
        dy in 100u128..=100_000u128,
    ) {
        let Some((ledger, mut pool)) = seeded(rx, ry) else {
            return Ok(());
        };
        let bob = acct(20);
        let _ = ledger.credit(tok(1), bob, Amount::new(dx));
        let _ = ledger.credit(tok(2), bob, Amount::new(dy));

        let Ok(out) = pool.mint(
            &ledger,
            bob,
            bob,
            Amount::new(dx),
            Amount::new(dy),
            Timestamp::new(2),
        ) else {
            return Ok(());
        };
        let Ok((back_x, back_y)) = pool.burn(&ledger, bob, bob, out.shares(), Timestamp::new(3))
        else {
            return Ok(());
        };

        prop_assert!(back_x <= out.amount_x_used());
        prop_assert!(back_y <= out.amount_y_used());
        prop_assert_eq!(pool.shares_of(bob), Shares::ZERO);
    }
}
