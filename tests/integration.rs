//! Integration tests exercising the full system through the public API:
//! registry creation, liquidity provision, single- and multi-hop swaps,
//! native-asset variants, and the failure-atomicity guarantees.

#![allow(clippy::panic)]

use std::sync::Arc;

use prism_dex::config::DexConfig;
use prism_dex::domain::{
    AccountId, Amount, AssetRef, FeeTier, PoolId, Shares, Timestamp, TokenId, TokenPair,
};
use prism_dex::error::DexError;
use prism_dex::ledger::InMemoryLedger;
use prism_dex::pool::MINIMUM_LIQUIDITY;
use prism_dex::registry::Registry;
use prism_dex::router::Router;
use prism_dex::traits::{FromConfig, ManualClock, NativeVault, TokenLedger};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const WRAPPED: u8 = 9;

fn tok(byte: u8) -> TokenId {
    TokenId::from_bytes([byte; 32])
}

fn acct(byte: u8) -> AccountId {
    AccountId::from_bytes([byte; 32])
}

fn far_deadline() -> Timestamp {
    Timestamp::new(1_000_000)
}

struct Exchange {
    ledger: Arc<InMemoryLedger>,
    clock: Arc<ManualClock>,
    router: Router<InMemoryLedger, Arc<ManualClock>>,
}

fn make_exchange() -> Exchange {
    let ledger = Arc::new(InMemoryLedger::new(tok(WRAPPED)));
    let clock = Arc::new(ManualClock::at(100));
    let registry = Arc::new(Registry::new(FeeTier::STANDARD));
    let router = Router::new(registry, Arc::clone(&ledger), Arc::clone(&clock));
    Exchange { ledger, clock, router }
}

fn fund(ex: &Exchange, owner: AccountId, token: u8, amount: u128) {
    let Ok(()) = ex.ledger.credit(tok(token), owner, Amount::new(amount)) else {
        panic!("credit failed");
    };
}

/// Seeds a pool with the given reserves through the router.
fn seed_pool(ex: &Exchange, a: u8, b: u8, ra: u128, rb: u128) -> PoolId {
    let lp = acct(200);
    fund(ex, lp, a, ra);
    fund(ex, lp, b, rb);
    let Ok(_) = ex.router.add_liquidity(
        lp,
        tok(a),
        tok(b),
        Amount::new(ra),
        Amount::new(rb),
        Amount::new(ra),
        Amount::new(rb),
        lp,
        far_deadline(),
    ) else {
        panic!("seed add_liquidity failed");
    };
    let Some(id) = ex.router.registry().get_pool(tok(a), tok(b)) else {
        panic!("pool missing after seed");
    };
    id
}

fn reserves(ex: &Exchange, id: PoolId) -> (Amount, Amount, Timestamp) {
    let Ok(state) = ex.router.registry().get_reserves(id) else {
        panic!("expected Ok");
    };
    state
}

// ---------------------------------------------------------------------------
// Registry behavior
// ---------------------------------------------------------------------------

#[test]
fn create_pool_identical_tokens_rejected() {
    let ex = make_exchange();
    assert_eq!(
        ex.router.registry().create_pool(tok(1), tok(1)),
        Err(DexError::IdenticalTokens)
    );
}

#[test]
fn create_pool_is_order_independent() {
    let ex = make_exchange();
    let Ok(id) = ex.router.registry().create_pool(tok(1), tok(2)) else {
        panic!("expected Ok");
    };
    assert_eq!(
        ex.router.registry().create_pool(tok(2), tok(1)),
        Err(DexError::PairExists)
    );
    assert_eq!(ex.router.registry().get_pool(tok(2), tok(1)), Some(id));
}

#[test]
fn pool_id_precomputable_offline() {
    let ex = make_exchange();
    let Ok(pair) = TokenPair::new(tok(1), tok(2)) else {
        panic!("expected valid pair");
    };
    let precomputed = PoolId::derive(&pair);
    let Ok(created) = ex.router.registry().create_pool(tok(1), tok(2)) else {
        panic!("expected Ok");
    };
    assert_eq!(precomputed, created);
}

#[test]
fn registry_from_config_validates() {
    let Ok(config) = DexConfig::new(FeeTier::STANDARD, None) else {
        panic!("expected valid config");
    };
    let Ok(registry) = Registry::from_config(&config) else {
        panic!("expected Ok");
    };
    assert_eq!(registry.fee(), FeeTier::STANDARD);
}

// ---------------------------------------------------------------------------
// First liquidity provision
// ---------------------------------------------------------------------------

#[test]
fn first_provision_of_100_100_locks_minimum() {
    let ex = make_exchange();
    let alice = acct(1);
    fund(&ex, alice, 1, 100);
    fund(&ex, alice, 2, 100);

    let Ok((_, _, shares)) = ex.router.add_liquidity(
        alice,
        tok(1),
        tok(2),
        Amount::new(100),
        Amount::new(100),
        Amount::ZERO,
        Amount::ZERO,
        alice,
        far_deadline(),
    ) else {
        panic!("expected Ok");
    };

    // sqrt(100 * 100) = 100 shares total, the minimum locked forever.
    assert_eq!(shares, Shares::new(100 - MINIMUM_LIQUIDITY.get()));
    let Some(id) = ex.router.registry().get_pool(tok(1), tok(2)) else {
        panic!("pool missing");
    };
    let Ok(locked) = ex.router.registry().balance_of(id, AccountId::NULL) else {
        panic!("expected Ok");
    };
    assert_eq!(locked, MINIMUM_LIQUIDITY);
}

#[test]
fn first_provision_with_zero_amounts_rejected() {
    let ex = make_exchange();
    let alice = acct(1);
    let result = ex.router.add_liquidity(
        alice,
        tok(1),
        tok(2),
        Amount::ZERO,
        Amount::ZERO,
        Amount::ZERO,
        Amount::ZERO,
        alice,
        far_deadline(),
    );
    assert_eq!(result, Err(DexError::InsufficientAmount));
}

#[test]
fn first_provision_below_minimum_rejected() {
    let ex = make_exchange();
    let alice = acct(1);
    fund(&ex, alice, 1, 5);
    fund(&ex, alice, 2, 5);
    let result = ex.router.add_liquidity(
        alice,
        tok(1),
        tok(2),
        Amount::new(5),
        Amount::new(5),
        Amount::ZERO,
        Amount::ZERO,
        alice,
        far_deadline(),
    );
    assert_eq!(result, Err(DexError::InsufficientInitialLiquidity));
}

// ---------------------------------------------------------------------------
// Swap invariants
// ---------------------------------------------------------------------------

#[test]
fn k_never_decreases_across_swaps() {
    let ex = make_exchange();
    let id = seed_pool(&ex, 1, 2, 1_000_000, 2_000_000);

    let bob = acct(2);
    fund(&ex, bob, 1, 100_000);

    let (rx, ry, _) = reserves(&ex, id);
    let mut k = rx.get() * ry.get();

    for round in 0..5u64 {
        let Ok(plan) = ex.router.resolve_path(tok(1), tok(2)) else {
            panic!("expected Ok");
        };
        let Ok(_) = ex.router.execute_swap(
            bob,
            &plan,
            Amount::new(20_000),
            Amount::new(1),
            bob,
            far_deadline(),
        ) else {
            panic!("swap {round} failed");
        };
        let (rx, ry, _) = reserves(&ex, id);
        let k_after = rx.get() * ry.get();
        assert!(k_after >= k, "k decreased on round {round}");
        k = k_after;
    }
}

#[test]
fn round_trip_swap_is_strictly_lossy() {
    let ex = make_exchange();
    seed_pool(&ex, 1, 2, 1_000_000, 2_000_000);

    let bob = acct(2);
    fund(&ex, bob, 1, 50_000);

    let Ok(got_y) = ex.router.swap_exact_tokens_for_tokens(
        bob,
        Amount::new(50_000),
        Amount::new(1),
        &[tok(1), tok(2)],
        bob,
        far_deadline(),
    ) else {
        panic!("expected Ok");
    };
    let Ok(got_x) = ex.router.swap_exact_tokens_for_tokens(
        bob,
        got_y,
        Amount::new(1),
        &[tok(2), tok(1)],
        bob,
        far_deadline(),
    ) else {
        panic!("expected Ok");
    };

    assert!(got_x < Amount::new(50_000));
}

#[test]
fn swap_with_zero_input_rejected() {
    let ex = make_exchange();
    seed_pool(&ex, 1, 2, 1_000_000, 1_000_000);
    let bob = acct(2);
    let result = ex.router.swap_exact_tokens_for_tokens(
        bob,
        Amount::ZERO,
        Amount::ZERO,
        &[tok(1), tok(2)],
        bob,
        far_deadline(),
    );
    assert_eq!(result, Err(DexError::InsufficientInputAmount));
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

#[test]
fn resolve_path_two_hops_through_base() {
    let ex = make_exchange();
    seed_pool(&ex, 1, WRAPPED, 1_000_000, 1_000_000);
    seed_pool(&ex, WRAPPED, 3, 1_000_000, 1_000_000);

    let Ok(plan) = ex.router.resolve_path(tok(1), tok(3)) else {
        panic!("expected Ok");
    };
    assert_eq!(plan.hops().len(), 2);
    assert_eq!(plan.hops()[0].token_out(), tok(WRAPPED));
}

#[test]
fn resolve_path_without_any_route_rejected() {
    let ex = make_exchange();
    assert_eq!(
        ex.router.resolve_path(tok(1), tok(3)).map(|_| ()),
        Err(DexError::NoPathFound)
    );
}

#[test]
fn expired_deadline_fails_before_any_mutation() {
    let ex = make_exchange();
    let id = seed_pool(&ex, 1, 2, 1_000_000, 1_000_000);
    let before = reserves(&ex, id);

    let bob = acct(2);
    fund(&ex, bob, 1, 10_000);
    // The clock sits at 100; 99 is already in the past.
    let result = ex.router.swap_exact_tokens_for_tokens(
        bob,
        Amount::new(10_000),
        Amount::new(1),
        &[tok(1), tok(2)],
        bob,
        Timestamp::new(99),
    );
    assert_eq!(result, Err(DexError::Expired));
    assert_eq!(reserves(&ex, id), before);
    assert_eq!(ex.ledger.balance_of(tok(1), bob), Amount::new(10_000));
}

#[test]
fn failed_slippage_check_rolls_back_whole_route() {
    let ex = make_exchange();
    let first = seed_pool(&ex, 1, WRAPPED, 1_000_000, 1_000_000);
    let second = seed_pool(&ex, WRAPPED, 3, 1_000_000, 1_000_000);
    let before_first = reserves(&ex, first);
    let before_second = reserves(&ex, second);

    let bob = acct(2);
    fund(&ex, bob, 1, 10_000);
    let result = ex.router.swap_exact_tokens_for_tokens(
        bob,
        Amount::new(10_000),
        // Two hops of fees make this unreachable.
        Amount::new(9_900),
        &[tok(1), tok(WRAPPED), tok(3)],
        bob,
        far_deadline(),
    );
    assert_eq!(result, Err(DexError::SlippageExceeded));
    assert_eq!(reserves(&ex, first), before_first);
    assert_eq!(reserves(&ex, second), before_second);
    assert_eq!(ex.ledger.balance_of(tok(1), bob), Amount::new(10_000));
    assert_eq!(ex.ledger.balance_of(tok(WRAPPED), bob), Amount::ZERO);
}

#[test]
fn multi_hop_swap_settles_end_to_end() {
    let ex = make_exchange();
    seed_pool(&ex, 1, WRAPPED, 1_000_000, 1_000_000);
    seed_pool(&ex, WRAPPED, 3, 1_000_000, 1_000_000);

    let bob = acct(2);
    fund(&ex, bob, 1, 10_000);
    let Ok(out) = ex.router.swap_exact_tokens_for_tokens(
        bob,
        Amount::new(10_000),
        Amount::new(9_000),
        &[tok(1), tok(WRAPPED), tok(3)],
        bob,
        far_deadline(),
    ) else {
        panic!("expected Ok");
    };
    assert!(out > Amount::new(9_000));
    assert_eq!(ex.ledger.balance_of(tok(3), bob), out);
    // The intermediate wrapped leg never sticks to the caller.
    assert_eq!(ex.ledger.balance_of(tok(WRAPPED), bob), Amount::ZERO);
}

// ---------------------------------------------------------------------------
// Liquidity round trips
// ---------------------------------------------------------------------------

#[test]
fn mint_then_burn_returns_at_most_deposit() {
    let ex = make_exchange();
    seed_pool(&ex, 1, 2, 1_000_000, 2_000_000);

    let bob = acct(2);
    fund(&ex, bob, 1, 40_000);
    fund(&ex, bob, 2, 80_000);

    let Ok((used_a, used_b, shares)) = ex.router.add_liquidity(
        bob,
        tok(1),
        tok(2),
        Amount::new(40_000),
        Amount::new(80_000),
        Amount::ZERO,
        Amount::ZERO,
        bob,
        far_deadline(),
    ) else {
        panic!("expected Ok");
    };
    let Ok((back_a, back_b)) = ex.router.remove_liquidity(
        bob,
        tok(1),
        tok(2),
        shares,
        Amount::ZERO,
        Amount::ZERO,
        bob,
        far_deadline(),
    ) else {
        panic!("expected Ok");
    };

    assert!(back_a <= used_a);
    assert!(back_b <= used_b);
}

#[test]
fn remove_liquidity_more_than_held_rejected() {
    let ex = make_exchange();
    let id = seed_pool(&ex, 1, 2, 1_000_000, 1_000_000);
    let lp = acct(200);
    let Ok(held) = ex.router.registry().balance_of(id, lp) else {
        panic!("expected Ok");
    };
    let result = ex.router.remove_liquidity(
        lp,
        tok(1),
        tok(2),
        Shares::new(held.get() + 1),
        Amount::ZERO,
        Amount::ZERO,
        lp,
        far_deadline(),
    );
    assert_eq!(result, Err(DexError::InsufficientShares));
}

#[test]
fn quotes_use_identical_rounding_to_execution() {
    let ex = make_exchange();
    seed_pool(&ex, 1, 2, 1_000_003, 2_000_007);

    let bob = acct(2);
    fund(&ex, bob, 1, 33_333);
    fund(&ex, bob, 2, 77_777);

    let Ok(quoted) = ex.router.quote_add_liquidity(
        tok(1),
        tok(2),
        Amount::new(33_333),
        Amount::new(77_777),
    ) else {
        panic!("expected Ok");
    };
    let Ok(executed) = ex.router.add_liquidity(
        bob,
        tok(1),
        tok(2),
        Amount::new(33_333),
        Amount::new(77_777),
        Amount::ZERO,
        Amount::ZERO,
        bob,
        far_deadline(),
    ) else {
        panic!("expected Ok");
    };
    assert_eq!(quoted, executed);

    let Ok(quoted_out) = ex.router.quote_remove_liquidity(tok(1), tok(2), executed.2) else {
        panic!("expected Ok");
    };
    let Ok(removed) = ex.router.remove_liquidity(
        bob,
        tok(1),
        tok(2),
        executed.2,
        Amount::ZERO,
        Amount::ZERO,
        bob,
        far_deadline(),
    ) else {
        panic!("expected Ok");
    };
    assert_eq!(quoted_out, removed);
}

// ---------------------------------------------------------------------------
// Native-asset variants
// ---------------------------------------------------------------------------

#[test]
fn add_liquidity_native_wraps_and_refunds_excess() {
    let ex = make_exchange();
    let alice = acct(1);
    fund(&ex, alice, 1, 200_000);
    let Ok(()) = ex.ledger.credit_native(alice, Amount::new(100_000)) else {
        panic!("credit failed");
    };

    // Seed a token/wrapped pool at a 2:1 ratio first.
    let Ok(_) = ex.router.add_liquidity_native(
        alice,
        tok(1),
        Amount::new(100_000),
        Amount::new(100_000),
        Amount::new(50_000),
        alice,
        far_deadline(),
        Amount::new(50_000),
    ) else {
        panic!("expected Ok");
    };

    // A follow-up deposit offering too much native gets the excess back.
    let Ok(()) = ex.ledger.credit_native(alice, Amount::new(50_000)) else {
        panic!("credit failed");
    };
    let native_before = ex.ledger.native_balance_of(alice);
    let Ok((used_token, used_native, _)) = ex.router.add_liquidity_native(
        alice,
        tok(1),
        Amount::new(20_000),
        Amount::ZERO,
        Amount::ZERO,
        alice,
        far_deadline(),
        Amount::new(50_000),
    ) else {
        panic!("expected Ok");
    };

    assert_eq!(used_token, Amount::new(20_000));
    assert_eq!(used_native, Amount::new(10_000));
    // Only the consumed native stays wrapped; the rest returns.
    assert_eq!(
        ex.ledger.native_balance_of(alice),
        Amount::new(native_before.get() - used_native.get())
    );
    assert_eq!(ex.ledger.balance_of(tok(WRAPPED), alice), Amount::ZERO);
}

#[test]
fn remove_liquidity_native_pays_out_native() {
    let ex = make_exchange();
    let alice = acct(1);
    fund(&ex, alice, 1, 100_000);
    let Ok(()) = ex.ledger.credit_native(alice, Amount::new(100_000)) else {
        panic!("credit failed");
    };

    let Ok((_, _, shares)) = ex.router.add_liquidity_native(
        alice,
        tok(1),
        Amount::new(100_000),
        Amount::new(100_000),
        Amount::new(100_000),
        alice,
        far_deadline(),
        Amount::new(100_000),
    ) else {
        panic!("expected Ok");
    };
    assert_eq!(ex.ledger.native_balance_of(alice), Amount::ZERO);

    let Ok((token_out, native_out)) = ex.router.remove_liquidity_native(
        alice,
        tok(1),
        shares,
        Amount::new(90_000),
        Amount::new(90_000),
        alice,
        far_deadline(),
    ) else {
        panic!("expected Ok");
    };
    assert!(token_out >= Amount::new(90_000));
    assert!(native_out >= Amount::new(90_000));
    assert_eq!(ex.ledger.native_balance_of(alice), native_out);
    assert_eq!(ex.ledger.balance_of(tok(WRAPPED), alice), Amount::ZERO);
}

#[test]
fn swap_exact_native_for_tokens_round_trip() {
    let ex = make_exchange();
    seed_pool(&ex, 1, WRAPPED, 1_000_000, 1_000_000);

    let bob = acct(2);
    let Ok(()) = ex.ledger.credit_native(bob, Amount::new(10_000)) else {
        panic!("credit failed");
    };

    let Ok(got_tokens) = ex.router.swap_exact_native_for_tokens(
        bob,
        Amount::new(10_000),
        Amount::new(9_000),
        &[tok(WRAPPED), tok(1)],
        bob,
        far_deadline(),
    ) else {
        panic!("expected Ok");
    };
    assert_eq!(ex.ledger.native_balance_of(bob), Amount::ZERO);
    assert_eq!(ex.ledger.balance_of(tok(1), bob), got_tokens);

    let Ok(got_native) = ex.router.swap_exact_tokens_for_native(
        bob,
        got_tokens,
        Amount::new(1),
        &[tok(1), tok(WRAPPED)],
        bob,
        far_deadline(),
    ) else {
        panic!("expected Ok");
    };
    // Fees bite twice; the round trip never breaks even.
    assert!(got_native < Amount::new(10_000));
    assert_eq!(ex.ledger.native_balance_of(bob), got_native);
    assert_eq!(ex.ledger.balance_of(tok(WRAPPED), bob), Amount::ZERO);
}

#[test]
fn swap_exact_native_requires_wrapped_path_head() {
    let ex = make_exchange();
    seed_pool(&ex, 1, 2, 1_000_000, 1_000_000);
    let bob = acct(2);
    let result = ex.router.swap_exact_native_for_tokens(
        bob,
        Amount::new(1_000),
        Amount::new(1),
        &[tok(1), tok(2)],
        bob,
        far_deadline(),
    );
    assert_eq!(result, Err(DexError::NoPathFound));
}

#[test]
fn swap_exact_resolves_asset_refs_at_the_boundary() {
    let ex = make_exchange();
    seed_pool(&ex, 1, WRAPPED, 1_000_000, 1_000_000);

    let bob = acct(2);
    let Ok(()) = ex.ledger.credit_native(bob, Amount::new(10_000)) else {
        panic!("credit failed");
    };

    let Ok(out) = ex.router.swap_exact(
        bob,
        AssetRef::Native,
        AssetRef::Fungible(tok(1)),
        Amount::new(10_000),
        Amount::new(9_000),
        bob,
        far_deadline(),
    ) else {
        panic!("expected Ok");
    };
    assert_eq!(ex.ledger.balance_of(tok(1), bob), out);
    assert_eq!(ex.ledger.native_balance_of(bob), Amount::ZERO);
}

#[test]
fn failed_native_swap_restores_native_balance() {
    let ex = make_exchange();
    seed_pool(&ex, 1, WRAPPED, 1_000_000, 1_000_000);

    let bob = acct(2);
    let Ok(()) = ex.ledger.credit_native(bob, Amount::new(10_000)) else {
        panic!("credit failed");
    };
    let result = ex.router.swap_exact_native_for_tokens(
        bob,
        Amount::new(10_000),
        // Unreachable minimum: slippage fires after the wrap.
        Amount::new(10_000),
        &[tok(WRAPPED), tok(1)],
        bob,
        far_deadline(),
    );
    assert_eq!(result, Err(DexError::SlippageExceeded));
    assert_eq!(ex.ledger.native_balance_of(bob), Amount::new(10_000));
    assert_eq!(ex.ledger.balance_of(tok(WRAPPED), bob), Amount::ZERO);
}

// ---------------------------------------------------------------------------
// Reserve bookkeeping
// ---------------------------------------------------------------------------

#[test]
fn get_reserves_reports_last_mutation_time() {
    let ex = make_exchange();
    let id = seed_pool(&ex, 1, 2, 1_000_000, 1_000_000);
    let (_, _, at_seed) = reserves(&ex, id);
    assert_eq!(at_seed, Timestamp::new(100));

    let bob = acct(2);
    fund(&ex, bob, 1, 10_000);
    let Ok(plan) = ex.router.resolve_path(tok(1), tok(2)) else {
        panic!("expected Ok");
    };
    // Advancing the clock must show up in the reserve snapshot time.
    ex.clock.advance(50);
    let Ok(_) = ex.router.execute_swap(
        bob,
        &plan,
        Amount::new(10_000),
        Amount::new(1),
        bob,
        far_deadline(),
    ) else {
        panic!("expected Ok");
    };
    let (_, _, at_swap) = reserves(&ex, id);
    assert_eq!(at_swap, Timestamp::new(150));
}

#[test]
fn reserves_mirror_ledger_truth() {
    let ex = make_exchange();
    let id = seed_pool(&ex, 1, 2, 500_000, 700_000);

    let bob = acct(2);
    fund(&ex, bob, 1, 20_000);
    let Ok(_) = ex.router.swap_exact_tokens_for_tokens(
        bob,
        Amount::new(20_000),
        Amount::new(1),
        &[tok(1), tok(2)],
        bob,
        far_deadline(),
    ) else {
        panic!("expected Ok");
    };

    let (rx, ry, _) = reserves(&ex, id);
    let pool_account = id.account();
    assert_eq!(rx, ex.ledger.balance_of(tok(1), pool_account));
    assert_eq!(ry, ex.ledger.balance_of(tok(2), pool_account));
}
