//! End-to-end exchange walkthrough: seed two pools, route a two-hop
//! swap through the base asset, and unwind a liquidity position.
//!
//! # Run
//!
//! ```bash
//! cargo run --example two_hop_swap
//! ```

use std::sync::Arc;

use prism_dex::domain::{AccountId, Amount, FeeTier, Timestamp, TokenId};
use prism_dex::ledger::InMemoryLedger;
use prism_dex::registry::Registry;
use prism_dex::router::Router;
use prism_dex::traits::{NativeVault, SystemClock, TokenLedger};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Two-hop swap through the base asset ===\n");

    // ── 1. Stand up the deployment ──────────────────────────────────────
    let wrapped = TokenId::from_bytes([9u8; 32]);
    let ledger = Arc::new(InMemoryLedger::new(wrapped));
    let registry = Arc::new(Registry::new(FeeTier::STANDARD));
    let router = Router::new(Arc::clone(&registry), Arc::clone(&ledger), SystemClock);

    let usd = TokenId::from_bytes([1u8; 32]);
    let gem = TokenId::from_bytes([2u8; 32]);
    println!("Base asset (wrapped native): {wrapped}");
    println!("Tokens: usd={usd} gem={gem}");

    // ── 2. Seed two pools against the base asset ────────────────────────
    let alice = AccountId::from_bytes([1u8; 32]);
    ledger.credit(usd, alice, Amount::new(1_000_000))?;
    ledger.credit(gem, alice, Amount::new(500_000))?;
    ledger.credit_native(alice, Amount::new(2_000_000))?;

    let deadline = Timestamp::new(u64::MAX);
    let (_, _, usd_shares) = router.add_liquidity_native(
        alice,
        usd,
        Amount::new(1_000_000),
        Amount::new(1_000_000),
        Amount::new(1_000_000),
        alice,
        deadline,
        Amount::new(1_000_000),
    )?;
    println!("\nSeeded usd/base pool, LP shares: {usd_shares}");

    let (_, _, gem_shares) = router.add_liquidity_native(
        alice,
        gem,
        Amount::new(500_000),
        Amount::new(500_000),
        Amount::new(1_000_000),
        alice,
        deadline,
        Amount::new(1_000_000),
    )?;
    println!("Seeded gem/base pool, LP shares: {gem_shares}");

    // ── 3. Route usd → gem: no direct pool, two hops via the base ───────
    let plan = router.resolve_path(usd, gem)?;
    println!("\nRoute found: {} hop(s)", plan.hops().len());

    let bob = AccountId::from_bytes([2u8; 32]);
    ledger.credit(usd, bob, Amount::new(10_000))?;

    let amount_out = router.execute_swap(
        bob,
        &plan,
        Amount::new(10_000),
        Amount::new(4_500),
        bob,
        deadline,
    )?;
    println!("\n--- Swap: 10 000 usd → gem ---");
    println!("  Amount out:  {amount_out}");
    println!("  Bob gem:     {}", ledger.balance_of(gem, bob));

    // ── 4. Unwind half of Alice's usd/base position ─────────────────────
    let half = prism_dex::domain::Shares::new(usd_shares.get() / 2);
    let (usd_out, native_out) = router.remove_liquidity_native(
        alice,
        usd,
        half,
        Amount::new(1),
        Amount::new(1),
        alice,
        deadline,
    )?;
    println!("\n--- Remove half the usd/base position ---");
    println!("  usd out:     {usd_out}");
    println!("  native out:  {native_out}");
    println!("  Alice native balance: {}", ledger.native_balance_of(alice));

    println!("\n=== Done ===");
    Ok(())
}
