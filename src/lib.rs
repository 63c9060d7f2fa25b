//! # Prism DEX
//!
//! The computational core of a decentralized token exchange: a registry
//! of constant-product trading pools, a per-pool liquidity-share ledger,
//! and a routing layer that finds and atomically executes multi-hop
//! trades.
//!
//! Everything around this core — wallets, UIs, deployment tooling — is a
//! thin client: it submits operations with an already-authenticated
//! caller identity and reads pool state back for display.  The core
//! itself never authenticates, never persists, and never retries; every
//! operation is synchronous, atomic, and side-effect-free on failure.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use prism_dex::domain::{AccountId, Amount, FeeTier, Timestamp, TokenId};
//! use prism_dex::ledger::InMemoryLedger;
//! use prism_dex::registry::Registry;
//! use prism_dex::router::Router;
//! use prism_dex::traits::ManualClock;
//!
//! // 1. Stand up a deployment: ledger, registry, router.
//! let wrapped = TokenId::from_bytes([9u8; 32]);
//! let ledger = Arc::new(InMemoryLedger::new(wrapped));
//! let registry = Arc::new(Registry::new(FeeTier::STANDARD));
//! let router = Router::new(registry, Arc::clone(&ledger), ManualClock::at(100));
//!
//! // 2. Fund a liquidity provider and seed a pool.
//! let alice = AccountId::from_bytes([1u8; 32]);
//! let tok_a = TokenId::from_bytes([1u8; 32]);
//! let tok_b = TokenId::from_bytes([2u8; 32]);
//! ledger.credit(tok_a, alice, Amount::new(1_000_000)).expect("credit");
//! ledger.credit(tok_b, alice, Amount::new(1_000_000)).expect("credit");
//!
//! let deadline = Timestamp::new(1_000);
//! router
//!     .add_liquidity(
//!         alice,
//!         tok_a,
//!         tok_b,
//!         Amount::new(1_000_000),
//!         Amount::new(1_000_000),
//!         Amount::new(990_000),
//!         Amount::new(990_000),
//!         alice,
//!         deadline,
//!     )
//!     .expect("liquidity added");
//!
//! // 3. Swap against the pool.
//! let bob = AccountId::from_bytes([2u8; 32]);
//! ledger.credit(tok_a, bob, Amount::new(10_000)).expect("credit");
//! let plan = router.resolve_path(tok_a, tok_b).expect("path exists");
//! let out = router
//!     .execute_swap(bob, &plan, Amount::new(10_000), Amount::new(9_000), bob, deadline)
//!     .expect("swap settled");
//! assert!(out.get() > 9_000);
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Client     │  authenticated intents, pre-approved allowances
//! └──────┬──────┘
//!        │ swap / liquidity request
//!        ▼
//! ┌─────────────┐
//! │   Router     │  path discovery, slippage + deadline guards,
//! └──────┬──────┘  native-asset wrapping, atomic multi-hop commit
//!        │ per-pool operations
//!        ▼
//! ┌─────────────┐
//! │  Registry    │  canonical pair → pool, deterministic pool ids
//! └──────┬──────┘
//!        │ one mutex per pool
//!        ▼
//! ┌─────────────┐
//! │    Pool      │  x·y = k engine, share ledger, reserve resync
//! └──────┬──────┘
//!        │ balance pulls / pushes
//!        ▼
//! ┌─────────────┐
//! │ TokenLedger  │  external fungible-token bookkeeping (+ vault)
//! └─────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`Amount`](domain::Amount), [`Shares`](domain::Shares), [`TokenPair`](domain::TokenPair), [`PoolId`](domain::PoolId), … |
//! | [`traits`] | Seam abstractions: [`TokenLedger`](traits::TokenLedger), [`NativeVault`](traits::NativeVault), [`Clock`](traits::Clock), [`FromConfig`](traits::FromConfig) |
//! | [`config`] | Declarative deployment blueprint: [`DexConfig`](config::DexConfig) |
//! | [`ledger`] | [`InMemoryLedger`](ledger::InMemoryLedger) implementation of the ledger traits |
//! | [`pool`]   | The constant-product engine: [`Pool`](pool::Pool) |
//! | [`registry`] | Append-only pair → pool [`Registry`](registry::Registry) |
//! | [`router`] | Path discovery and atomic execution: [`Router`](router::Router) |
//! | [`math`]   | Checked arithmetic, `mul_div`, integer square root |
//! | [`error`]  | [`DexError`](error::DexError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod config;
pub mod domain;
pub mod error;
pub mod ledger;
pub mod math;
pub mod pool;
pub mod prelude;
pub mod registry;
pub mod router;
pub mod traits;
