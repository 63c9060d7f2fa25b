//! Convenience re-exports for common types and traits.
//!
//! A single import brings the frequently used surface into scope:
//!
//! ```rust
//! use prism_dex::prelude::*;
//! ```

pub use crate::config::DexConfig;
pub use crate::domain::{
    AccountId, Amount, AssetRef, BasisPoints, FeeTier, MintOutcome, PoolId, Rounding, Shares,
    Timestamp, TokenId, TokenPair,
};
pub use crate::error::{DexError, Result};
pub use crate::ledger::InMemoryLedger;
pub use crate::pool::{Pool, MINIMUM_LIQUIDITY};
pub use crate::registry::Registry;
pub use crate::router::{Hop, RoutePlan, Router};
pub use crate::traits::{Clock, FromConfig, ManualClock, NativeVault, SystemClock, TokenLedger};
