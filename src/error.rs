//! Unified error types for the exchange core.
//!
//! Every fallible operation across the crate returns [`DexError`], so
//! consumers match on a single taxonomy regardless of whether the failure
//! came from the registry, a pool, or the router.  All failures are local
//! and synchronous: an operation that returns `Err` has left no partial
//! state mutation behind.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, DexError>;

/// The unified error enum for all exchange-core operations.
///
/// Arithmetic variants carry a `&'static str` describing the failing
/// computation; everything else is a bare discriminant so tests can
/// assert on exact values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DexError {
    /// Two identical token ids were supplied where a distinct pair is
    /// required.
    #[error("identical tokens")]
    IdenticalTokens,

    /// A pool for this pair is already registered.
    #[error("pair already registered")]
    PairExists,

    /// No pool is registered for the requested pair or pool id.
    #[error("no pool registered for pair")]
    PairNotFound,

    /// No direct or base-asset route exists between the tokens.
    #[error("no route between tokens")]
    NoPathFound,

    /// The first deposit is too small to cover the permanently locked
    /// minimum share amount.
    #[error("initial deposit below the minimum liquidity lock")]
    InsufficientInitialLiquidity,

    /// A deposit amount was zero, or too small to mint any shares.
    #[error("deposit amount too small")]
    InsufficientAmount,

    /// The caller's share balance cannot cover the requested burn.
    #[error("share balance too low")]
    InsufficientShares,

    /// Pool reserves cannot satisfy the operation (empty reserve, or an
    /// output that would drain the pool).
    #[error("pool reserves cannot satisfy the operation")]
    InsufficientLiquidity,

    /// A swap was submitted with zero input.
    #[error("swap input must be positive")]
    InsufficientInputAmount,

    /// The realized output or consumed amount fell below the caller's
    /// stated minimum.
    #[error("output below caller minimum")]
    SlippageExceeded,

    /// The operation deadline has already passed.
    #[error("deadline has passed")]
    Expired,

    /// Reserve or share arithmetic would overflow; surfaced instead of
    /// wrapping because a wraparound corrupts the invariant irrecoverably.
    #[error("arithmetic overflow: {0}")]
    ArithmeticOverflow(&'static str),

    /// A division had a zero divisor.
    #[error("division by zero")]
    DivisionByZero,

    /// A token-ledger transfer failed because the source balance is too
    /// low.
    #[error("ledger balance too low for transfer")]
    InsufficientBalance,

    /// A pool operation was re-entered while another was in flight on the
    /// same pool.
    #[error("pool operation re-entered")]
    Reentrancy,
}
