//! Liquidity-share units.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A quantity of liquidity shares: the fungible claim on a proportional
/// slice of one pool's reserves.
///
/// Distinct from [`Amount`](super::Amount) because shares measure a
/// fraction of a pool, not a quantity of any token.  All `u128` values
/// are valid; arithmetic is checked and returns `None` instead of
/// panicking on overflow or underflow.
///
/// # Examples
///
/// ```
/// use prism_dex::domain::Shares;
///
/// let a = Shares::new(1_000);
/// let b = Shares::new(500);
/// assert_eq!(a.checked_sub(&b), Some(Shares::new(500)));
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
)]
#[must_use]
pub struct Shares(u128);

impl Shares {
    /// No shares.
    pub const ZERO: Self = Self(0);

    /// Creates a new `Shares` value from a raw `u128`.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the underlying `u128` value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the value is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

impl fmt::Display for Shares {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
