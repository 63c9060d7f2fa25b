//! Raw token amount with checked arithmetic.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::Rounding;

/// A raw token amount in the smallest unit of whatever token it counts.
///
/// `Amount` never interprets denominations — it is the unit the token
/// ledger itself accounts in.  All `u128` values are valid amounts.
///
/// Arithmetic is checked: every operation returns `None` on overflow,
/// underflow, or division by zero instead of panicking, and the caller
/// decides which error to surface.
///
/// # Examples
///
/// ```
/// use prism_dex::domain::{Amount, Rounding};
///
/// let a = Amount::new(10);
/// let d = Amount::new(3);
/// assert_eq!(a.checked_div(&d, Rounding::Down), Some(Amount::new(3)));
/// assert_eq!(a.checked_div(&d, Rounding::Up), Some(Amount::new(4)));
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
pub struct Amount(u128);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Maximum representable amount.
    pub const MAX: Self = Self(u128::MAX);

    /// Creates a new `Amount` from a raw `u128` value.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the underlying `u128` value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the amount is zero.
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

    /// Checked multiplication. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_mul(&self, other: &Self) -> Option<Self> {
        match self.0.checked_mul(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked division with an explicit rounding direction.
    ///
    /// Returns `None` if `divisor` is zero.  Ceiling division is
    /// computed from the quotient and remainder, so it cannot overflow
    /// for any representable numerator.
    #[must_use]
    pub const fn checked_div(&self, divisor: &Self, rounding: Rounding) -> Option<Self> {
        if divisor.0 == 0 {
            return None;
        }
        let q = self.0 / divisor.0;
        let r = self.0 % divisor.0;
        match rounding {
            Rounding::Down => Some(Self(q)),
            Rounding::Up => {
                if r == 0 {
                    Some(Self(q))
                } else {
                    // r != 0 implies q < u128::MAX, so q + 1 cannot overflow.
                    Some(Self(q + 1))
                }
            }
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
