//! Basis-point representation for fee rates.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, Rounding};
use crate::error::DexError;

/// Maximum value that represents 100%.
const MAX_BPS: u32 = 10_000;

/// A rate expressed in basis points (1 bp = 0.01%, 10 000 bp = 100%).
///
/// The constant-product fee formula works with the *complement* of the
/// fee rate — the fraction of the input that still counts towards
/// pricing — which [`complement`](Self::complement) exposes directly.
///
/// # Examples
///
/// ```
/// use prism_dex::domain::BasisPoints;
///
/// let fee = BasisPoints::new(30); // 0.30%
/// assert_eq!(fee.complement(), 9_970);
/// assert!(fee.is_valid_percent());
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
pub struct BasisPoints(u32);

impl BasisPoints {
    /// Zero basis points (0%).
    pub const ZERO: Self = Self(0);

    /// 100% expressed in basis points.
    pub const MAX_PERCENT: Self = Self(MAX_BPS);

    /// The denominator shared by all basis-point math (10 000).
    pub const DENOMINATOR: u32 = MAX_BPS;

    /// Creates a new `BasisPoints` from a raw `u32` value.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the underlying `u32` value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns `true` if the value is in the valid range (`0..=10_000`).
    #[must_use]
    pub const fn is_valid_percent(&self) -> bool {
        self.0 <= MAX_BPS
    }

    /// Returns `10_000 - bps`, saturating at zero: the retained fraction
    /// of an input after the fee is taken.
    #[must_use]
    pub const fn complement(&self) -> u32 {
        MAX_BPS.saturating_sub(self.0)
    }

    /// Computes `amount * bps / 10_000` with explicit rounding.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::ArithmeticOverflow`] if the intermediate
    /// product overflows.
    pub const fn apply(&self, amount: Amount, rounding: Rounding) -> crate::error::Result<Amount> {
        let product = match amount.get().checked_mul(self.0 as u128) {
            Some(v) => v,
            None => return Err(DexError::ArithmeticOverflow("basis points apply")),
        };
        let divisor = MAX_BPS as u128;
        let q = product / divisor;
        let r = product % divisor;
        match rounding {
            Rounding::Down => Ok(Amount::new(q)),
            Rounding::Up => {
                if r == 0 {
                    Ok(Amount::new(q))
                } else {
                    Ok(Amount::new(q + 1))
                }
            }
        }
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    // -- Construction & accessors -------------------------------------------

    #[test]
    fn new_and_get() {
        assert_eq!(BasisPoints::new(30).get(), 30);
    }

    #[test]
    fn constants() {
        assert_eq!(BasisPoints::ZERO.get(), 0);
        assert_eq!(BasisPoints::MAX_PERCENT.get(), 10_000);
        assert_eq!(BasisPoints::DENOMINATOR, 10_000);
    }

    #[test]
    fn valid_percent_range() {
        assert!(BasisPoints::new(10_000).is_valid_percent());
        assert!(!BasisPoints::new(10_001).is_valid_percent());
    }

    // -- complement ---------------------------------------------------------

    #[test]
    fn complement_standard_fee() {
        assert_eq!(BasisPoints::new(30).complement(), 9_970);
    }

    #[test]
    fn complement_zero_fee() {
        assert_eq!(BasisPoints::ZERO.complement(), 10_000);
    }

    #[test]
    fn complement_saturates_above_full() {
        assert_eq!(BasisPoints::new(20_000).complement(), 0);
    }

    // -- apply --------------------------------------------------------------

    #[test]
    fn apply_rounds_down() {
        // 1000 * 30 / 10000 = 3 exactly
        let Ok(fee) = BasisPoints::new(30).apply(Amount::new(1_000), Rounding::Down) else {
            panic!("expected Ok");
        };
        assert_eq!(fee, Amount::new(3));
    }

    #[test]
    fn apply_rounds_up() {
        // 100 * 30 / 10000 = 0.3 → 1 when rounding up
        let Ok(fee) = BasisPoints::new(30).apply(Amount::new(100), Rounding::Up) else {
            panic!("expected Ok");
        };
        assert_eq!(fee, Amount::new(1));
    }

    #[test]
    fn apply_overflow_detected() {
        let result = BasisPoints::new(10_000).apply(Amount::MAX, Rounding::Down);
        assert!(matches!(result, Err(DexError::ArithmeticOverflow(_))));
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", BasisPoints::new(30)), "30bp");
    }
}
