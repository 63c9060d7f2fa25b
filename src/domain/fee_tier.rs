//! Swap fee tiers built on [`BasisPoints`].

use core::fmt;

use serde::{Deserialize, Serialize};

use super::BasisPoints;

/// The fee rate a pool charges on every swap, taken from the input side.
///
/// Any [`BasisPoints`] value below 100% is meaningful; the canonical
/// tier for volatile pairs is [`FeeTier::STANDARD`] (0.30%).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
pub struct FeeTier(BasisPoints);

impl FeeTier {
    /// The standard 0.30% tier (30 bp).
    pub const STANDARD: Self = Self(BasisPoints::new(30));

    /// A zero-fee tier, useful in tests that isolate the pricing curve.
    pub const FREE: Self = Self(BasisPoints::ZERO);

    /// Creates a new `FeeTier` from arbitrary [`BasisPoints`].
    #[must_use]
    pub const fn new(basis_points: BasisPoints) -> Self {
        Self(basis_points)
    }

    /// Returns the underlying [`BasisPoints`].
    #[must_use]
    pub const fn basis_points(&self) -> BasisPoints {
        self.0
    }
}

impl Default for FeeTier {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeeTier({})", self.0)
    }
}
