//! Point-in-time values for deadline checks.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A point in time expressed as whole seconds since the Unix epoch.
///
/// The core never schedules anything; a `Timestamp` only ever appears in
/// point-in-time comparisons (deadline checks and the reserve snapshot
/// time reported by `get_reserves`).
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
pub struct Timestamp(u64);

impl Timestamp {
    /// The Unix epoch.
    pub const ZERO: Self = Self(0);

    /// Creates a `Timestamp` from whole seconds since the Unix epoch.
    #[must_use]
    pub const fn new(seconds: u64) -> Self {
        Self(seconds)
    }

    /// Returns the underlying seconds value.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Returns `true` if `self` is strictly later than `deadline`.
    #[must_use]
    pub const fn is_after(&self, deadline: Self) -> bool {
        self.0 > deadline.0
    }

    /// Returns this timestamp advanced by `seconds`, saturating at the
    /// maximum representable time.
    #[must_use]
    pub const fn plus(&self, seconds: u64) -> Self {
        Self(self.0.saturating_add(seconds))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}
