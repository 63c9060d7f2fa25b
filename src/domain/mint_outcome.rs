//! Outcome of a liquidity provision.

use core::fmt;

use super::{Amount, Shares};

/// What a `mint` (or a deposit quote) produced: the shares issued and
/// the amounts the pool actually consumed on each side.
///
/// Consumed amounts can be smaller than the desired amounts the caller
/// offered — the excess on the non-limiting side is never pulled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MintOutcome {
    shares: Shares,
    amount_x_used: Amount,
    amount_y_used: Amount,
}

impl MintOutcome {
    /// Creates a new `MintOutcome`.
    #[must_use]
    pub const fn new(shares: Shares, amount_x_used: Amount, amount_y_used: Amount) -> Self {
        Self {
            shares,
            amount_x_used,
            amount_y_used,
        }
    }

    /// Returns the shares issued to the depositor.
    #[must_use]
    pub const fn shares(&self) -> Shares {
        self.shares
    }

    /// Returns the amount of the canonical first token consumed.
    #[must_use]
    pub const fn amount_x_used(&self) -> Amount {
        self.amount_x_used
    }

    /// Returns the amount of the canonical second token consumed.
    #[must_use]
    pub const fn amount_y_used(&self) -> Amount {
        self.amount_y_used
    }
}

impl fmt::Display for MintOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MintOutcome(shares={}, x={}, y={})",
            self.shares, self.amount_x_used, self.amount_y_used
        )
    }
}
