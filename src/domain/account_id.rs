//! Caller and owner identity.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Identifies the owner of token balances and liquidity shares.
///
/// The core never authenticates accounts; callers arrive already
/// authenticated, so an `AccountId` is just an opaque 32-byte identity
/// used as a ledger key.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct AccountId([u8; 32]);

impl AccountId {
    /// The null owner: an unspendable identity that receives the
    /// permanently locked minimum liquidity shares on a pool's first
    /// provision.  Nothing can ever burn shares held here.
    pub const NULL: Self = Self([0u8; 32]);

    /// Creates an `AccountId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Returns `true` if this is the null owner.
    #[must_use]
    pub fn is_null(&self) -> bool {
        *self == Self::NULL
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0[..4] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "…")
    }
}
