//! Opaque fungible-token identifier.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Identifies one fungible token type.
///
/// Wraps a fixed 32-byte value and is totally ordered, which is what lets
/// an unordered token pair be canonicalized into a single representation.
/// All 32-byte sequences are valid identifiers, so construction is
/// infallible.
///
/// # Examples
///
/// ```
/// use prism_dex::domain::TokenId;
///
/// let a = TokenId::from_bytes([1u8; 32]);
/// let b = TokenId::from_bytes([2u8; 32]);
/// assert!(a < b);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TokenId([u8; 32]);

impl TokenId {
    /// Creates a `TokenId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0[..4] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "…")
    }
}
