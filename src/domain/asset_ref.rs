//! Tagged reference to either the native asset or a fungible token.

use serde::{Deserialize, Serialize};

use super::TokenId;

/// What a client is trading: the native currency or a fungible token.
///
/// The router resolves `Native` into the wrapped token exactly once at
/// its boundary; pools and the registry only ever see fungible token
/// ids.
///
/// # Examples
///
/// ```
/// use prism_dex::domain::{AssetRef, TokenId};
///
/// let wrapped = TokenId::from_bytes([9u8; 32]);
/// assert_eq!(AssetRef::Native.resolve(wrapped), wrapped);
///
/// let tok = TokenId::from_bytes([1u8; 32]);
/// assert_eq!(AssetRef::Fungible(tok).resolve(wrapped), tok);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetRef {
    /// The native, non-fungible-ledger currency.
    Native,
    /// A fungible token.
    Fungible(TokenId),
}

impl AssetRef {
    /// Returns `true` for the native variant.
    #[must_use]
    pub const fn is_native(&self) -> bool {
        matches!(self, Self::Native)
    }

    /// Resolves this reference to a fungible token id, substituting
    /// `wrapped` for the native asset.
    #[must_use]
    pub const fn resolve(&self, wrapped: TokenId) -> TokenId {
        match self {
            Self::Native => wrapped,
            Self::Fungible(token) => *token,
        }
    }
}
