//! Canonical unordered pair of distinct tokens.

use serde::{Deserialize, Serialize};

use super::TokenId;
use crate::error::DexError;

/// An unordered pair of distinct token ids in canonical order.
///
/// Construction sorts the two ids so that `token_x() < token_y()`, which
/// is what guarantees `(A, B)` and `(B, A)` describe the same pool and
/// no two pools can ever exist for one unordered pair.
///
/// # Examples
///
/// ```
/// use prism_dex::domain::{TokenId, TokenPair};
///
/// let a = TokenId::from_bytes([1u8; 32]);
/// let b = TokenId::from_bytes([2u8; 32]);
///
/// let pair = TokenPair::new(b, a).expect("distinct tokens");
/// assert_eq!(pair.token_x(), a);
/// assert_eq!(pair.token_y(), b);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TokenPair {
    token_x: TokenId,
    token_y: TokenId,
}

impl TokenPair {
    /// Creates a new canonically ordered `TokenPair`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::IdenticalTokens`] if both ids are equal.
    pub fn new(token_a: TokenId, token_b: TokenId) -> crate::error::Result<Self> {
        if token_a == token_b {
            return Err(DexError::IdenticalTokens);
        }
        let (token_x, token_y) = if token_a < token_b {
            (token_a, token_b)
        } else {
            (token_b, token_a)
        };
        Ok(Self { token_x, token_y })
    }

    /// Returns the canonical first token (lower id).
    #[must_use]
    pub const fn token_x(&self) -> TokenId {
        self.token_x
    }

    /// Returns the canonical second token (higher id).
    #[must_use]
    pub const fn token_y(&self) -> TokenId {
        self.token_y
    }

    /// Returns `true` if `token` is one of the pair's members.
    #[must_use]
    pub fn contains(&self, token: TokenId) -> bool {
        self.token_x == token || self.token_y == token
    }

    /// Returns the counterpart of `token` in this pair.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::PairNotFound`] if `token` is not a member.
    pub fn other(&self, token: TokenId) -> crate::error::Result<TokenId> {
        if token == self.token_x {
            Ok(self.token_y)
        } else if token == self.token_y {
            Ok(self.token_x)
        } else {
            Err(DexError::PairNotFound)
        }
    }
}
