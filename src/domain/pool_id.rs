//! Deterministic pool identifiers.

use core::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::{AccountId, TokenPair};

/// Fingerprint of the pool implementation mixed into every derived id.
///
/// Changing the pool code in an incompatible way means bumping this
/// constant, which moves every derived identifier — exactly like an init
/// code hash.
const POOL_CODE_FINGERPRINT: &[u8] = b"prism-dex/constant-product-pool/v1";

/// The identifier of one registered pool.
///
/// A `PoolId` is a pure function of the canonical token pair and
/// [`POOL_CODE_FINGERPRINT`]: any collaborator can compute a pool's id
/// offline, without querying the registry, and two independent creations
/// for the same pair always collide on the same id.
///
/// # Examples
///
/// ```
/// use prism_dex::domain::{PoolId, TokenId, TokenPair};
///
/// let a = TokenId::from_bytes([1u8; 32]);
/// let b = TokenId::from_bytes([2u8; 32]);
/// let ab = TokenPair::new(a, b).expect("distinct");
/// let ba = TokenPair::new(b, a).expect("distinct");
///
/// // Order-independent: both orderings canonicalize to one id.
/// assert_eq!(PoolId::derive(&ab), PoolId::derive(&ba));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct PoolId([u8; 32]);

impl PoolId {
    /// Derives the identifier for the pool of `pair`.
    ///
    /// `SHA-256(fingerprint ‖ token_x ‖ token_y)` over the canonical
    /// ordering, so `(A, B)` and `(B, A)` always yield the same id.
    #[must_use]
    pub fn derive(pair: &TokenPair) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(POOL_CODE_FINGERPRINT);
        hasher.update(pair.token_x().as_bytes());
        hasher.update(pair.token_y().as_bytes());
        Self(hasher.finalize().into())
    }

    /// Creates a `PoolId` from raw bytes.
    ///
    /// Intended for callers that precomputed the id offline.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Returns the ledger account the pool holds its reserves under.
    #[must_use]
    pub const fn account(&self) -> AccountId {
        AccountId::from_bytes(self.0)
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0[..4] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "…")
    }
}
