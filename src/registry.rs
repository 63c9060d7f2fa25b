//! Append-only pair → pool registry.
//!
//! The registry exclusively owns the mapping from canonical token pairs
//! to pools and the pools themselves.  Pools are created, never updated
//! or deleted: a drained pool stays registered and addressable.  Each
//! pool sits behind its own mutex — that lock is the unit of mutual
//! exclusion for `mint`/`burn`/`swap`, while operations on distinct
//! pools proceed in parallel.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::info;

use crate::config::DexConfig;
use crate::domain::{AccountId, Amount, FeeTier, PoolId, Shares, Timestamp, TokenId, TokenPair};
use crate::error::DexError;
use crate::pool::Pool;
use crate::traits::FromConfig;

/// The registry of all pools in one exchange deployment.
///
/// An explicit owned store, not a singleton: tests routinely run several
/// independent registries side by side.
///
/// # Examples
///
/// ```
/// use prism_dex::domain::{FeeTier, PoolId, TokenId, TokenPair};
/// use prism_dex::registry::Registry;
///
/// let registry = Registry::new(FeeTier::STANDARD);
/// let a = TokenId::from_bytes([1u8; 32]);
/// let b = TokenId::from_bytes([2u8; 32]);
///
/// let id = registry.create_pool(a, b).expect("pool created");
///
/// // The id is derivable offline, without asking the registry.
/// let pair = TokenPair::new(a, b).expect("distinct");
/// assert_eq!(id, PoolId::derive(&pair));
/// assert_eq!(registry.get_pool(b, a), Some(id));
/// ```
#[derive(Debug)]
pub struct Registry {
    fee: FeeTier,
    pairs: RwLock<BTreeMap<TokenPair, PoolId>>,
    pools: RwLock<BTreeMap<PoolId, Arc<Mutex<Pool>>>>,
}

impl Registry {
    /// Creates an empty registry whose pools will charge `fee`.
    #[must_use]
    pub fn new(fee: FeeTier) -> Self {
        Self {
            fee,
            pairs: RwLock::new(BTreeMap::new()),
            pools: RwLock::new(BTreeMap::new()),
        }
    }

    /// Returns the fee tier every registered pool charges.
    #[must_use]
    pub const fn fee(&self) -> FeeTier {
        self.fee
    }

    /// Registers a new pool for the unordered pair `(token_a, token_b)`.
    ///
    /// The identifier is deterministic, so clients may precompute it
    /// before this call — for example to authorize transfers to the pool
    /// in advance.
    ///
    /// # Errors
    ///
    /// - [`DexError::IdenticalTokens`] if both ids are equal.
    /// - [`DexError::PairExists`] if the pair is already registered, in
    ///   either order.
    pub fn create_pool(&self, token_a: TokenId, token_b: TokenId) -> crate::error::Result<PoolId> {
        let pair = TokenPair::new(token_a, token_b)?;
        let id = PoolId::derive(&pair);

        let mut pairs = self.pairs.write();
        if pairs.contains_key(&pair) {
            return Err(DexError::PairExists);
        }
        pairs.insert(pair, id);
        self.pools
            .write()
            .insert(id, Arc::new(Mutex::new(Pool::new(id, pair, self.fee))));

        info!(pool = %id, "pool registered");
        Ok(id)
    }

    /// Looks up the pool for the unordered pair `(token_a, token_b)`.
    ///
    /// Absence is not an error — callers use it to decide between "use
    /// existing pool" and "create one", or to test path existence.
    #[must_use]
    pub fn get_pool(&self, token_a: TokenId, token_b: TokenId) -> Option<PoolId> {
        let pair = TokenPair::new(token_a, token_b).ok()?;
        self.pairs.read().get(&pair).copied()
    }

    /// Returns a handle to the pool behind `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::PairNotFound`] for an unknown id.
    pub fn pool(&self, id: PoolId) -> crate::error::Result<Arc<Mutex<Pool>>> {
        self.pools
            .read()
            .get(&id)
            .cloned()
            .ok_or(DexError::PairNotFound)
    }

    /// Returns the canonical reserves of a pool and the time of its
    /// last mutation.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::PairNotFound`] for an unknown id.
    pub fn get_reserves(&self, id: PoolId) -> crate::error::Result<(Amount, Amount, Timestamp)> {
        let pool = self.pool(id)?;
        let pool = pool.lock();
        Ok((pool.reserve_x(), pool.reserve_y(), pool.last_update()))
    }

    /// Returns `owner`'s share balance in the pool behind `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::PairNotFound`] for an unknown id.
    pub fn balance_of(&self, id: PoolId, owner: AccountId) -> crate::error::Result<Shares> {
        let pool = self.pool(id)?;
        let shares = pool.lock().shares_of(owner);
        Ok(shares)
    }

    /// Returns the number of registered pools.
    #[must_use]
    pub fn pool_count(&self) -> usize {
        self.pools.read().len()
    }
}

impl FromConfig<DexConfig> for Registry {
    /// Creates an empty registry from a validated configuration.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`DexConfig::validate`].
    fn from_config(config: &DexConfig) -> Result<Self, DexError> {
        config.validate()?;
        Ok(Self::new(config.fee()))
    }
}
