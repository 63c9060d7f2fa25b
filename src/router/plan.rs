//! Ephemeral route plans.

use crate::domain::{PoolId, TokenId};

/// One step of a route: sell `token_in` into `pool`, receive
/// `token_out`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hop {
    pool: PoolId,
    token_in: TokenId,
    token_out: TokenId,
}

impl Hop {
    /// Creates a new hop.
    #[must_use]
    pub const fn new(pool: PoolId, token_in: TokenId, token_out: TokenId) -> Self {
        Self {
            pool,
            token_in,
            token_out,
        }
    }

    /// Returns the pool this hop trades against.
    #[must_use]
    pub const fn pool(&self) -> PoolId {
        self.pool
    }

    /// Returns the token sold into the pool.
    #[must_use]
    pub const fn token_in(&self) -> TokenId {
        self.token_in
    }

    /// Returns the token received from the pool.
    #[must_use]
    pub const fn token_out(&self) -> TokenId {
        self.token_out
    }
}

/// An ordered sequence of hops from an input token to an output token.
///
/// Router-internal and ephemeral: a plan is computed, executed, and
/// dropped — never persisted.  Plans never visit the same pool twice,
/// which is what lets a read-only simulation of the path predict
/// execution exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePlan {
    hops: Vec<Hop>,
}

impl RoutePlan {
    /// Creates a plan from an ordered hop list.
    #[must_use]
    pub fn new(hops: Vec<Hop>) -> Self {
        Self { hops }
    }

    /// Returns the hops in execution order.
    #[must_use]
    pub fn hops(&self) -> &[Hop] {
        &self.hops
    }

    /// Returns `true` for a single-hop (direct) plan.
    #[must_use]
    pub fn is_direct(&self) -> bool {
        self.hops.len() == 1
    }

    /// Returns the token the plan starts from, if any.
    #[must_use]
    pub fn token_in(&self) -> Option<TokenId> {
        self.hops.first().map(Hop::token_in)
    }

    /// Returns the token the plan ends at, if any.
    #[must_use]
    pub fn token_out(&self) -> Option<TokenId> {
        self.hops.last().map(Hop::token_out)
    }
}
