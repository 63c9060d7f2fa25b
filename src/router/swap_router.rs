//! The swap router.

use std::sync::Arc;

use parking_lot::MutexGuard;
use tracing::{debug, info};

use super::plan::{Hop, RoutePlan};
use crate::domain::{
    AccountId, Amount, AssetRef, PoolId, Shares, Timestamp, TokenId, TokenPair,
};
use crate::error::DexError;
use crate::pool::{swap_output, Pool};
use crate::registry::Registry;
use crate::traits::{Clock, NativeVault, TokenLedger};

/// Stateless orchestration over a [`Registry`] and a token ledger.
///
/// The router plans routes of at most two hops (direct, or through the
/// configured base asset), executes them atomically, and maps liquidity
/// intents onto pool operations with caller-supplied slippage guards.
/// It never holds pool state of its own — each pool's mutex is the only
/// serialization involved.
///
/// Minimum-amount guards are forwarded exactly as given.  A zero
/// minimum is honored as "no protection requested", never treated as a
/// special disable flag.
#[derive(Debug)]
pub struct Router<L, C> {
    registry: Arc<Registry>,
    ledger: Arc<L>,
    clock: C,
    base_asset: TokenId,
}

impl<L, C> Router<L, C>
where
    L: TokenLedger + NativeVault,
    C: Clock,
{
    /// Creates a router over `registry` and `ledger`.
    ///
    /// The routing base asset defaults to the ledger's wrapped native
    /// token.
    #[must_use]
    pub fn new(registry: Arc<Registry>, ledger: Arc<L>, clock: C) -> Self {
        let base_asset = ledger.wrapped_token();
        Self {
            registry,
            ledger,
            clock,
            base_asset,
        }
    }

    /// Overrides the routing base asset.
    #[must_use]
    pub fn with_base_asset(mut self, base_asset: TokenId) -> Self {
        self.base_asset = base_asset;
        self
    }

    /// Returns the configured routing base asset.
    #[must_use]
    pub const fn base_asset(&self) -> TokenId {
        self.base_asset
    }

    /// Returns the registry this router plans against.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    fn check_deadline(&self, deadline: Timestamp) -> crate::error::Result<Timestamp> {
        let now = self.clock.now();
        if now.is_after(deadline) {
            return Err(DexError::Expired);
        }
        Ok(now)
    }

    // -- path discovery -------------------------------------------------------

    /// Finds a route from `token_in` to `token_out`.
    ///
    /// A direct pool wins; otherwise two hops through the base asset.
    /// The search never goes deeper — liquidity concentrates around the
    /// base asset, and two hops bounds the worst-case path cost.
    ///
    /// # Errors
    ///
    /// - [`DexError::IdenticalTokens`] if the endpoints are equal.
    /// - [`DexError::NoPathFound`] if neither route exists.
    pub fn resolve_path(
        &self,
        token_in: TokenId,
        token_out: TokenId,
    ) -> crate::error::Result<RoutePlan> {
        if token_in == token_out {
            return Err(DexError::IdenticalTokens);
        }

        if let Some(direct) = self.registry.get_pool(token_in, token_out) {
            debug!(pool = %direct, "direct path resolved");
            return Ok(RoutePlan::new(vec![Hop::new(direct, token_in, token_out)]));
        }

        let base = self.base_asset;
        if token_in != base && token_out != base {
            if let (Some(first), Some(second)) = (
                self.registry.get_pool(token_in, base),
                self.registry.get_pool(base, token_out),
            ) {
                debug!(first = %first, second = %second, "two-hop path resolved");
                return Ok(RoutePlan::new(vec![
                    Hop::new(first, token_in, base),
                    Hop::new(second, base, token_out),
                ]));
            }
        }

        Err(DexError::NoPathFound)
    }

    /// Builds a plan from an explicit token path.
    ///
    /// # Errors
    ///
    /// - [`DexError::NoPathFound`] if the path has fewer than two
    ///   tokens.
    /// - [`DexError::PairNotFound`] if any consecutive pair has no pool.
    pub fn plan_from_path(&self, path: &[TokenId]) -> crate::error::Result<RoutePlan> {
        if path.len() < 2 {
            return Err(DexError::NoPathFound);
        }
        let mut hops = Vec::with_capacity(path.len() - 1);
        for window in path.windows(2) {
            let pool = self
                .registry
                .get_pool(window[0], window[1])
                .ok_or(DexError::PairNotFound)?;
            hops.push(Hop::new(pool, window[0], window[1]));
        }
        Ok(RoutePlan::new(hops))
    }

    // -- swap execution -------------------------------------------------------

    /// Executes a planned swap atomically.
    ///
    /// Every pool on the path is locked (in id order, so two plans can
    /// never deadlock each other), the whole path is simulated with the
    /// live pricing formula, and only if the simulated output clears
    /// `min_amount_out` does any hop commit.  A slippage failure
    /// therefore leaves every reserve untouched.
    ///
    /// Intermediate hop outputs land with `caller`; the final hop pays
    /// `to`.
    ///
    /// # Errors
    ///
    /// - [`DexError::Expired`] if `deadline` has passed (checked once,
    ///   before anything else).
    /// - [`DexError::SlippageExceeded`] if the simulated output is below
    ///   `min_amount_out`.
    /// - [`DexError::NoPathFound`] for an empty plan or one that visits
    ///   a pool twice.
    /// - Any pool or ledger error from the individual hops.
    pub fn execute_swap(
        &self,
        caller: AccountId,
        plan: &RoutePlan,
        amount_in: Amount,
        min_amount_out: Amount,
        to: AccountId,
        deadline: Timestamp,
    ) -> crate::error::Result<Amount> {
        let now = self.check_deadline(deadline)?;
        if plan.hops().is_empty() {
            return Err(DexError::NoPathFound);
        }

        let mut ids: Vec<PoolId> = plan.hops().iter().map(Hop::pool).collect();
        ids.sort_unstable();
        ids.dedup();
        if ids.len() != plan.hops().len() {
            // Revisiting a pool would let the simulation drift from the
            // commit; no sensible route does it.
            return Err(DexError::NoPathFound);
        }

        let handles = ids
            .iter()
            .map(|id| Ok((*id, self.registry.pool(*id)?)))
            .collect::<crate::error::Result<Vec<_>>>()?;
        let mut guards: Vec<(PoolId, MutexGuard<'_, Pool>)> =
            handles.iter().map(|(id, handle)| (*id, handle.lock())).collect();

        // Read-only pass over the whole path first.
        let mut simulated = amount_in;
        for hop in plan.hops() {
            let pool = guards
                .iter()
                .find(|(id, _)| *id == hop.pool())
                .map(|(_, guard)| guard)
                .ok_or(DexError::PairNotFound)?;
            let (reserve_in, reserve_out) = pool.oriented_reserves(hop.token_in())?;
            simulated = swap_output(simulated, reserve_in, reserve_out, pool.fee_tier())?;
        }
        if simulated < min_amount_out {
            return Err(DexError::SlippageExceeded);
        }

        // Commit hop by hop; the simulation already proved each step.
        let mut amount = amount_in;
        let last = plan.hops().len() - 1;
        for (index, hop) in plan.hops().iter().enumerate() {
            let recipient = if index == last { to } else { caller };
            let position = guards
                .iter()
                .position(|(id, _)| *id == hop.pool())
                .ok_or(DexError::PairNotFound)?;
            let (_, pool) = &mut guards[position];
            let input_is_x = hop.token_in() == pool.pair().token_x();
            amount = pool.swap(self.ledger.as_ref(), caller, recipient, amount, input_is_x, now)?;
        }

        info!(
            hops = plan.hops().len(),
            amount_in = %amount_in,
            amount_out = %amount,
            "swap executed"
        );
        Ok(amount)
    }

    /// Swaps an exact token input along an explicit path.
    ///
    /// # Errors
    ///
    /// See [`execute_swap`](Self::execute_swap) and
    /// [`plan_from_path`](Self::plan_from_path).
    pub fn swap_exact_tokens_for_tokens(
        &self,
        caller: AccountId,
        amount_in: Amount,
        amount_out_min: Amount,
        path: &[TokenId],
        to: AccountId,
        deadline: Timestamp,
    ) -> crate::error::Result<Amount> {
        let plan = self.plan_from_path(path)?;
        self.execute_swap(caller, &plan, amount_in, amount_out_min, to, deadline)
    }

    /// Swaps an exact native input for tokens.
    ///
    /// The native amount is supplied out-of-band (the caller's native
    /// balance is debited), wrapped at this boundary, and the path must
    /// start at the wrapped token.
    ///
    /// # Errors
    ///
    /// [`DexError::NoPathFound`] if the path does not start at the
    /// wrapped token; otherwise see
    /// [`execute_swap`](Self::execute_swap).
    pub fn swap_exact_native_for_tokens(
        &self,
        caller: AccountId,
        native_in: Amount,
        amount_out_min: Amount,
        path: &[TokenId],
        to: AccountId,
        deadline: Timestamp,
    ) -> crate::error::Result<Amount> {
        let wrapped = self.ledger.wrapped_token();
        if path.first() != Some(&wrapped) {
            return Err(DexError::NoPathFound);
        }
        let plan = self.plan_from_path(path)?;
        self.check_deadline(deadline)?;

        self.ledger.wrap(caller, native_in)?;
        match self.execute_swap(caller, &plan, native_in, amount_out_min, to, deadline) {
            Ok(amount_out) => Ok(amount_out),
            Err(e) => {
                // Nothing committed; hand the caller their native funds back.
                let _ = self.ledger.unwrap(caller, native_in);
                Err(e)
            }
        }
    }

    /// Swaps an exact token input for the native currency.
    ///
    /// The path must end at the wrapped token; the final output is
    /// unwrapped to `to`.
    ///
    /// # Errors
    ///
    /// [`DexError::NoPathFound`] if the path does not end at the
    /// wrapped token; otherwise see
    /// [`execute_swap`](Self::execute_swap).
    pub fn swap_exact_tokens_for_native(
        &self,
        caller: AccountId,
        amount_in: Amount,
        amount_out_min: Amount,
        path: &[TokenId],
        to: AccountId,
        deadline: Timestamp,
    ) -> crate::error::Result<Amount> {
        let wrapped = self.ledger.wrapped_token();
        if path.last() != Some(&wrapped) {
            return Err(DexError::NoPathFound);
        }
        let plan = self.plan_from_path(path)?;
        let amount_out = self.execute_swap(caller, &plan, amount_in, amount_out_min, to, deadline)?;
        // `to` just received this much wrapped; unwrapping cannot fail.
        self.ledger.unwrap(to, amount_out)?;
        Ok(amount_out)
    }

    /// Swaps between two [`AssetRef`]s, resolving `Native` to the
    /// wrapped token once at this boundary.
    ///
    /// # Errors
    ///
    /// See [`resolve_path`](Self::resolve_path) and
    /// [`execute_swap`](Self::execute_swap).
    pub fn swap_exact(
        &self,
        caller: AccountId,
        asset_in: AssetRef,
        asset_out: AssetRef,
        amount_in: Amount,
        amount_out_min: Amount,
        to: AccountId,
        deadline: Timestamp,
    ) -> crate::error::Result<Amount> {
        let wrapped = self.ledger.wrapped_token();
        let token_in = asset_in.resolve(wrapped);
        let token_out = asset_out.resolve(wrapped);
        let plan = self.resolve_path(token_in, token_out)?;
        self.check_deadline(deadline)?;

        if asset_in.is_native() {
            self.ledger.wrap(caller, amount_in)?;
        }
        let amount_out =
            match self.execute_swap(caller, &plan, amount_in, amount_out_min, to, deadline) {
                Ok(amount_out) => amount_out,
                Err(e) => {
                    if asset_in.is_native() {
                        let _ = self.ledger.unwrap(caller, amount_in);
                    }
                    return Err(e);
                }
            };
        if asset_out.is_native() {
            self.ledger.unwrap(to, amount_out)?;
        }
        Ok(amount_out)
    }

    // -- liquidity ------------------------------------------------------------

    /// Adds liquidity to the pool for `(token_a, token_b)`, creating
    /// the pool first if it does not exist yet.
    ///
    /// The deposit is quoted against live reserves, the consumed
    /// amounts are checked against the caller's minimums, and only then
    /// is the mint committed — all under the pool's lock.
    ///
    /// Returns `(amount_a_used, amount_b_used, shares)` in the caller's
    /// token order.
    ///
    /// # Errors
    ///
    /// - [`DexError::Expired`] if `deadline` has passed.
    /// - [`DexError::SlippageExceeded`] if a consumed amount falls below
    ///   its minimum.
    /// - Any pool or ledger error from the mint itself.
    #[allow(clippy::too_many_arguments)]
    pub fn add_liquidity(
        &self,
        caller: AccountId,
        token_a: TokenId,
        token_b: TokenId,
        amount_a_desired: Amount,
        amount_b_desired: Amount,
        amount_a_min: Amount,
        amount_b_min: Amount,
        to: AccountId,
        deadline: Timestamp,
    ) -> crate::error::Result<(Amount, Amount, Shares)> {
        let now = self.check_deadline(deadline)?;
        let pair = TokenPair::new(token_a, token_b)?;
        let id = match self.registry.get_pool(token_a, token_b) {
            Some(id) => id,
            None => self.registry.create_pool(token_a, token_b)?,
        };

        let a_is_x = token_a == pair.token_x();
        let (dx, dy) = if a_is_x {
            (amount_a_desired, amount_b_desired)
        } else {
            (amount_b_desired, amount_a_desired)
        };
        let (min_x, min_y) = if a_is_x {
            (amount_a_min, amount_b_min)
        } else {
            (amount_b_min, amount_a_min)
        };

        let handle = self.registry.pool(id)?;
        let mut pool = handle.lock();
        let quote = pool.quote_deposit(dx, dy)?;
        if quote.amount_x_used() < min_x || quote.amount_y_used() < min_y {
            return Err(DexError::SlippageExceeded);
        }
        let outcome = pool.mint(self.ledger.as_ref(), caller, to, dx, dy, now)?;
        drop(pool);

        info!(pool = %id, shares = %outcome.shares(), "liquidity added");
        let (used_a, used_b) = if a_is_x {
            (outcome.amount_x_used(), outcome.amount_y_used())
        } else {
            (outcome.amount_y_used(), outcome.amount_x_used())
        };
        Ok((used_a, used_b, outcome.shares()))
    }

    /// Adds liquidity to the pool of `token` and the wrapped native
    /// token, supplying the native side out-of-band.
    ///
    /// `native_amount` is wrapped at this boundary; whatever the pool
    /// does not consume is unwrapped straight back to the caller.
    ///
    /// Returns `(amount_token_used, native_used, shares)`.
    ///
    /// # Errors
    ///
    /// See [`add_liquidity`](Self::add_liquidity); additionally fails if
    /// the caller's native balance cannot cover `native_amount`.
    #[allow(clippy::too_many_arguments)]
    pub fn add_liquidity_native(
        &self,
        caller: AccountId,
        token: TokenId,
        amount_token_desired: Amount,
        amount_token_min: Amount,
        amount_native_min: Amount,
        to: AccountId,
        deadline: Timestamp,
        native_amount: Amount,
    ) -> crate::error::Result<(Amount, Amount, Shares)> {
        self.check_deadline(deadline)?;
        let wrapped = self.ledger.wrapped_token();
        self.ledger.wrap(caller, native_amount)?;

        let result = self.add_liquidity(
            caller,
            token,
            wrapped,
            amount_token_desired,
            native_amount,
            amount_token_min,
            amount_native_min,
            to,
            deadline,
        );
        match result {
            Ok((used_token, used_wrapped, shares)) => {
                let refund = native_amount.checked_sub(&used_wrapped).unwrap_or(Amount::ZERO);
                if !refund.is_zero() {
                    self.ledger.unwrap(caller, refund)?;
                }
                Ok((used_token, used_wrapped, shares))
            }
            Err(e) => {
                let _ = self.ledger.unwrap(caller, native_amount);
                Err(e)
            }
        }
    }

    /// Removes liquidity from the pool for `(token_a, token_b)`.
    ///
    /// Returns `(amount_a_out, amount_b_out)` in the caller's token
    /// order.
    ///
    /// # Errors
    ///
    /// - [`DexError::Expired`] if `deadline` has passed.
    /// - [`DexError::PairNotFound`] if no pool exists for the pair.
    /// - [`DexError::SlippageExceeded`] if an output falls below its
    ///   minimum (checked before any effect).
    /// - Any pool or ledger error from the burn itself.
    #[allow(clippy::too_many_arguments)]
    pub fn remove_liquidity(
        &self,
        caller: AccountId,
        token_a: TokenId,
        token_b: TokenId,
        shares: Shares,
        amount_a_min: Amount,
        amount_b_min: Amount,
        to: AccountId,
        deadline: Timestamp,
    ) -> crate::error::Result<(Amount, Amount)> {
        let now = self.check_deadline(deadline)?;
        let pair = TokenPair::new(token_a, token_b)?;
        let id = self
            .registry
            .get_pool(token_a, token_b)
            .ok_or(DexError::PairNotFound)?;

        let a_is_x = token_a == pair.token_x();
        let (min_x, min_y) = if a_is_x {
            (amount_a_min, amount_b_min)
        } else {
            (amount_b_min, amount_a_min)
        };

        let handle = self.registry.pool(id)?;
        let mut pool = handle.lock();
        let (quote_x, quote_y) = pool.quote_withdrawal(shares)?;
        if quote_x < min_x || quote_y < min_y {
            return Err(DexError::SlippageExceeded);
        }
        let (out_x, out_y) = pool.burn(self.ledger.as_ref(), caller, to, shares, now)?;
        drop(pool);

        info!(pool = %id, shares = %shares, "liquidity removed");
        if a_is_x {
            Ok((out_x, out_y))
        } else {
            Ok((out_y, out_x))
        }
    }

    /// Removes liquidity from the pool of `token` and the wrapped
    /// native token, unwrapping the native side to `to`.
    ///
    /// Returns `(amount_token_out, native_out)`.
    ///
    /// # Errors
    ///
    /// See [`remove_liquidity`](Self::remove_liquidity).
    #[allow(clippy::too_many_arguments)]
    pub fn remove_liquidity_native(
        &self,
        caller: AccountId,
        token: TokenId,
        shares: Shares,
        amount_token_min: Amount,
        amount_native_min: Amount,
        to: AccountId,
        deadline: Timestamp,
    ) -> crate::error::Result<(Amount, Amount)> {
        let wrapped = self.ledger.wrapped_token();
        let (amount_token, amount_wrapped) = self.remove_liquidity(
            caller,
            token,
            wrapped,
            shares,
            amount_token_min,
            amount_native_min,
            to,
            deadline,
        )?;
        // `to` just received this much wrapped; unwrapping cannot fail.
        self.ledger.unwrap(to, amount_wrapped)?;
        Ok((amount_token, amount_wrapped))
    }

    // -- quotes ---------------------------------------------------------------

    /// Quotes a deposit without executing it, using the exact rounding
    /// `mint` will apply.
    ///
    /// A missing pool is quoted as a first provision, since
    /// [`add_liquidity`](Self::add_liquidity) would create it.
    ///
    /// Returns `(amount_a_used, amount_b_used, shares)` in the caller's
    /// token order.
    ///
    /// # Errors
    ///
    /// See [`Pool::quote_deposit`].
    pub fn quote_add_liquidity(
        &self,
        token_a: TokenId,
        token_b: TokenId,
        amount_a_desired: Amount,
        amount_b_desired: Amount,
    ) -> crate::error::Result<(Amount, Amount, Shares)> {
        let pair = TokenPair::new(token_a, token_b)?;
        let a_is_x = token_a == pair.token_x();
        let (dx, dy) = if a_is_x {
            (amount_a_desired, amount_b_desired)
        } else {
            (amount_b_desired, amount_a_desired)
        };

        let quote = match self.registry.get_pool(token_a, token_b) {
            Some(id) => {
                let handle = self.registry.pool(id)?;
                let quote = handle.lock().quote_deposit(dx, dy)?;
                quote
            }
            None => {
                let fresh = Pool::new(PoolId::derive(&pair), pair, self.registry.fee());
                fresh.quote_deposit(dx, dy)?
            }
        };

        let (used_a, used_b) = if a_is_x {
            (quote.amount_x_used(), quote.amount_y_used())
        } else {
            (quote.amount_y_used(), quote.amount_x_used())
        };
        Ok((used_a, used_b, quote.shares()))
    }

    /// Quotes a withdrawal without executing it, using the exact
    /// rounding `burn` will apply.
    ///
    /// Returns `(amount_a_out, amount_b_out)` in the caller's token
    /// order.
    ///
    /// # Errors
    ///
    /// [`DexError::PairNotFound`] if no pool exists; otherwise see
    /// [`Pool::quote_withdrawal`].
    pub fn quote_remove_liquidity(
        &self,
        token_a: TokenId,
        token_b: TokenId,
        shares: Shares,
    ) -> crate::error::Result<(Amount, Amount)> {
        let pair = TokenPair::new(token_a, token_b)?;
        let id = self
            .registry
            .get_pool(token_a, token_b)
            .ok_or(DexError::PairNotFound)?;
        let handle = self.registry.pool(id)?;
        let (out_x, out_y) = handle.lock().quote_withdrawal(shares)?;
        if token_a == pair.token_x() {
            Ok((out_x, out_y))
        } else {
            Ok((out_y, out_x))
        }
    }
}
