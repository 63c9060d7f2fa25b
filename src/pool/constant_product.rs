//! Constant-product pool implementation.
//!
//! The pricing invariant is `x × y = k` over the two reserves.  The fee
//! is charged on the input side by scaling the effective input before
//! the pricing formula:
//!
//! ```text
//! in_after_fee = amount_in × (10_000 − fee_bps)
//! amount_out   = ⌊ in_after_fee × reserve_out / (reserve_in × 10_000 + in_after_fee) ⌋
//! ```
//!
//! The floor guarantees `k` never decreases; it strictly grows on every
//! swap that collects a fee.  Reserves are resynchronized from actual
//! ledger balances after every mutating operation, so the cached values
//! track ledger truth even when a transfer rounds or skims.

use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::{
    AccountId, Amount, BasisPoints, FeeTier, MintOutcome, PoolId, Rounding, Shares, Timestamp,
    TokenId, TokenPair,
};
use crate::error::DexError;
use crate::math::{isqrt, mul_div, CheckedArithmetic};
use crate::traits::TokenLedger;

/// Shares burned to the null owner on a pool's first provision.
///
/// Keeps `total_shares` from ever returning to zero while reserves are
/// nonzero, which would leave the per-share value undefined for the
/// next depositor.
pub const MINIMUM_LIQUIDITY: Shares = Shares::new(10);

/// Computes the output of a swap against the given reserves.
///
/// This is the one formula both live swaps and read-only route
/// simulation use, so a simulated path always matches what execution
/// produces against the same reserves.
///
/// # Errors
///
/// - [`DexError::InsufficientInputAmount`] if `amount_in` is zero.
/// - [`DexError::InsufficientLiquidity`] if either reserve is empty, or
///   the output would be zero or drain `reserve_out` completely.
/// - [`DexError::ArithmeticOverflow`] if an intermediate product does
///   not fit in `u128`.
pub fn swap_output(
    amount_in: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
    fee: FeeTier,
) -> crate::error::Result<Amount> {
    if amount_in.is_zero() {
        return Err(DexError::InsufficientInputAmount);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(DexError::InsufficientLiquidity);
    }

    let denominator_bps = u128::from(BasisPoints::DENOMINATOR);
    let kept_bps = u128::from(fee.basis_points().complement());

    let in_after_fee = amount_in
        .get()
        .checked_mul(kept_bps)
        .ok_or(DexError::ArithmeticOverflow("fee-scaled input"))?;
    let numerator = in_after_fee
        .checked_mul(reserve_out.get())
        .ok_or(DexError::ArithmeticOverflow("swap numerator"))?;
    let denominator = reserve_in
        .get()
        .checked_mul(denominator_bps)
        .ok_or(DexError::ArithmeticOverflow("swap denominator"))?
        .checked_add(in_after_fee)
        .ok_or(DexError::ArithmeticOverflow("swap denominator"))?;

    // denominator > 0 because reserve_in is nonzero.
    let out = numerator / denominator;
    if out == 0 || out >= reserve_out.get() {
        return Err(DexError::InsufficientLiquidity);
    }
    Ok(Amount::new(out))
}

/// Saved scalar state plus the share entries an operation may touch,
/// used to unwind effects when a ledger transfer fails mid-operation.
struct StateSnapshot {
    reserve_x: Amount,
    reserve_y: Amount,
    total_shares: Shares,
    last_update: Timestamp,
    minimum_liquidity_locked: bool,
    entries: Vec<(AccountId, Option<Shares>)>,
}

/// A constant-product pool for one canonical token pair.
///
/// The pool owns its reserve counters and share ledger exclusively;
/// nothing outside its own operations mutates them.  Callers are
/// expected to serialize operations per pool (the registry wraps each
/// pool in a mutex); the internal in-operation flag additionally
/// rejects re-entry should a ledger implementation call back into the
/// same pool mid-transfer.
#[derive(Debug)]
pub struct Pool {
    id: PoolId,
    pair: TokenPair,
    fee: FeeTier,
    reserve_x: Amount,
    reserve_y: Amount,
    total_shares: Shares,
    share_balances: BTreeMap<AccountId, Shares>,
    minimum_liquidity_locked: bool,
    last_update: Timestamp,
    entered: bool,
}

impl Pool {
    /// Creates an empty pool for `pair` charging `fee` per swap.
    #[must_use]
    pub fn new(id: PoolId, pair: TokenPair, fee: FeeTier) -> Self {
        Self {
            id,
            pair,
            fee,
            reserve_x: Amount::ZERO,
            reserve_y: Amount::ZERO,
            total_shares: Shares::ZERO,
            share_balances: BTreeMap::new(),
            minimum_liquidity_locked: false,
            last_update: Timestamp::ZERO,
            entered: false,
        }
    }

    /// Returns the pool's identifier.
    #[must_use]
    pub const fn id(&self) -> PoolId {
        self.id
    }

    /// Returns the canonical token pair.
    #[must_use]
    pub const fn pair(&self) -> TokenPair {
        self.pair
    }

    /// Returns the swap fee tier.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee
    }

    /// Returns the reserve of the canonical first token.
    #[must_use]
    pub const fn reserve_x(&self) -> Amount {
        self.reserve_x
    }

    /// Returns the reserve of the canonical second token.
    #[must_use]
    pub const fn reserve_y(&self) -> Amount {
        self.reserve_y
    }

    /// Returns the sum of all outstanding shares.
    #[must_use]
    pub const fn total_shares(&self) -> Shares {
        self.total_shares
    }

    /// Returns `owner`'s share balance.
    #[must_use]
    pub fn shares_of(&self, owner: AccountId) -> Shares {
        self.share_balances.get(&owner).copied().unwrap_or(Shares::ZERO)
    }

    /// Returns the time of the last mutating operation.
    #[must_use]
    pub const fn last_update(&self) -> Timestamp {
        self.last_update
    }

    /// Returns `true` once the first provision has locked the minimum
    /// shares to the null owner.
    #[must_use]
    pub const fn minimum_liquidity_locked(&self) -> bool {
        self.minimum_liquidity_locked
    }

    /// Returns the ledger account the pool holds its reserves under.
    #[must_use]
    pub const fn account(&self) -> AccountId {
        self.id.account()
    }

    /// Returns `(reserve_in, reserve_out)` for a swap selling
    /// `token_in`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::PairNotFound`] if `token_in` is not a member
    /// of the pool's pair.
    pub fn oriented_reserves(&self, token_in: TokenId) -> crate::error::Result<(Amount, Amount)> {
        if token_in == self.pair.token_x() {
            Ok((self.reserve_x, self.reserve_y))
        } else if token_in == self.pair.token_y() {
            Ok((self.reserve_y, self.reserve_x))
        } else {
            Err(DexError::PairNotFound)
        }
    }

    // -- quotes (read-only, identical rounding to the mutating ops) ---------

    /// Quotes a deposit without executing it.
    ///
    /// First provision: `shares = ⌊√(dx·dy)⌋ − MINIMUM_LIQUIDITY`, both
    /// amounts consumed in full.  Afterwards the smaller of the two
    /// ratio-implied share counts wins, and the consumed amounts are the
    /// ones that minimum implies — the excess on the other side is never
    /// taken.
    ///
    /// # Errors
    ///
    /// - [`DexError::InsufficientAmount`] if either desired amount is
    ///   zero, or the deposit is too small to mint a single share.
    /// - [`DexError::InsufficientInitialLiquidity`] if a first provision
    ///   cannot cover the minimum lock.
    pub fn quote_deposit(
        &self,
        amount_x_desired: Amount,
        amount_y_desired: Amount,
    ) -> crate::error::Result<MintOutcome> {
        if amount_x_desired.is_zero() || amount_y_desired.is_zero() {
            return Err(DexError::InsufficientAmount);
        }

        if self.total_shares.is_zero() {
            let product = amount_x_desired
                .get()
                .checked_mul(amount_y_desired.get())
                .ok_or(DexError::ArithmeticOverflow("initial deposit product"))?;
            let root = isqrt(product);
            if root <= MINIMUM_LIQUIDITY.get() {
                return Err(DexError::InsufficientInitialLiquidity);
            }
            return Ok(MintOutcome::new(
                Shares::new(root - MINIMUM_LIQUIDITY.get()),
                amount_x_desired,
                amount_y_desired,
            ));
        }

        let total = self.total_shares.get();
        let by_x = mul_div(amount_x_desired.get(), total, self.reserve_x.get(), Rounding::Down)?;
        let by_y = mul_div(amount_y_desired.get(), total, self.reserve_y.get(), Rounding::Down)?;

        // The minimum wins: crediting from the larger ratio would let a
        // depositor inflate one axis and be paid shares for it.
        let (shares, used_x, used_y) = if by_x <= by_y {
            let implied_y = mul_div(by_x, self.reserve_y.get(), total, Rounding::Up)?;
            (by_x, amount_x_desired.get(), implied_y.min(amount_y_desired.get()))
        } else {
            let implied_x = mul_div(by_y, self.reserve_x.get(), total, Rounding::Up)?;
            (by_y, implied_x.min(amount_x_desired.get()), amount_y_desired.get())
        };

        if shares == 0 {
            return Err(DexError::InsufficientAmount);
        }
        Ok(MintOutcome::new(
            Shares::new(shares),
            Amount::new(used_x),
            Amount::new(used_y),
        ))
    }

    /// Quotes a withdrawal without executing it.
    ///
    /// Both outputs use floor division — rounding always favors the
    /// pool, never the withdrawer, so repeated round trips cannot drain
    /// reserves.
    ///
    /// # Errors
    ///
    /// - [`DexError::InsufficientShares`] if `shares_in` is zero or
    ///   exceeds the outstanding total.
    /// - [`DexError::InsufficientLiquidity`] if either output rounds to
    ///   zero.
    pub fn quote_withdrawal(&self, shares_in: Shares) -> crate::error::Result<(Amount, Amount)> {
        if shares_in.is_zero() || shares_in > self.total_shares {
            return Err(DexError::InsufficientShares);
        }
        let total = self.total_shares.get();
        let out_x = mul_div(shares_in.get(), self.reserve_x.get(), total, Rounding::Down)?;
        let out_y = mul_div(shares_in.get(), self.reserve_y.get(), total, Rounding::Down)?;
        if out_x == 0 || out_y == 0 {
            return Err(DexError::InsufficientLiquidity);
        }
        Ok((Amount::new(out_x), Amount::new(out_y)))
    }

    // -- mutating operations -------------------------------------------------

    /// Deposits liquidity and issues shares to `to`.
    ///
    /// Pulls the consumed amounts from `payer` into the pool's ledger
    /// account.  See [`quote_deposit`](Self::quote_deposit) for the
    /// share math.
    ///
    /// # Errors
    ///
    /// Quote errors, plus [`DexError::InsufficientBalance`] if `payer`
    /// cannot cover a pull; in every error case no state change is
    /// observable.
    pub fn mint(
        &mut self,
        ledger: &dyn TokenLedger,
        payer: AccountId,
        to: AccountId,
        amount_x_desired: Amount,
        amount_y_desired: Amount,
        now: Timestamp,
    ) -> crate::error::Result<MintOutcome> {
        self.enter()?;
        let result = self.mint_locked(ledger, payer, to, amount_x_desired, amount_y_desired, now);
        self.entered = false;
        result
    }

    fn mint_locked(
        &mut self,
        ledger: &dyn TokenLedger,
        payer: AccountId,
        to: AccountId,
        amount_x_desired: Amount,
        amount_y_desired: Amount,
        now: Timestamp,
    ) -> crate::error::Result<MintOutcome> {
        let quote = self.quote_deposit(amount_x_desired, amount_y_desired)?;
        let first = self.total_shares.is_zero();

        // Compute every new value before touching state, so arithmetic
        // failures leave the pool untouched.
        let locked = if first { MINIMUM_LIQUIDITY } else { Shares::ZERO };
        let new_total = self
            .total_shares
            .safe_add(&quote.shares())?
            .safe_add(&locked)?;
        // If the recipient is the null owner itself, the lock credited
        // below is part of its balance too.
        let base_to = if first && to.is_null() {
            MINIMUM_LIQUIDITY
        } else {
            self.shares_of(to)
        };
        let new_to = base_to.safe_add(&quote.shares())?;
        let new_reserve_x = self.reserve_x.safe_add(&quote.amount_x_used())?;
        let new_reserve_y = self.reserve_y.safe_add(&quote.amount_y_used())?;

        let prev = self.snapshot(&[to, AccountId::NULL]);

        if first {
            self.share_balances.insert(AccountId::NULL, MINIMUM_LIQUIDITY);
            self.minimum_liquidity_locked = true;
        }
        self.share_balances.insert(to, new_to);
        self.total_shares = new_total;
        self.reserve_x = new_reserve_x;
        self.reserve_y = new_reserve_y;
        self.last_update = now;

        let pool_account = self.id.account();
        let token_x = self.pair.token_x();
        let token_y = self.pair.token_y();
        if let Err(e) = ledger.transfer(token_x, payer, pool_account, quote.amount_x_used()) {
            self.restore(prev);
            return Err(e);
        }
        if let Err(e) = ledger.transfer(token_y, payer, pool_account, quote.amount_y_used()) {
            // The pool just received the first leg; returning it cannot fail.
            let _ = ledger.transfer(token_x, pool_account, payer, quote.amount_x_used());
            self.restore(prev);
            return Err(e);
        }

        self.sync_reserves(ledger);
        debug!(pool = %self.id, shares = %quote.shares(), "liquidity minted");
        Ok(quote)
    }

    /// Burns `shares_in` of `owner`'s shares and pays the proportional
    /// reserves out to `to`.
    ///
    /// # Errors
    ///
    /// - [`DexError::InsufficientShares`] if `owner` holds fewer than
    ///   `shares_in`, or is the null owner (the locked minimum can
    ///   never be withdrawn).
    /// - [`DexError::InsufficientLiquidity`] if either output rounds to
    ///   zero.
    pub fn burn(
        &mut self,
        ledger: &dyn TokenLedger,
        owner: AccountId,
        to: AccountId,
        shares_in: Shares,
        now: Timestamp,
    ) -> crate::error::Result<(Amount, Amount)> {
        self.enter()?;
        let result = self.burn_locked(ledger, owner, to, shares_in, now);
        self.entered = false;
        result
    }

    fn burn_locked(
        &mut self,
        ledger: &dyn TokenLedger,
        owner: AccountId,
        to: AccountId,
        shares_in: Shares,
        now: Timestamp,
    ) -> crate::error::Result<(Amount, Amount)> {
        // The null owner's locked minimum is unspendable.
        if owner.is_null() {
            return Err(DexError::InsufficientShares);
        }
        let held = self.shares_of(owner);
        if shares_in.is_zero() || held < shares_in {
            return Err(DexError::InsufficientShares);
        }
        let (out_x, out_y) = self.quote_withdrawal(shares_in)?;

        let new_owner = held.safe_sub(&shares_in)?;
        let new_total = self.total_shares.safe_sub(&shares_in)?;
        let new_reserve_x = self.reserve_x.safe_sub(&out_x)?;
        let new_reserve_y = self.reserve_y.safe_sub(&out_y)?;

        let prev = self.snapshot(&[owner]);

        if new_owner.is_zero() {
            self.share_balances.remove(&owner);
        } else {
            self.share_balances.insert(owner, new_owner);
        }
        self.total_shares = new_total;
        self.reserve_x = new_reserve_x;
        self.reserve_y = new_reserve_y;
        self.last_update = now;

        let pool_account = self.id.account();
        let token_x = self.pair.token_x();
        let token_y = self.pair.token_y();
        if let Err(e) = ledger.transfer(token_x, pool_account, to, out_x) {
            self.restore(prev);
            return Err(e);
        }
        if let Err(e) = ledger.transfer(token_y, pool_account, to, out_y) {
            // `to` just received the first leg; taking it back cannot fail.
            let _ = ledger.transfer(token_x, to, pool_account, out_x);
            self.restore(prev);
            return Err(e);
        }

        self.sync_reserves(ledger);
        debug!(pool = %self.id, shares = %shares_in, "liquidity burned");
        Ok((out_x, out_y))
    }

    /// Sells `amount_in` of one side for the other.
    ///
    /// `input_is_x` selects the direction: `true` sells the canonical
    /// first token.  Pulls the input from `payer`, pays the output to
    /// `to`, and resynchronizes both reserves from post-transfer ledger
    /// balances.
    ///
    /// # Errors
    ///
    /// See [`swap_output`]; additionally
    /// [`DexError::InsufficientBalance`] if `payer` cannot cover the
    /// input.
    pub fn swap(
        &mut self,
        ledger: &dyn TokenLedger,
        payer: AccountId,
        to: AccountId,
        amount_in: Amount,
        input_is_x: bool,
        now: Timestamp,
    ) -> crate::error::Result<Amount> {
        self.enter()?;
        let result = self.swap_locked(ledger, payer, to, amount_in, input_is_x, now);
        self.entered = false;
        result
    }

    fn swap_locked(
        &mut self,
        ledger: &dyn TokenLedger,
        payer: AccountId,
        to: AccountId,
        amount_in: Amount,
        input_is_x: bool,
        now: Timestamp,
    ) -> crate::error::Result<Amount> {
        let (token_in, token_out, reserve_in, reserve_out) = if input_is_x {
            (self.pair.token_x(), self.pair.token_y(), self.reserve_x, self.reserve_y)
        } else {
            (self.pair.token_y(), self.pair.token_x(), self.reserve_y, self.reserve_x)
        };

        let amount_out = swap_output(amount_in, reserve_in, reserve_out, self.fee)?;
        let new_reserve_in = reserve_in.safe_add(&amount_in)?;
        let new_reserve_out = reserve_out.safe_sub(&amount_out)?;

        let prev = self.snapshot(&[]);

        if input_is_x {
            self.reserve_x = new_reserve_in;
            self.reserve_y = new_reserve_out;
        } else {
            self.reserve_y = new_reserve_in;
            self.reserve_x = new_reserve_out;
        }
        self.last_update = now;

        let pool_account = self.id.account();
        if let Err(e) = ledger.transfer(token_in, payer, pool_account, amount_in) {
            self.restore(prev);
            return Err(e);
        }
        if let Err(e) = ledger.transfer(token_out, pool_account, to, amount_out) {
            let _ = ledger.transfer(token_in, pool_account, payer, amount_in);
            self.restore(prev);
            return Err(e);
        }

        self.sync_reserves(ledger);
        debug!(
            pool = %self.id,
            amount_in = %amount_in,
            amount_out = %amount_out,
            "swap settled"
        );
        Ok(amount_out)
    }

    // -- internals -----------------------------------------------------------

    fn enter(&mut self) -> crate::error::Result<()> {
        if self.entered {
            return Err(DexError::Reentrancy);
        }
        self.entered = true;
        Ok(())
    }

    fn snapshot(&self, accounts: &[AccountId]) -> StateSnapshot {
        StateSnapshot {
            reserve_x: self.reserve_x,
            reserve_y: self.reserve_y,
            total_shares: self.total_shares,
            last_update: self.last_update,
            minimum_liquidity_locked: self.minimum_liquidity_locked,
            entries: accounts
                .iter()
                .map(|a| (*a, self.share_balances.get(a).copied()))
                .collect(),
        }
    }

    fn restore(&mut self, snapshot: StateSnapshot) {
        self.reserve_x = snapshot.reserve_x;
        self.reserve_y = snapshot.reserve_y;
        self.total_shares = snapshot.total_shares;
        self.last_update = snapshot.last_update;
        self.minimum_liquidity_locked = snapshot.minimum_liquidity_locked;
        for (account, prev) in snapshot.entries {
            match prev {
                Some(value) => {
                    self.share_balances.insert(account, value);
                }
                None => {
                    self.share_balances.remove(&account);
                }
            }
        }
    }

    /// Reserves are a cached mirror of ledger truth; re-read them after
    /// every mutating operation so any transfer-side discrepancy is
    /// absorbed instead of compounding.
    fn sync_reserves(&mut self, ledger: &dyn TokenLedger) {
        let account = self.id.account();
        self.reserve_x = ledger.balance_of(self.pair.token_x(), account);
        self.reserve_y = ledger.balance_of(self.pair.token_y(), account);
    }
}
