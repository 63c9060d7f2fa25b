//! Process-local token ledger and native vault.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use crate::domain::{AccountId, Amount, TokenId};
use crate::error::DexError;
use crate::traits::{NativeVault, TokenLedger};

/// An in-memory fungible-token ledger with a built-in wrapped-asset
/// vault.
///
/// Balances live behind a [`RwLock`], so one ledger can serve pools
/// operating concurrently.  Every mutation is atomic: a failed transfer
/// leaves no balance changed.
///
/// # Examples
///
/// ```
/// use prism_dex::domain::{AccountId, Amount, TokenId};
/// use prism_dex::ledger::InMemoryLedger;
/// use prism_dex::traits::{NativeVault, TokenLedger};
///
/// let wrapped = TokenId::from_bytes([9u8; 32]);
/// let ledger = InMemoryLedger::new(wrapped);
/// let alice = AccountId::from_bytes([1u8; 32]);
///
/// ledger.credit_native(alice, Amount::new(100)).expect("credit");
/// ledger.wrap(alice, Amount::new(40)).expect("wrap");
/// assert_eq!(ledger.balance_of(wrapped, alice), Amount::new(40));
/// assert_eq!(ledger.native_balance_of(alice), Amount::new(60));
/// ```
#[derive(Debug)]
pub struct InMemoryLedger {
    wrapped: TokenId,
    balances: RwLock<BTreeMap<(TokenId, AccountId), u128>>,
    native: RwLock<BTreeMap<AccountId, u128>>,
}

impl InMemoryLedger {
    /// Creates an empty ledger whose wrapped-native token is `wrapped`.
    #[must_use]
    pub fn new(wrapped: TokenId) -> Self {
        Self {
            wrapped,
            balances: RwLock::new(BTreeMap::new()),
            native: RwLock::new(BTreeMap::new()),
        }
    }

    /// Credits `owner` with `amount` of `token` out of thin air.
    ///
    /// This is the issuance seam real deployments wire to actual token
    /// mints; tests use it as a faucet.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::ArithmeticOverflow`] if the balance would
    /// overflow.
    pub fn credit(&self, token: TokenId, owner: AccountId, amount: Amount) -> crate::error::Result<()> {
        let mut balances = self.balances.write();
        let entry = balances.entry((token, owner)).or_insert(0);
        *entry = entry
            .checked_add(amount.get())
            .ok_or(DexError::ArithmeticOverflow("ledger credit"))?;
        Ok(())
    }

    /// Credits `owner` with `amount` of native currency.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::ArithmeticOverflow`] if the balance would
    /// overflow.
    pub fn credit_native(&self, owner: AccountId, amount: Amount) -> crate::error::Result<()> {
        let mut native = self.native.write();
        let entry = native.entry(owner).or_insert(0);
        *entry = entry
            .checked_add(amount.get())
            .ok_or(DexError::ArithmeticOverflow("native credit"))?;
        Ok(())
    }
}

impl TokenLedger for InMemoryLedger {
    fn balance_of(&self, token: TokenId, owner: AccountId) -> Amount {
        let balances = self.balances.read();
        Amount::new(balances.get(&(token, owner)).copied().unwrap_or(0))
    }

    fn transfer(
        &self,
        token: TokenId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> crate::error::Result<()> {
        if amount.is_zero() || from == to {
            return Ok(());
        }
        let mut balances = self.balances.write();
        let source = balances.get(&(token, from)).copied().unwrap_or(0);
        if source < amount.get() {
            return Err(DexError::InsufficientBalance);
        }
        let dest = balances.get(&(token, to)).copied().unwrap_or(0);
        let dest = dest
            .checked_add(amount.get())
            .ok_or(DexError::ArithmeticOverflow("transfer destination"))?;
        balances.insert((token, from), source - amount.get());
        balances.insert((token, to), dest);
        Ok(())
    }
}

impl NativeVault for InMemoryLedger {
    fn wrapped_token(&self) -> TokenId {
        self.wrapped
    }

    fn native_balance_of(&self, owner: AccountId) -> Amount {
        let native = self.native.read();
        Amount::new(native.get(&owner).copied().unwrap_or(0))
    }

    fn wrap(&self, owner: AccountId, amount: Amount) -> crate::error::Result<()> {
        if amount.is_zero() {
            return Ok(());
        }
        // Fixed lock order (native, then balances) shared with `unwrap`.
        let mut native = self.native.write();
        let mut balances = self.balances.write();
        let held = native.get(&owner).copied().unwrap_or(0);
        if held < amount.get() {
            return Err(DexError::InsufficientBalance);
        }
        let wrapped = balances.get(&(self.wrapped, owner)).copied().unwrap_or(0);
        let wrapped = wrapped
            .checked_add(amount.get())
            .ok_or(DexError::ArithmeticOverflow("wrap destination"))?;
        native.insert(owner, held - amount.get());
        balances.insert((self.wrapped, owner), wrapped);
        Ok(())
    }

    fn unwrap(&self, owner: AccountId, amount: Amount) -> crate::error::Result<()> {
        if amount.is_zero() {
            return Ok(());
        }
        let mut native = self.native.write();
        let mut balances = self.balances.write();
        let wrapped = balances.get(&(self.wrapped, owner)).copied().unwrap_or(0);
        if wrapped < amount.get() {
            return Err(DexError::InsufficientBalance);
        }
        let held = native.get(&owner).copied().unwrap_or(0);
        let held = held
            .checked_add(amount.get())
            .ok_or(DexError::ArithmeticOverflow("unwrap destination"))?;
        balances.insert((self.wrapped, owner), wrapped - amount.get());
        native.insert(owner, held);
        Ok(())
    }
}
