//! External ledger collaborators.
//!
//! The core never stores token balances itself; every balance movement
//! goes through a [`TokenLedger`], and the native currency enters the
//! fungible world only through a [`NativeVault`].  Both arrive at the
//! core already past authentication and authorization — a transfer
//! request here is assumed approved by the time it is made.

use crate::domain::{AccountId, Amount, TokenId};

/// Standard fungible-token balance bookkeeping.
///
/// Implementations must make each call atomic: a `transfer` either fully
/// moves the amount or fails with no effect.  The core relies on that to
/// keep its own operations all-or-nothing.
///
/// # Errors
///
/// `transfer` fails with
/// [`DexError::InsufficientBalance`](crate::error::DexError::InsufficientBalance)
/// when `from` cannot cover `amount`.
pub trait TokenLedger {
    /// Returns `owner`'s balance of `token`.
    fn balance_of(&self, token: TokenId, owner: AccountId) -> Amount;

    /// Moves `amount` of `token` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Fails if `from`'s balance of `token` is below `amount`; no
    /// balance changes in that case.
    fn transfer(
        &self,
        token: TokenId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> crate::error::Result<()>;
}

/// Converts the native currency to and from its fungible wrapped form.
///
/// Only the router talks to the vault; pools and the registry never see
/// the native asset, only [`wrapped_token`](Self::wrapped_token).
pub trait NativeVault {
    /// The fungible token that represents the wrapped native currency.
    fn wrapped_token(&self) -> TokenId;

    /// Returns `owner`'s native-currency balance.
    fn native_balance_of(&self, owner: AccountId) -> Amount;

    /// Converts `amount` of `owner`'s native balance into wrapped
    /// tokens.
    ///
    /// # Errors
    ///
    /// Fails if `owner`'s native balance is below `amount`.
    fn wrap(&self, owner: AccountId, amount: Amount) -> crate::error::Result<()>;

    /// Converts `amount` of `owner`'s wrapped tokens back into native
    /// balance.
    ///
    /// # Errors
    ///
    /// Fails if `owner`'s wrapped balance is below `amount`.
    fn unwrap(&self, owner: AccountId, amount: Amount) -> crate::error::Result<()>;
}
