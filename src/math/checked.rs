//! Checked arithmetic trait for domain wrapper types.
//!
//! Lifts the `Option`-returning operations on [`Amount`] and [`Shares`]
//! into [`Result`](crate::error::Result)s with specific error variants,
//! so call sites can propagate with `?` instead of threading `ok_or`
//! everywhere.

use crate::domain::{Amount, Rounding, Shares};
use crate::error::DexError;

/// Fallible arithmetic for domain wrapper types.
///
/// # Contract
///
/// - **No panics** — every error condition produces `Err`.
/// - **No saturation** — saturation hides corruption; errors propagate.
/// - Implementations delegate to the inner type's checked operations.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::ArithmeticOverflow`] on overflow.
    fn safe_add(&self, other: &Self) -> crate::error::Result<Self>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::ArithmeticOverflow`] if the result would be
    /// negative.
    fn safe_sub(&self, other: &Self) -> crate::error::Result<Self>;

    /// Checked multiplication.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::ArithmeticOverflow`] on overflow.
    fn safe_mul(&self, other: &Self) -> crate::error::Result<Self>;

    /// Checked division with an explicit [`Rounding`] direction.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::DivisionByZero`] if `other` is zero.
    fn safe_div(&self, other: &Self, rounding: Rounding) -> crate::error::Result<Self>;
}

// ---------------------------------------------------------------------------
// Amount
// ---------------------------------------------------------------------------

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> crate::error::Result<Self> {
        self.checked_add(other)
            .ok_or(DexError::ArithmeticOverflow("amount addition"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> crate::error::Result<Self> {
        self.checked_sub(other)
            .ok_or(DexError::ArithmeticOverflow("amount subtraction"))
    }

    #[inline]
    fn safe_mul(&self, other: &Self) -> crate::error::Result<Self> {
        self.checked_mul(other)
            .ok_or(DexError::ArithmeticOverflow("amount multiplication"))
    }

    #[inline]
    fn safe_div(&self, other: &Self, rounding: Rounding) -> crate::error::Result<Self> {
        self.checked_div(other, rounding)
            .ok_or(DexError::DivisionByZero)
    }
}

// ---------------------------------------------------------------------------
// Shares
// ---------------------------------------------------------------------------

impl CheckedArithmetic for Shares {
    #[inline]
    fn safe_add(&self, other: &Self) -> crate::error::Result<Self> {
        self.checked_add(other)
            .ok_or(DexError::ArithmeticOverflow("share addition"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> crate::error::Result<Self> {
        self.checked_sub(other)
            .ok_or(DexError::ArithmeticOverflow("share subtraction"))
    }

    #[inline]
    fn safe_mul(&self, other: &Self) -> crate::error::Result<Self> {
        self.get()
            .checked_mul(other.get())
            .map(Shares::new)
            .ok_or(DexError::ArithmeticOverflow("share multiplication"))
    }

    fn safe_div(&self, other: &Self, rounding: Rounding) -> crate::error::Result<Self> {
        if other.is_zero() {
            return Err(DexError::DivisionByZero);
        }
        let q = self.get() / other.get();
        let r = self.get() % other.get();
        let value = match rounding {
            Rounding::Down => q,
            Rounding::Up if r != 0 => q + 1,
            Rounding::Up => q,
        };
        Ok(Shares::new(value))
    }
}
