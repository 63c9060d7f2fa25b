//! Integer helpers shared by the pool math.

use crate::domain::Rounding;
use crate::error::DexError;

/// Computes `value * numerator / denominator` with an explicit rounding
/// direction.
///
/// This is the single shape every share and reserve proportion takes
/// (`dx·T/rx`, `s·rx/T`, …), so it lives here rather than being restated
/// at each call site.
///
/// # Errors
///
/// - [`DexError::ArithmeticOverflow`] if the intermediate product does
///   not fit in `u128`.
/// - [`DexError::DivisionByZero`] if `denominator` is zero.
pub fn mul_div(
    value: u128,
    numerator: u128,
    denominator: u128,
    rounding: Rounding,
) -> crate::error::Result<u128> {
    if denominator == 0 {
        return Err(DexError::DivisionByZero);
    }
    let product = value
        .checked_mul(numerator)
        .ok_or(DexError::ArithmeticOverflow("mul_div product"))?;
    let q = product / denominator;
    let r = product % denominator;
    match rounding {
        Rounding::Down => Ok(q),
        Rounding::Up if r != 0 => Ok(q + 1),
        Rounding::Up => Ok(q),
    }
}

/// Integer square root: the largest `r` with `r * r <= n`.
///
/// Newton's method, which converges in a handful of iterations for any
/// `u128` input.
#[must_use]
pub fn isqrt(n: u128) -> u128 {
    if n == 0 {
        return 0;
    }
    let mut x = n;
    let mut y = x.div_ceil(2);
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}
