//! Generic construction trait for config-driven components.
//!
//! [`FromConfig`] gives every configurable component one validated
//! construction seam.  Implementations must validate the configuration
//! fully — a successfully constructed value is guaranteed to be in a
//! valid initial state.  There is no blanket implementation: every
//! component/config pairing is explicit.

use crate::error::DexError;

/// Builds a component from a validated configuration.
///
/// # Type Parameters
///
/// - `C` — the configuration type describing the component's immutable
///   parameters.
///
/// # Errors
///
/// Implementations return the config's own validation error (typically
/// [`DexError::ArithmeticOverflow`] or a more specific variant) when any
/// parameter is out of range or inconsistent.
pub trait FromConfig<C> {
    /// Creates a new instance from the given configuration.
    ///
    /// The configuration is taken by reference because callers may
    /// reuse it (several registries from one config in tests, say).
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    fn from_config(config: &C) -> Result<Self, DexError>
    where
        Self: Sized;
}
