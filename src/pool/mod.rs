//! The constant-product pool engine.
//!
//! One [`Pool`] owns the reserves and the liquidity-share ledger for
//! exactly one canonical token pair.  Its three mutating operations
//! (`mint`, `burn`, `swap`) are each atomic: on any error, no reserve,
//! share, or ledger change is left behind.

mod constant_product;

pub use constant_product::{swap_output, Pool, MINIMUM_LIQUIDITY};

#[cfg(test)]
mod proptest_properties;
