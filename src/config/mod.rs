//! Declarative configuration for the exchange core.
//!
//! [`DexConfig`] is the single blueprint a deployment is built from:
//! the swap fee every pool charges and the routing base asset.  It is
//! serde-serializable so deployments can load it from a file, and it
//! validates itself before any component is constructed from it.

mod dex;

pub use dex::DexConfig;
