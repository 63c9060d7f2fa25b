//! Core trait abstractions at the seams of the exchange core.
//!
//! [`TokenLedger`] and [`NativeVault`] are the external collaborators
//! every balance movement goes through, [`Clock`] supplies the point in
//! time deadline checks compare against, and [`FromConfig`] is the
//! uniform construction seam for config-driven components.

mod clock;
mod from_config;
mod ledger;

pub use clock::{Clock, ManualClock, SystemClock};
pub use from_config::FromConfig;
pub use ledger::{NativeVault, TokenLedger};
