//! Ledger implementations.
//!
//! The core treats token balances as an external collaborator behind the
//! [`TokenLedger`](crate::traits::TokenLedger) and
//! [`NativeVault`](crate::traits::NativeVault) traits.  This module ships
//! [`InMemoryLedger`], a process-local implementation of both — the
//! explicit owned store that lets tests and demos run any number of
//! independent exchanges side by side.

mod memory;

pub use memory::InMemoryLedger;
