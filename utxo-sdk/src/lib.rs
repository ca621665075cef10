#![deny(missing_docs)]

//! UTXO SDK - Complete SDK.
//!
//! Re-exports the primitives, script and transaction crates for convenient
//! single-crate usage.

pub use utxo_primitives as primitives;
pub use utxo_script as script;
pub use utxo_transaction as transaction;
