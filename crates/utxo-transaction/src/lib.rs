//! UTXO SDK - Transaction assembly, signing and serialization.
//!
//! Provides the `Transaction` type with its inputs and outputs, legacy
//! wire-format serialization with sign-on-serialize for key-backed inputs,
//! and decoding of signed transactions.

pub mod transaction;
pub mod input;
pub mod output;
pub mod serialized;

mod error;
pub use error::TransactionError;
pub use transaction::{Transaction, SIGHASH_ALL};
pub use input::{SigningMethod, TxInput, DEFAULT_SEQUENCE_NUMBER};
pub use output::TxOutput;
pub use serialized::SerializedTransaction;

#[cfg(test)]
mod tests;
