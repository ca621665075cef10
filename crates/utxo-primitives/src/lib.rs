//! UTXO SDK - Cryptographic primitives and byte codecs.
//!
//! This crate is the collaborator boundary the script and transaction crates
//! call into:
//! - Hash functions (SHA-256, SHA-256d, RIPEMD-160, Hash160)
//! - Base58 and the `CheckEncoding` codec handle (Base58Check)
//! - secp256k1 private keys, public keys and ECDSA signatures
//! - Little-endian byte writer/reader and VarInt encoding

pub mod hash;
pub mod base58;
pub mod ec;
pub mod util;

mod error;
pub use error::PrimitivesError;
pub use base58::{Base58Check, CheckEncoding};
