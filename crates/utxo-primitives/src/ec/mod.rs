//! Elliptic curve cryptography on secp256k1.
//!
//! Private keys, public keys and ECDSA signatures. The transaction signer
//! only needs three things from here: a compressed public key, its Hash160,
//! and a DER signature over a 32-byte digest.

pub mod private_key;
pub mod public_key;
pub mod signature;

pub use private_key::PrivateKey;
pub use public_key::PublicKey;
pub use signature::Signature;
