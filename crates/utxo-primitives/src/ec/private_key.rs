//! secp256k1 private key.
//!
//! Wraps a k256 signing key and adds WIF import/export and RFC6979
//! deterministic signing of pre-computed digests.

use k256::ecdsa::signature::hazmat::PrehashSigner;
use k256::ecdsa::SigningKey;

use crate::base58::{Base58Check, CheckEncoding};
use crate::ec::public_key::PublicKey;
use crate::ec::signature::Signature;
use crate::PrimitivesError;

/// Length of a serialized private key in bytes.
const PRIVATE_KEY_BYTES_LEN: usize = 32;

/// Compression flag byte appended to WIF for compressed public keys.
const COMPRESS_MAGIC: u8 = 0x01;

/// A secp256k1 private key.
#[derive(Clone, Debug)]
pub struct PrivateKey {
    inner: SigningKey,
}

impl PrivateKey {
    /// Create a private key from a raw 32-byte big-endian scalar.
    ///
    /// # Returns
    /// An error if the slice is not 32 bytes, or the scalar is zero or not
    /// below the curve order.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != PRIVATE_KEY_BYTES_LEN {
            return Err(PrimitivesError::InvalidPrivateKey(format!(
                "expected {} bytes, got {}",
                PRIVATE_KEY_BYTES_LEN,
                bytes.len()
            )));
        }
        let inner = SigningKey::from_bytes(bytes.into())
            .map_err(|e| PrimitivesError::InvalidPrivateKey(e.to_string()))?;
        Ok(PrivateKey { inner })
    }

    /// Create a private key from a 64-character hex string.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        if hex_str.is_empty() {
            return Err(PrimitivesError::InvalidPrivateKey(
                "private key hex is empty".to_string(),
            ));
        }
        Self::from_bytes(&hex::decode(hex_str)?)
    }

    /// Create a private key from a WIF (Wallet Import Format) string.
    ///
    /// Accepts both the compressed (34-byte payload) and uncompressed
    /// (33-byte payload) forms. The network prefix byte is not checked.
    pub fn from_wif(wif: &str) -> Result<Self, PrimitivesError> {
        let payload = Base58Check::new()
            .check_decode(wif)
            .map_err(|e| match e {
                PrimitivesError::ChecksumMismatch => e,
                other => PrimitivesError::InvalidWif(other.to_string()),
            })?;

        match payload.len() {
            34 if payload[33] == COMPRESS_MAGIC => {}
            34 => {
                return Err(PrimitivesError::InvalidWif(
                    "malformed private key: invalid compression flag".to_string(),
                ))
            }
            33 => {}
            n => {
                return Err(PrimitivesError::InvalidWif(format!(
                    "malformed private key: invalid length {}",
                    n
                )))
            }
        }

        Self::from_bytes(&payload[1..1 + PRIVATE_KEY_BYTES_LEN])
    }

    /// Encode the key as a compressed-form WIF string with the given network prefix.
    ///
    /// # Arguments
    /// * `prefix` - The network WIF prefix (0x80 mainnet, 0xef testnet).
    pub fn to_wif(&self, prefix: u8) -> String {
        let mut payload = Vec::with_capacity(2 + PRIVATE_KEY_BYTES_LEN);
        payload.push(prefix);
        payload.extend_from_slice(&self.to_bytes());
        payload.push(COMPRESS_MAGIC);
        Base58Check::new().check_encode(&payload)
    }

    /// Serialize the private key as a 32-byte big-endian array.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.inner.to_bytes().into()
    }

    /// Serialize the private key as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Derive the corresponding public key.
    pub fn pub_key(&self) -> PublicKey {
        PublicKey::from_verifying_key(self.inner.verifying_key().clone())
    }

    /// Sign a 32-byte digest with RFC6979 deterministic nonces.
    ///
    /// The returned signature is low-S normalized.
    pub fn sign(&self, digest: &[u8; 32]) -> Result<Signature, PrimitivesError> {
        let sig: k256::ecdsa::Signature = self.inner.sign_prehash(digest)?;
        Ok(Signature::from_k256(sig))
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for PrivateKey {}
