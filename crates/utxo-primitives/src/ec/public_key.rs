//! secp256k1 public key.
//!
//! Only the compressed SEC1 form is used on the wire. Its Hash160 is
//! computed on first use and cached for the lifetime of the key.

use std::fmt;
use std::sync::OnceLock;

use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa::VerifyingKey;

use crate::ec::signature::Signature;
use crate::hash::hash160;
use crate::PrimitivesError;

/// Length of a compressed public key in bytes (prefix + 32 byte x-coordinate).
pub const COMPRESSED_LEN: usize = 33;

/// A secp256k1 public key.
#[derive(Clone, Debug)]
pub struct PublicKey {
    inner: VerifyingKey,
    /// Write-once Hash160 of the compressed encoding.
    hash160: OnceLock<[u8; 20]>,
}

impl PublicKey {
    pub(crate) fn from_verifying_key(inner: VerifyingKey) -> Self {
        PublicKey {
            inner,
            hash160: OnceLock::new(),
        }
    }

    /// Parse a public key from SEC1 bytes (compressed or uncompressed).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.is_empty() {
            return Err(PrimitivesError::InvalidPublicKey(
                "pubkey bytes are empty".to_string(),
            ));
        }
        let vk = VerifyingKey::from_sec1_bytes(bytes)
            .map_err(|e| PrimitivesError::InvalidPublicKey(e.to_string()))?;
        Ok(Self::from_verifying_key(vk))
    }

    /// Parse a public key from a hex-encoded SEC1 string.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        Self::from_bytes(&hex::decode(hex_str)?)
    }

    /// Serialize in compressed SEC1 format (33 bytes, 0x02/0x03 prefix).
    pub fn to_compressed(&self) -> [u8; COMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(true);
        let mut out = [0u8; COMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Hex string of the compressed encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_compressed())
    }

    /// Hash160 of the compressed public key.
    ///
    /// Computed on first access; later calls return the cached digest.
    pub fn hash160(&self) -> [u8; 20] {
        *self.hash160.get_or_init(|| hash160(&self.to_compressed()))
    }

    /// Verify a signature over a 32-byte digest.
    pub fn verify(&self, digest: &[u8; 32], sig: &Signature) -> bool {
        self.inner.verify_prehash(digest, sig.as_k256()).is_ok()
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_compressed() == other.to_compressed()
    }
}

impl Eq for PublicKey {}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
