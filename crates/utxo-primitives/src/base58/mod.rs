//! Base58 encoding and the checksummed Base58Check codec.
//!
//! Address construction never reaches for a process-wide codec instance.
//! Callers hold a value implementing [`CheckEncoding`] (normally
//! [`Base58Check`]) and pass it to whatever needs to encode or decode
//! version-prefixed payloads.

use crate::hash::sha256d;
use crate::PrimitivesError;

/// Number of checksum bytes appended by Base58Check.
const CHECKSUM_LEN: usize = 4;

/// Encode a byte slice with Bitcoin's Base58 alphabet.
///
/// Leading zero bytes are encoded as leading '1' characters.
pub fn encode(data: &[u8]) -> String {
    bs58::encode(data)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_string()
}

/// Decode a Base58 string into bytes.
///
/// # Returns
/// `Ok(Vec<u8>)` on success, or `InvalidBase58` for characters outside the alphabet.
pub fn decode(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    bs58::decode(s)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_vec()
        .map_err(|e| PrimitivesError::InvalidBase58(e.to_string()))
}

/// A checksummed text codec for version-prefixed payloads.
///
/// `check_decode(check_encode(p)) == p` must hold for every payload `p`.
pub trait CheckEncoding {
    /// Append a checksum to `payload` and encode the result as text.
    fn check_encode(&self, payload: &[u8]) -> String;

    /// Decode `s`, verify and strip its checksum, and return the payload.
    fn check_decode(&self, s: &str) -> Result<Vec<u8>, PrimitivesError>;
}

/// Base58Check: Base58 over `payload || sha256d(payload)[..4]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Base58Check;

impl Base58Check {
    /// Create a new codec handle.
    pub fn new() -> Self {
        Base58Check
    }
}

impl CheckEncoding for Base58Check {
    fn check_encode(&self, payload: &[u8]) -> String {
        let checksum = sha256d(payload);
        let mut data = Vec::with_capacity(payload.len() + CHECKSUM_LEN);
        data.extend_from_slice(payload);
        data.extend_from_slice(&checksum[..CHECKSUM_LEN]);
        encode(&data)
    }

    fn check_decode(&self, s: &str) -> Result<Vec<u8>, PrimitivesError> {
        let decoded = decode(s)?;
        if decoded.len() < CHECKSUM_LEN {
            return Err(PrimitivesError::InvalidBase58(
                "data too short for checksum".to_string(),
            ));
        }
        let (payload, checksum) = decoded.split_at(decoded.len() - CHECKSUM_LEN);
        if checksum != &sha256d(payload)[..CHECKSUM_LEN] {
            return Err(PrimitivesError::ChecksumMismatch);
        }
        Ok(payload.to_vec())
    }
}
