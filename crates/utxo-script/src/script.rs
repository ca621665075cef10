//! Script type - an immutable sequence of opcodes and data pushes.
//!
//! Scripts lock outputs (scriptPubKey) and unlock inputs (scriptSig). The
//! bytes are fixed at construction; `hash160` and `hash256` are computed on
//! first use and cached.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use utxo_primitives::hash::{hash160, sha256d};

use crate::chunk::{decode_script, ScriptChunk};
use crate::opcodes::*;
use crate::ScriptError;

/// Length of a P2PKH scriptPubKey.
const P2PKH_LEN: usize = 25;
/// Length of a P2SH scriptPubKey.
const P2SH_LEN: usize = 23;

/// An immutable script program.
#[derive(Clone, Default)]
pub struct Script {
    bytes: Vec<u8>,
    hash160: OnceLock<[u8; 20]>,
    hash256: OnceLock<[u8; 32]>,
}

impl Script {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Create an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a script from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Script {
            bytes: bytes.to_vec(),
            ..Self::default()
        }
    }

    /// Create a script from a hex-encoded string.
    ///
    /// # Arguments
    /// * `hex_str` - A hex string (e.g. "76a914...88ac").
    pub fn from_hex(hex_str: &str) -> Result<Self, ScriptError> {
        let bytes = hex::decode(hex_str).map_err(|e| ScriptError::InvalidHex(e.to_string()))?;
        Ok(Script {
            bytes,
            ..Self::default()
        })
    }

    /// Standard P2PKH locking script:
    /// `OP_DUP OP_HASH160 <20 bytes> OP_EQUALVERIFY OP_CHECKSIG`.
    pub fn p2pkh(hash: &[u8; 20]) -> Self {
        let mut bytes = Vec::with_capacity(P2PKH_LEN);
        bytes.push(OP_DUP);
        bytes.push(OP_HASH160);
        bytes.push(OP_DATA_20);
        bytes.extend_from_slice(hash);
        bytes.push(OP_EQUALVERIFY);
        bytes.push(OP_CHECKSIG);
        Script::from_bytes(&bytes)
    }

    /// Standard P2SH locking script: `OP_HASH160 <20 bytes> OP_EQUAL`.
    pub fn p2sh(hash: &[u8; 20]) -> Self {
        let mut bytes = Vec::with_capacity(P2SH_LEN);
        bytes.push(OP_HASH160);
        bytes.push(OP_DATA_20);
        bytes.extend_from_slice(hash);
        bytes.push(OP_EQUAL);
        Script::from_bytes(&bytes)
    }

    // -----------------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------------

    /// Lowercase hex of the script bytes.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    /// The script bytes.
    pub fn to_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Byte length of the script.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Parse the script into chunks.
    pub fn chunks(&self) -> Result<Vec<ScriptChunk>, ScriptError> {
        decode_script(&self.bytes)
    }

    /// Human-readable decompilation, e.g. `OP_2 02ab.. 03cd.. OP_2 OP_CHECKMULTISIG`.
    ///
    /// Returns an empty string for empty or malformed scripts.
    pub fn to_asm(&self) -> String {
        match self.chunks() {
            Ok(chunks) => chunks
                .iter()
                .map(ScriptChunk::to_asm_string)
                .collect::<Vec<_>>()
                .join(" "),
            Err(_) => String::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Hashes
    // -----------------------------------------------------------------------

    /// RIPEMD-160(SHA-256(script)). Cached after the first call.
    pub fn hash160(&self) -> [u8; 20] {
        *self.hash160.get_or_init(|| hash160(&self.bytes))
    }

    /// SHA-256(SHA-256(script)). Cached after the first call.
    pub fn hash256(&self) -> [u8; 32] {
        *self.hash256.get_or_init(|| sha256d(&self.bytes))
    }

    // -----------------------------------------------------------------------
    // Pattern matching
    // -----------------------------------------------------------------------

    /// Match `OP_DUP OP_HASH160 PUSH(20) <hash> OP_EQUALVERIFY OP_CHECKSIG`.
    ///
    /// # Returns
    /// The 20-byte hash on a match, `None` otherwise.
    pub fn match_p2pkh(&self) -> Option<[u8; 20]> {
        match self.bytes.as_slice() {
            [OP_DUP, OP_HASH160, OP_DATA_20, hash @ .., OP_EQUALVERIFY, OP_CHECKSIG]
                if self.bytes.len() == P2PKH_LEN =>
            {
                hash.try_into().ok()
            }
            _ => None,
        }
    }

    /// Match `OP_HASH160 PUSH(20) <hash> OP_EQUAL`.
    ///
    /// # Returns
    /// The 20-byte hash on a match, `None` otherwise.
    pub fn match_p2sh(&self) -> Option<[u8; 20]> {
        match self.bytes.as_slice() {
            [OP_HASH160, OP_DATA_20, hash @ .., OP_EQUAL] if self.bytes.len() == P2SH_LEN => {
                hash.try_into().ok()
            }
            _ => None,
        }
    }

    pub fn is_p2pkh(&self) -> bool {
        self.match_p2pkh().is_some()
    }

    pub fn is_p2sh(&self) -> bool {
        self.match_p2sh().is_some()
    }
}

impl PartialEq for Script {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for Script {}

impl Hash for Script {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Script({})", self.to_hex())
    }
}

impl serde::Serialize for Script {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Script {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Script::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
