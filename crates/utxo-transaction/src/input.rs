//! Transaction input spending a previous output.
//!
//! An input records the output it spends, its sequence number, how its
//! unlocking script is obtained, and the locking script of the spent output.
//! The locking script stands in for the unlocking script when the unsigned
//! signing preimage is built.

use utxo_primitives::ec::PrivateKey;
use utxo_primitives::util::{ByteReader, ByteWriter};
use utxo_script::Script;

use crate::TransactionError;

/// Default sequence number indicating a finalized input (no relative lock-time).
pub const DEFAULT_SEQUENCE_NUMBER: u32 = 0xFFFF_FFFF;

/// How an input's unlocking script is produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SigningMethod {
    /// A prebuilt unlocking script, used verbatim.
    Script(Script),
    /// A key that signs the transaction when it is serialized with
    /// signatures. The resulting script replaces this variant.
    PrivateKey(PrivateKey),
}

/// A single input in a transaction.
///
/// # Wire format
///
/// | Field              | Size             |
/// |--------------------|------------------|
/// | prev_tx_hash       | 32 bytes (LE)    |
/// | index              | 4 bytes (LE)     |
/// | script length      | VarInt           |
/// | script             | variable         |
/// | sequence           | 4 bytes (LE)     |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxInput {
    /// Hash of the transaction being spent, in display (big-endian) order.
    /// Reversed on the wire.
    pub prev_tx_hash: [u8; 32],

    /// Index of the output within the previous transaction.
    pub index: u32,

    /// Sequence number. Defaults to `0xFFFFFFFF` (finalized).
    pub sequence: u32,

    /// Source of the unlocking script. `None` until one is attached.
    pub signing_method: Option<SigningMethod>,

    /// Locking script of the output being spent.
    pub script_pub_key: Script,
}

impl TxInput {
    /// Create an input from a display-order hex hash.
    ///
    /// # Arguments
    /// * `prev_tx_hash_hex` - 64 hex characters, as transaction ids are usually shown.
    /// * `index` - Output index being spent.
    /// * `script_pub_key` - Locking script of that output.
    ///
    /// # Returns
    /// `InvalidTransaction` if the hash is not 32 bytes of hex.
    pub fn new(prev_tx_hash_hex: &str, index: u32, script_pub_key: Script) -> Result<Self, TransactionError> {
        let bytes = hex::decode(prev_tx_hash_hex).map_err(|e| {
            TransactionError::InvalidTransaction(format!("previous tx hash: {}", e))
        })?;
        let prev_tx_hash: [u8; 32] = bytes.as_slice().try_into().map_err(|_| {
            TransactionError::InvalidTransaction(format!(
                "previous tx hash must be 32 bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self::from_hash(prev_tx_hash, index, script_pub_key))
    }

    /// Create an input from a display-order hash.
    pub fn from_hash(prev_tx_hash: [u8; 32], index: u32, script_pub_key: Script) -> Self {
        TxInput {
            prev_tx_hash,
            index,
            sequence: DEFAULT_SEQUENCE_NUMBER,
            signing_method: None,
            script_pub_key,
        }
    }

    /// Attach a prebuilt unlocking script.
    pub fn with_script(mut self, script: Script) -> Self {
        self.signing_method = Some(SigningMethod::Script(script));
        self
    }

    /// Attach a key to sign with at serialization time.
    pub fn with_private_key(mut self, key: PrivateKey) -> Self {
        self.signing_method = Some(SigningMethod::PrivateKey(key));
        self
    }

    pub fn with_sequence(mut self, sequence: u32) -> Self {
        self.sequence = sequence;
        self
    }

    /// The previous transaction hash as display-order hex.
    pub fn prev_tx_hash_hex(&self) -> String {
        hex::encode(self.prev_tx_hash)
    }

    /// The unlocking script, if one is fixed.
    pub fn unlocking_script(&self) -> Option<&Script> {
        match &self.signing_method {
            Some(SigningMethod::Script(script)) => Some(script),
            _ => None,
        }
    }

    /// Serialize this input with `script` in the script slot.
    pub(crate) fn write_to(&self, writer: &mut ByteWriter, script: &Script) {
        let mut wire_hash = self.prev_tx_hash;
        wire_hash.reverse();
        writer.write_bytes(&wire_hash);
        writer.write_u32_le(self.index);
        writer.write_var_bytes(script.to_bytes());
        writer.write_u32_le(self.sequence);
    }

    /// Deserialize an input from a signed transaction.
    ///
    /// The script read becomes a fixed [`SigningMethod::Script`]; the
    /// spent output's locking script is not on the wire and is left empty.
    pub(crate) fn read_from(reader: &mut ByteReader) -> Result<Self, TransactionError> {
        let mut prev_tx_hash: [u8; 32] = reader.read_array().map_err(|e| {
            TransactionError::Serialization(format!("reading previous tx hash: {}", e))
        })?;
        prev_tx_hash.reverse();

        let index = reader.read_u32_le().map_err(|e| {
            TransactionError::Serialization(format!("reading output index: {}", e))
        })?;

        let script_bytes = reader.read_var_bytes().map_err(|e| {
            TransactionError::Serialization(format!("reading unlocking script: {}", e))
        })?;

        let sequence = reader.read_u32_le().map_err(|e| {
            TransactionError::Serialization(format!("reading sequence number: {}", e))
        })?;

        Ok(TxInput {
            prev_tx_hash,
            index,
            sequence,
            signing_method: Some(SigningMethod::Script(Script::from_bytes(script_bytes))),
            script_pub_key: Script::new(),
        })
    }
}
