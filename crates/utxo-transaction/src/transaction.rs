//! Legacy transaction model with sign-on-serialize.
//!
//! A `Transaction` stays mutable while it is assembled. `serialize(false)`
//! produces the unsigned image in which every input carries the locking
//! script it spends, followed by a 4-byte sighash-type marker. That image is
//! the signing preimage: `serialize(true)` signs its double-SHA-256 with the
//! key of every key-backed input and caches the resulting unlocking script
//! back onto the input.
//!
//! All inputs share one preimage. This is the simplified legacy convention,
//! not the per-input sighash algorithm.

use tracing::{debug, trace};
use utxo_primitives::ec::PrivateKey;
use utxo_primitives::util::{ByteReader, ByteWriter, VarInt};
use utxo_script::{Script, ScriptBuilder};

use crate::input::{SigningMethod, TxInput};
use crate::output::TxOutput;
use crate::serialized::SerializedTransaction;
use crate::TransactionError;

/// Signature hash type appended to every signature and to the unsigned image.
pub const SIGHASH_ALL: u32 = 0x0000_0001;

/// A transaction consisting of a version, inputs, outputs and a lock time.
///
/// # Wire format
///
/// | Field        | Size                      |
/// |--------------|---------------------------|
/// | version      | 4 bytes (LE)              |
/// | input count  | VarInt                    |
/// | inputs       | variable (per input)      |
/// | output count | VarInt                    |
/// | outputs      | variable (per output)     |
/// | lock_time    | 4 bytes (LE)              |
/// | sighash type | 4 bytes (LE), unsigned form only |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    version: i32,
    inputs: Vec<TxInput>,
    outputs: Vec<TxOutput>,
    lock_time: u32,
}

impl Transaction {
    /// Create a new empty transaction with version 1 and lock time 0.
    pub fn new() -> Self {
        Transaction {
            version: 1,
            inputs: Vec::new(),
            outputs: Vec::new(),
            lock_time: 0,
        }
    }

    // -----------------------------------------------------------------
    // Assembly
    // -----------------------------------------------------------------

    pub fn version(&self) -> i32 {
        self.version
    }

    /// Set the version.
    ///
    /// # Returns
    /// `InvalidTransaction` for negative versions.
    pub fn set_version(&mut self, version: i32) -> Result<(), TransactionError> {
        if version < 0 {
            return Err(TransactionError::InvalidTransaction(format!(
                "version must not be negative, got {}",
                version
            )));
        }
        self.version = version;
        Ok(())
    }

    pub fn lock_time(&self) -> u32 {
        self.lock_time
    }

    pub fn set_lock_time(&mut self, lock_time: u32) {
        self.lock_time = lock_time;
    }

    /// Append an input.
    pub fn add_input(&mut self, input: TxInput) -> &mut Self {
        self.inputs.push(input);
        self
    }

    /// Append an output.
    pub fn add_output(&mut self, output: TxOutput) -> &mut Self {
        self.outputs.push(output);
        self
    }

    pub fn inputs(&self) -> &[TxInput] {
        &self.inputs
    }

    /// Mutable access to the inputs, e.g. to attach signing material late.
    pub fn inputs_mut(&mut self) -> &mut [TxInput] {
        &mut self.inputs
    }

    pub fn outputs(&self) -> &[TxOutput] {
        &self.outputs
    }

    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    /// Sum of all output values.
    pub fn total_output_value(&self) -> u64 {
        self.outputs.iter().map(|o| o.value).sum()
    }

    // -----------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------

    /// Serialize the transaction.
    ///
    /// With `include_signatures`, each input contributes its fixed unlocking
    /// script, or signs the unsigned image with its key and caches the
    /// resulting script as a fixed one. Without it, each input contributes
    /// the locking script it spends and the sighash marker is appended.
    ///
    /// # Returns
    /// The bytes and their digest, or the first error met in wire order:
    /// `EmptyInputs`, `MissingSigningMaterial`, `EmptyOutputs`.
    pub fn serialize(&mut self, include_signatures: bool) -> Result<SerializedTransaction, TransactionError> {
        if !include_signatures {
            return self.serialize_unsigned();
        }

        let mut writer = ByteWriter::with_capacity(256);
        writer.write_i32_le(self.version);

        if self.inputs.is_empty() {
            return Err(TransactionError::EmptyInputs);
        }
        writer.write_varint(VarInt::from(self.inputs.len()));

        // Computed on the first key-backed input, shared by the rest.
        let mut preimage_hash: Option<[u8; 32]> = None;
        for i in 0..self.inputs.len() {
            let script = self.unlocking_script(i, &mut preimage_hash)?;
            self.inputs[i].write_to(&mut writer, &script);
        }

        self.write_outputs(&mut writer)?;

        let serialized = SerializedTransaction::new(writer.into_bytes());
        debug!(
            inputs = self.inputs.len(),
            outputs = self.outputs.len(),
            signed = true,
            len = serialized.len(),
            txid = %serialized.txid_hex(),
            "serialized transaction"
        );
        Ok(serialized)
    }

    /// Serialize the unsigned signing image.
    ///
    /// Never touches signing material, so it only needs shared access.
    pub fn serialize_unsigned(&self) -> Result<SerializedTransaction, TransactionError> {
        let mut writer = ByteWriter::with_capacity(256);
        writer.write_i32_le(self.version);

        if self.inputs.is_empty() {
            return Err(TransactionError::EmptyInputs);
        }
        writer.write_varint(VarInt::from(self.inputs.len()));
        for input in &self.inputs {
            input.write_to(&mut writer, &input.script_pub_key);
        }

        self.write_outputs(&mut writer)?;
        writer.write_u32_le(SIGHASH_ALL);

        let serialized = SerializedTransaction::new(writer.into_bytes());
        debug!(
            inputs = self.inputs.len(),
            outputs = self.outputs.len(),
            signed = false,
            len = serialized.len(),
            txid = %serialized.txid_hex(),
            "serialized transaction"
        );
        Ok(serialized)
    }

    /// Output count, outputs and lock time.
    fn write_outputs(&self, writer: &mut ByteWriter) -> Result<(), TransactionError> {
        if self.outputs.is_empty() {
            return Err(TransactionError::EmptyOutputs);
        }
        writer.write_varint(VarInt::from(self.outputs.len()));
        for output in &self.outputs {
            output.write_to(writer);
        }
        writer.write_u32_le(self.lock_time);
        Ok(())
    }

    /// Resolve the unlocking script of input `i`, signing if needed.
    fn unlocking_script(
        &mut self,
        i: usize,
        preimage_hash: &mut Option<[u8; 32]>,
    ) -> Result<Script, TransactionError> {
        let input = &self.inputs[i];
        let key = match &input.signing_method {
            Some(SigningMethod::Script(script)) => return Ok(script.clone()),
            Some(SigningMethod::PrivateKey(key)) => key.clone(),
            None => {
                return Err(TransactionError::MissingSigningMaterial {
                    ordinal: i + 1,
                    index: input.index,
                })
            }
        };

        let digest = match *preimage_hash {
            Some(hash) => hash,
            None => {
                let hash = self.serialize_unsigned()?.hash();
                trace!(preimage = %hex::encode(hash), "computed signing preimage");
                *preimage_hash = Some(hash);
                hash
            }
        };

        let script = sign_input(&key, &digest)?;
        debug!(ordinal = i + 1, index = self.inputs[i].index, "signed input");
        self.inputs[i].signing_method = Some(SigningMethod::Script(script.clone()));
        Ok(script)
    }

    // -----------------------------------------------------------------
    // Deserialization
    // -----------------------------------------------------------------

    /// Parse a signed transaction from hex.
    pub fn from_hex(hex_str: &str) -> Result<Self, TransactionError> {
        let bytes = hex::decode(hex_str).map_err(|e| {
            TransactionError::Serialization(format!("invalid hex: {}", e))
        })?;
        Self::from_bytes(&bytes)
    }

    /// Parse a signed transaction from raw bytes.
    ///
    /// Every input gets its unlocking script as a fixed signing method and
    /// an empty locking script. The slice must hold exactly one transaction.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        let mut reader = ByteReader::new(bytes);
        let tx = Self::read_from(&mut reader)?;
        if reader.remaining() != 0 {
            return Err(TransactionError::Serialization(format!(
                "trailing {} bytes after transaction",
                reader.remaining()
            )));
        }
        Ok(tx)
    }

    fn read_from(reader: &mut ByteReader) -> Result<Self, TransactionError> {
        let version = reader.read_i32_le().map_err(|e| {
            TransactionError::Serialization(format!("reading version: {}", e))
        })?;

        let input_count = read_count(reader, "input")?;
        let mut inputs = Vec::with_capacity(input_count.min(reader.remaining()));
        for _ in 0..input_count {
            inputs.push(TxInput::read_from(reader)?);
        }

        let output_count = read_count(reader, "output")?;
        let mut outputs = Vec::with_capacity(output_count.min(reader.remaining()));
        for _ in 0..output_count {
            outputs.push(TxOutput::read_from(reader)?);
        }

        let lock_time = reader.read_u32_le().map_err(|e| {
            TransactionError::Serialization(format!("reading lock time: {}", e))
        })?;

        Ok(Transaction {
            version,
            inputs,
            outputs,
            lock_time,
        })
    }
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new()
    }
}

fn read_count(reader: &mut ByteReader, what: &str) -> Result<usize, TransactionError> {
    let count = reader.read_varint().map_err(|e| {
        TransactionError::Serialization(format!("reading {} count: {}", what, e))
    })?;
    usize::try_from(count.value()).map_err(|_| {
        TransactionError::Serialization(format!("{} count {} too large", what, count.value()))
    })
}

/// Unlocking script `PUSH(sig || 0x01) PUSH(compressed pubkey)`.
fn sign_input(key: &PrivateKey, digest: &[u8; 32]) -> Result<Script, TransactionError> {
    let mut sig = key.sign(digest)?.to_der();
    sig.push(SIGHASH_ALL as u8);

    let mut builder = ScriptBuilder::new();
    builder
        .push_data(&sig)?
        .push_data(&key.pub_key().to_compressed())?;
    Ok(builder.build())
}
