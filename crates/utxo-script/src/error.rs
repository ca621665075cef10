use crate::multisig::MultiSigReason;

/// Error types for script, address and multisig operations.
///
/// Covers assembler input validation, script decoding, address
/// encoding/identification, network configuration and M-of-N checks.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// The mnemonic is not in the supported opcode table.
    #[error("unsupported opcode: {0}")]
    UnsupportedOpcode(String),

    /// Single-byte-length pushes only address payloads of 1 to 75 bytes.
    #[error("push data must be between 1 and 75 bytes, got {0}")]
    PushDataRange(usize),

    /// Invalid hex string.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Not enough data in script to complete a push operation.
    #[error("not enough data")]
    DataTooSmall,

    /// Malformed or checksum-invalid address string.
    #[error("cannot decode address '{0}'")]
    AddressDecode(String),

    /// The address version byte is not the one the variant expects.
    #[error("address prefix mismatch: expected 0x{expected:02x}, found 0x{found:02x}")]
    AddressPrefixMismatch {
        /// Prefix configured for the requested variant.
        expected: u8,
        /// Prefix found in the decoded address.
        found: u8,
    },

    /// The address prefix matches neither the P2PKH nor the P2SH constant.
    #[error("could not identify address '{0}' as P2PKH/P2SH")]
    UnidentifiedAddress(String),

    /// The script does not match any known output template.
    #[error("could not identify script pattern: {0}")]
    UnidentifiedScriptPattern(String),

    /// Invalid M-of-N parameters.
    #[error("invalid multisig configuration: {0}")]
    MultiSigConfiguration(MultiSigReason),

    /// Network constants failed validation or could not be parsed.
    #[error("invalid network configuration: {0}")]
    InvalidNetwork(String),

    /// A wrapped segwit address does not commit to the witness program
    /// rebuilt from the supplied key or redeem script.
    #[error("address '{address}' does not commit to witness script {witness_script}")]
    WitnessScriptMismatch {
        /// The encoded address.
        address: String,
        /// Hex of the rebuilt witness program.
        witness_script: String,
    },
}
