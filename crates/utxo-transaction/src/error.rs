/// Error types for transaction assembly, signing and (de)serialization.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Serialization was attempted with no inputs.
    #[error("transaction has no inputs")]
    EmptyInputs,

    /// Serialization was attempted with no outputs.
    #[error("transaction has no outputs")]
    EmptyOutputs,

    /// Signatures were requested but an input has neither a fixed script
    /// nor a private key.
    #[error("input #{ordinal} (previous output index {index}) has no script or signing key")]
    MissingSigningMaterial {
        /// 1-based position of the input in the transaction.
        ordinal: usize,
        /// Previous-output index the input spends.
        index: u32,
    },

    /// A field value is out of range.
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),

    /// Malformed, truncated or trailing bytes while decoding.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// An underlying script error (forwarded from `utxo-script`).
    #[error("script error: {0}")]
    Script(#[from] utxo_script::ScriptError),

    /// An underlying primitives error (forwarded from `utxo-primitives`).
    #[error("primitives error: {0}")]
    Primitives(#[from] utxo_primitives::PrimitivesError),
}
