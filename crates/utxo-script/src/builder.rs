//! Opcode assembler.
//!
//! `ScriptBuilder` accumulates named opcodes and single-byte-length data
//! pushes, then concatenates them into a [`Script`]. Building does not reset
//! the token list, so `build()` may be called repeatedly.

use std::fmt;

use crate::opcodes::{is_supported, opcode_to_string, small_int_opcode, string_to_opcode, OP_DATA_75};
use crate::script::Script;
use crate::ScriptError;

/// Largest payload a direct push can carry.
pub const MAX_DIRECT_PUSH: usize = OP_DATA_75 as usize;

/// One assembler fragment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// A non-push opcode from the supported table.
    Op(u8),
    /// A direct push of 1 to 75 bytes.
    PushData(Vec<u8>),
}

impl Token {
    fn encoded_len(&self) -> usize {
        match self {
            Token::Op(_) => 1,
            Token::PushData(data) => 1 + data.len(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Op(op) => match opcode_to_string(*op) {
                Some(name) => write!(f, "{}", name),
                None => write!(f, "OP_UNKNOWN{}", op),
            },
            Token::PushData(data) => write!(f, "PUSHDATA({})[{}]", data.len(), hex::encode(data)),
        }
    }
}

/// Append-only script assembler.
///
/// # Example
/// ```
/// use utxo_script::ScriptBuilder;
///
/// let mut builder = ScriptBuilder::new();
/// builder.op("OP_DUP")?.op("OP_HASH160")?.push_data(&[0xbb; 20])?;
/// builder.op("OP_EQUALVERIFY")?.op("OP_CHECKSIG")?;
/// assert!(builder.build().is_p2pkh());
/// # Ok::<(), utxo_script::ScriptError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScriptBuilder {
    tokens: Vec<Token>,
}

impl ScriptBuilder {
    /// Create an empty assembler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a named opcode.
    ///
    /// # Arguments
    /// * `name` - Mnemonic such as `"OP_CHECKSIG"` or `"CHECKSIG"` (case-insensitive).
    ///
    /// # Returns
    /// `Err(ScriptError::UnsupportedOpcode)` if the name is not in the opcode table.
    pub fn op(&mut self, name: &str) -> Result<&mut Self, ScriptError> {
        let op = string_to_opcode(name)
            .ok_or_else(|| ScriptError::UnsupportedOpcode(name.to_string()))?;
        self.tokens.push(Token::Op(op));
        Ok(self)
    }

    /// Append an opcode by byte value. The byte must be in the opcode table.
    pub fn opcode(&mut self, op: u8) -> Result<&mut Self, ScriptError> {
        if !is_supported(op) {
            return Err(ScriptError::UnsupportedOpcode(format!("0x{:02x}", op)));
        }
        self.tokens.push(Token::Op(op));
        Ok(self)
    }

    /// Append the small-integer opcode `OP_<n>` for `n` in 0..=16.
    pub fn small_int(&mut self, n: usize) -> Result<&mut Self, ScriptError> {
        let op = small_int_opcode(n)
            .ok_or_else(|| ScriptError::UnsupportedOpcode(format!("OP_{}", n)))?;
        self.tokens.push(Token::Op(op));
        Ok(self)
    }

    /// Append a direct data push.
    ///
    /// # Returns
    /// `Err(ScriptError::PushDataRange)` unless `1 <= data.len() <= 75`.
    pub fn push_data(&mut self, data: &[u8]) -> Result<&mut Self, ScriptError> {
        if data.is_empty() || data.len() > MAX_DIRECT_PUSH {
            return Err(ScriptError::PushDataRange(data.len()));
        }
        self.tokens.push(Token::PushData(data.to_vec()));
        Ok(self)
    }

    /// The tokens appended so far, in order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Concatenate the tokens into a script. The assembler keeps its state.
    pub fn build(&self) -> Script {
        let len = self.tokens.iter().map(Token::encoded_len).sum();
        let mut bytes = Vec::with_capacity(len);
        for token in &self.tokens {
            match token {
                Token::Op(op) => bytes.push(*op),
                Token::PushData(data) => {
                    // Length fits the direct-push range, checked in push_data.
                    bytes.push(data.len() as u8);
                    bytes.extend_from_slice(data);
                }
            }
        }
        Script::from_bytes(&bytes)
    }
}

impl fmt::Display for ScriptBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}
