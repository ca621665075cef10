//! Script chunk decoding.
//!
//! A chunk is either an opcode or a data push with its payload. Decoding
//! recognizes every push form (direct, PUSHDATA1/2/4) so that any
//! well-formed script can be decompiled, not only ones the assembler emits.

use crate::opcodes::*;
use crate::ScriptError;

/// A single parsed element of a script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptChunk {
    /// The opcode byte. For direct pushes (1-75 bytes), this is the length.
    pub op: u8,
    /// The data payload, if this chunk is a push operation.
    pub data: Option<Vec<u8>>,
}

impl ScriptChunk {
    /// ASM token: pushes render as hex, opcodes by canonical mnemonic.
    pub fn to_asm_string(&self) -> String {
        match (&self.data, opcode_to_string(self.op)) {
            (Some(data), _) => hex::encode(data),
            (None, Some(name)) => name.to_string(),
            (None, None) => format!("OP_UNKNOWN{}", self.op),
        }
    }
}

/// Decode raw script bytes into chunks.
///
/// # Returns
/// `DataTooSmall` if a push runs past the end of the script.
pub fn decode_script(bytes: &[u8]) -> Result<Vec<ScriptChunk>, ScriptError> {
    let mut chunks = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let op = bytes[pos];
        pos += 1;

        let length = match op {
            OP_DATA_1..=OP_DATA_75 => op as usize,
            OP_PUSHDATA1 => read_len(bytes, &mut pos, 1)?,
            OP_PUSHDATA2 => read_len(bytes, &mut pos, 2)?,
            OP_PUSHDATA4 => read_len(bytes, &mut pos, 4)?,
            _ => {
                chunks.push(ScriptChunk { op, data: None });
                continue;
            }
        };

        let end = pos
            .checked_add(length)
            .filter(|end| *end <= bytes.len())
            .ok_or(ScriptError::DataTooSmall)?;
        chunks.push(ScriptChunk {
            op,
            data: Some(bytes[pos..end].to_vec()),
        });
        pos = end;
    }

    Ok(chunks)
}

/// Read a `width`-byte little-endian push length at `pos`.
fn read_len(bytes: &[u8], pos: &mut usize, width: usize) -> Result<usize, ScriptError> {
    if bytes.len() < *pos + width {
        return Err(ScriptError::DataTooSmall);
    }
    let mut buf = [0u8; 4];
    buf[..width].copy_from_slice(&bytes[*pos..*pos + width]);
    *pos += width;
    Ok(u32::from_le_bytes(buf) as usize)
}
