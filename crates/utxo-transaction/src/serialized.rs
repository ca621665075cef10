//! Result of serializing a transaction.

use std::fmt;

use utxo_primitives::hash::sha256d;

/// Wire bytes of a transaction together with their double-SHA-256 digest.
///
/// Immutable once produced. [`hash`](Self::hash) is the raw digest;
/// [`txid_hex`](Self::txid_hex) is the byte-reversed form transaction ids
/// are displayed in.
#[derive(Clone, PartialEq, Eq)]
pub struct SerializedTransaction {
    bytes: Box<[u8]>,
    hash: [u8; 32],
}

impl SerializedTransaction {
    pub(crate) fn new(bytes: Vec<u8>) -> Self {
        let hash = sha256d(&bytes);
        SerializedTransaction {
            bytes: bytes.into_boxed_slice(),
            hash,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes.into_vec()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    /// Raw double-SHA-256 of the bytes.
    pub fn hash(&self) -> [u8; 32] {
        self.hash
    }

    /// Transaction id in display order.
    pub fn txid_hex(&self) -> String {
        let mut id = self.hash;
        id.reverse();
        hex::encode(id)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for SerializedTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerializedTransaction")
            .field("txid", &self.txid_hex())
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl fmt::Display for SerializedTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_txid_is_reversed_hash() {
        let tx = SerializedTransaction::new(vec![0x01, 0x02, 0x03]);
        let mut reversed = tx.hash();
        reversed.reverse();
        assert_eq!(tx.txid_hex(), hex::encode(reversed));
        assert_eq!(tx.hash(), sha256d(&[0x01, 0x02, 0x03]));
        assert_eq!(tx.len(), 3);
        assert_eq!(tx.to_hex(), "010203");
        assert_eq!(tx.into_bytes(), vec![0x01, 0x02, 0x03]);
    }
}
