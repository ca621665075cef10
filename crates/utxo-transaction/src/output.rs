//! Transaction output with a value and locking script.

use utxo_primitives::util::{ByteReader, ByteWriter};
use utxo_script::{Address, Script};

use crate::TransactionError;

/// A single output in a transaction.
///
/// # Wire format
///
/// | Field            | Size           |
/// |------------------|----------------|
/// | value            | 8 bytes (LE)   |
/// | script length    | VarInt         |
/// | script_pub_key   | variable       |
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TxOutput {
    /// Amount in the smallest currency unit.
    pub value: u64,

    /// The locking script (scriptPubKey) that defines spending conditions.
    pub script_pub_key: Script,
}

impl TxOutput {
    pub fn new(value: u64, script_pub_key: Script) -> Self {
        TxOutput {
            value,
            script_pub_key,
        }
    }

    /// Pay `value` to `address` using its standard locking script.
    pub fn to_address(value: u64, address: &Address) -> Self {
        Self::new(value, address.script_pub_key())
    }

    pub(crate) fn write_to(&self, writer: &mut ByteWriter) {
        writer.write_u64_le(self.value);
        writer.write_var_bytes(self.script_pub_key.to_bytes());
    }

    pub(crate) fn read_from(reader: &mut ByteReader) -> Result<Self, TransactionError> {
        let value = reader.read_u64_le().map_err(|e| {
            TransactionError::Serialization(format!("reading value: {}", e))
        })?;

        let script_bytes = reader.read_var_bytes().map_err(|e| {
            TransactionError::Serialization(format!("reading locking script: {}", e))
        })?;

        Ok(TxOutput {
            value,
            script_pub_key: Script::from_bytes(script_bytes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use utxo_script::{AddressFactory, Network};

    #[test]
    fn test_to_address() {
        let factory = AddressFactory::new(Network::mainnet());
        let address = factory.address("1E7ucTTWRTahCyViPhxSMor2pj4VGQdFMr").unwrap();
        let output = TxOutput::to_address(1500, &address);
        assert_eq!(output.value, 1500);
        assert_eq!(
            output.script_pub_key.to_hex(),
            "76a9148fe80c75c9560e8b56ed64ea3c26e18d2c52211b88ac"
        );
    }

    #[test]
    fn test_wire_format() {
        let output = TxOutput::new(5_000_000_000, Script::p2pkh(&[0xcc; 20]));
        let mut writer = ByteWriter::new();
        output.write_to(&mut writer);
        let bytes = writer.into_bytes();
        assert_eq!(hex::encode(&bytes[..9]), "00f2052a0100000019");
        assert_eq!(bytes.len(), 8 + 1 + 25);

        let mut reader = ByteReader::new(&bytes);
        assert_eq!(TxOutput::read_from(&mut reader).unwrap(), output);
    }
}
