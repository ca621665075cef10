//! Scenario tests for the utxo-transaction crate.
//!
//! Covers the unsigned wire layout, sign-on-serialize with scriptSig caching,
//! error ordering for incomplete transactions, and decoding of real signed
//! transactions.

use utxo_primitives::ec::{PrivateKey, Signature};
use utxo_script::{Script, ScriptBuilder};

use crate::input::{SigningMethod, TxInput};
use crate::output::TxOutput;
use crate::transaction::Transaction;
use crate::TransactionError;

// -----------------------------------------------------------------------
// Raw transaction hex test vectors
// -----------------------------------------------------------------------

/// A standard single-input transaction.
const SOURCE_RAW_TX: &str = "010000000138c7c61c14ffb063c3bb2664041a3e29ea6ea0412a0c18ff725ba4e9e12afae2030000006a47304402203e9ab8e4c14addf3b4741540b556cfb0e0efb67dc1a7b5ce84c3ac56b3fd447802203c9f49f7bd893ebd7060176dfc36bcaff9d2c443d9a0dd6cd2d59b372c024d20412102798913bc057b344de675dac34faafe3dc2f312c758cd9068209f810877306d66ffffffff02dc050000000000002076a914eb0bd5edba389198e73f8efabddfc61666969ff788ac6a0568656c6c6faa0d0000000000001976a914eb0bd5edba389198e73f8efabddfc61666969ff788ac00000000";

/// A coinbase transaction.
const COINBASE_TX_HEX: &str = "01000000010000000000000000000000000000000000000000000000000000000000000000ffffffff17033f250d2f43555656452f2c903fb60859897700d02700ffffffff01d864a012000000001976a914d648686cf603c11850f39600e37312738accca8f88ac00000000";

/// A version-2 transaction with three inputs and a non-zero lock time.
const MULTI_INPUT_TX_HEX: &str = "0200000003a9bc457fdc6a54d99300fb137b23714d860c350a9d19ff0f571e694a419ff3a0010000006b48304502210086c83beb2b2663e4709a583d261d75be538aedcafa7766bd983e5c8db2f8b2fc02201a88b178624ab0ad1748b37c875f885930166237c88f5af78ee4e61d337f935f412103e8be830d98bb3b007a0343ee5c36daa48796ae8bb57946b1e87378ad6e8a090dfeffffff0092bb9a47e27bf64fc98f557c530c04d9ac25e2f2a8b600e92a0b1ae7c89c20010000006b483045022100f06b3db1c0a11af348401f9cebe10ae2659d6e766a9dcd9e3a04690ba10a160f02203f7fbd7dfcfc70863aface1a306fcc91bbadf6bc884c21a55ef0d32bd6b088c8412103e8be830d98bb3b007a0343ee5c36daa48796ae8bb57946b1e87378ad6e8a090dfeffffff9d0d4554fa692420a0830ca614b6c60f1bf8eaaa21afca4aa8c99fb052d9f398000000006b483045022100d920f2290548e92a6235f8b2513b7f693a64a0d3fa699f81a034f4b4608ff82f0220767d7d98025aff3c7bd5f2a66aab6a824f5990392e6489aae1e1ae3472d8dffb412103e8be830d98bb3b007a0343ee5c36daa48796ae8bb57946b1e87378ad6e8a090dfeffffff02807c814a000000001976a9143a6bf34ebfcf30e8541bbb33a7882845e5a29cb488ac76b0e60e000000001976a914bd492b67f90cb85918494767ebb23102c4f06b7088ac67000000";

fn private_key(n: u8) -> PrivateKey {
    let mut bytes = [0u8; 32];
    bytes[31] = n;
    PrivateKey::from_bytes(&bytes).expect("valid key")
}

/// One input spending `"aa"*32:0` locked to P2PKH over `"bb"*20`, one
/// output of 50 coins to P2PKH over `"cc"*20`.
fn scenario_tx() -> Transaction {
    let input = TxInput::new(&"aa".repeat(32), 0, Script::p2pkh(&[0xbb; 20])).unwrap();
    let mut tx = Transaction::new();
    tx.add_input(input)
        .add_output(TxOutput::new(5_000_000_000, Script::p2pkh(&[0xcc; 20])));
    tx
}

// -----------------------------------------------------------------------
// Unsigned image
// -----------------------------------------------------------------------

#[test]
fn test_unsigned_scenario_layout() {
    let mut tx = scenario_tx();
    let serialized = tx.serialize(false).unwrap();

    let parts: [&str; 13] = [
        "01000000",
        "01",
        &"aa".repeat(32),
        "00000000",
        "19",
        &format!("76a914{}88ac", "bb".repeat(20)),
        "ffffffff",
        "01",
        "00f2052a01000000",
        "19",
        &format!("76a914{}88ac", "cc".repeat(20)),
        "00000000",
        "01000000",
    ];
    assert_eq!(serialized.to_hex(), parts.concat());
}

#[test]
fn test_unsigned_is_idempotent() {
    let mut tx = scenario_tx();
    let first = tx.serialize(false).unwrap();
    let second = tx.serialize(false).unwrap();
    assert_eq!(first.as_bytes(), second.as_bytes());
    assert_eq!(first.hash(), second.hash());
    assert_eq!(tx.serialize_unsigned().unwrap(), first);
}

#[test]
fn test_prev_hash_reversed_on_wire() {
    let hash = format!("{}{}", "11".repeat(31), "22");
    let mut tx = Transaction::new();
    tx.add_input(TxInput::new(&hash, 5, Script::new()).unwrap())
        .add_output(TxOutput::new(1, Script::new()));
    let bytes = tx.serialize(false).unwrap().into_bytes();
    assert_eq!(bytes[5], 0x22);
    assert_eq!(bytes[36], 0x11);
    assert_eq!(&bytes[37..41], &[5, 0, 0, 0]);
}

#[test]
fn test_version_and_lock_time() {
    let mut tx = scenario_tx();
    tx.set_version(2).unwrap();
    tx.set_lock_time(0x0102_0304);
    let hex = tx.serialize(false).unwrap().to_hex();
    assert!(hex.starts_with("02000000"));
    assert!(hex.ends_with("0403020101000000"));

    assert!(matches!(
        tx.set_version(-1),
        Err(TransactionError::InvalidTransaction(_))
    ));
    assert_eq!(tx.version(), 2);
}

// -----------------------------------------------------------------------
// Signing
// -----------------------------------------------------------------------

#[test]
fn test_signed_script_sig_form() {
    let key = private_key(1);
    let pub_key = key.pub_key();
    let mut tx = Transaction::new();
    tx.add_input(
        TxInput::new(&"aa".repeat(32), 0, Script::p2pkh(&pub_key.hash160()))
            .unwrap()
            .with_private_key(key),
    )
    .add_output(TxOutput::new(4_999_990_000, Script::p2pkh(&[0xcc; 20])));

    let unsigned = tx.serialize(false).unwrap();
    let signed = tx.serialize(true).unwrap();
    assert_ne!(signed.hash(), unsigned.hash());
    assert_ne!(signed.as_bytes(), unsigned.as_bytes());

    // The key has been replaced by the script it produced.
    let script_sig = tx.inputs()[0].unlocking_script().expect("cached script").clone();
    let chunks = script_sig.chunks().unwrap();
    assert_eq!(chunks.len(), 2);

    let sig_with_type = chunks[0].data.as_ref().unwrap();
    assert_eq!(chunks[0].op as usize, sig_with_type.len());
    assert_eq!(sig_with_type.last(), Some(&0x01));
    let sig = Signature::from_der(&sig_with_type[..sig_with_type.len() - 1]).unwrap();
    assert!(pub_key.verify(&unsigned.hash(), &sig));

    assert_eq!(chunks[1].op, 33);
    assert_eq!(chunks[1].data.as_deref(), Some(&pub_key.to_compressed()[..]));

    // scriptSig sits right after the 4+1+32+4 byte prefix.
    let bytes = signed.as_bytes();
    assert_eq!(bytes[41] as usize, script_sig.len());
    assert_eq!(&bytes[42..42 + script_sig.len()], script_sig.to_bytes());
}

#[test]
fn test_signed_serialization_is_stable() {
    let mut tx = scenario_tx();
    tx.inputs_mut()[0].signing_method = Some(SigningMethod::PrivateKey(private_key(7)));

    let first = tx.serialize(true).unwrap();
    assert!(matches!(tx.inputs()[0].signing_method, Some(SigningMethod::Script(_))));
    let second = tx.serialize(true).unwrap();
    assert_eq!(first, second);

    // The unsigned image still uses the locking script.
    let unsigned = tx.serialize(false).unwrap();
    assert_eq!(unsigned, scenario_tx().serialize(false).unwrap());
}

#[test]
fn test_all_inputs_share_one_preimage() {
    let keys = [private_key(2), private_key(3)];
    let mut tx = Transaction::new();
    for (i, key) in keys.iter().enumerate() {
        let input = TxInput::new(&"aa".repeat(32), i as u32, Script::p2pkh(&key.pub_key().hash160()))
            .unwrap()
            .with_private_key(key.clone());
        tx.add_input(input);
    }
    tx.add_output(TxOutput::new(1000, Script::p2pkh(&[0xcc; 20])));

    let preimage = tx.serialize_unsigned().unwrap().hash();
    tx.serialize(true).unwrap();

    for (input, key) in tx.inputs().iter().zip(&keys) {
        let chunks = input.unlocking_script().unwrap().chunks().unwrap();
        let der = chunks[0].data.as_ref().unwrap();
        let sig = Signature::from_der(&der[..der.len() - 1]).unwrap();
        assert!(key.pub_key().verify(&preimage, &sig));
    }
}

#[test]
fn test_fixed_script_used_verbatim() {
    let mut builder = ScriptBuilder::new();
    builder.push_data(&[0xde, 0xad]).unwrap().op("OP_TRUE").unwrap();
    let script_sig = builder.build();

    let mut tx = scenario_tx();
    tx.inputs_mut()[0].signing_method = Some(SigningMethod::Script(script_sig.clone()));
    let signed = tx.serialize(true).unwrap();
    let bytes = signed.as_bytes();
    assert_eq!(bytes[41], 4);
    assert_eq!(&bytes[42..46], &[0x02, 0xde, 0xad, 0x51]);
    // Signed form carries no sighash marker.
    assert!(signed.to_hex().ends_with("88ac00000000"));
}

#[test]
fn test_mixed_inputs() {
    let mut tx = scenario_tx();
    tx.inputs_mut()[0].signing_method = Some(SigningMethod::Script(Script::from_bytes(&[0x51])));
    tx.add_input(
        TxInput::new(&"bb".repeat(32), 1, Script::p2pkh(&[0x01; 20]))
            .unwrap()
            .with_private_key(private_key(4)),
    );
    tx.serialize(true).unwrap();
    assert_eq!(tx.inputs()[0].unlocking_script(), Some(&Script::from_bytes(&[0x51])));
    assert!(tx.inputs()[1].unlocking_script().is_some());
}

// -----------------------------------------------------------------------
// Errors
// -----------------------------------------------------------------------

#[test]
fn test_empty_inputs() {
    let mut tx = Transaction::new();
    tx.add_output(TxOutput::new(1, Script::new()));
    assert!(matches!(tx.serialize(false), Err(TransactionError::EmptyInputs)));
    assert!(matches!(tx.serialize(true), Err(TransactionError::EmptyInputs)));
    // No outputs either: inputs are checked first.
    assert!(matches!(Transaction::new().serialize(true), Err(TransactionError::EmptyInputs)));
}

#[test]
fn test_empty_outputs() {
    let mut tx = Transaction::new();
    tx.add_input(TxInput::from_hash([0xaa; 32], 0, Script::new()).with_script(Script::new()));
    assert!(matches!(tx.serialize(false), Err(TransactionError::EmptyOutputs)));
    assert!(matches!(tx.serialize(true), Err(TransactionError::EmptyOutputs)));
}

#[test]
fn test_missing_signing_material_reports_ordinal() {
    let mut tx = scenario_tx();
    tx.inputs_mut()[0].signing_method = Some(SigningMethod::Script(Script::new()));
    tx.add_input(TxInput::from_hash([0xdd; 32], 7, Script::new()));

    let err = tx.serialize(true).unwrap_err();
    assert!(matches!(
        err,
        TransactionError::MissingSigningMaterial { ordinal: 2, index: 7 }
    ));
    assert_eq!(
        err.to_string(),
        "input #2 (previous output index 7) has no script or signing key"
    );
    // Signatures are not needed for the unsigned image.
    assert!(tx.serialize(false).is_ok());
}

// -----------------------------------------------------------------------
// Decoding
// -----------------------------------------------------------------------

#[test]
fn test_decode_roundtrip() {
    for raw in [SOURCE_RAW_TX, COINBASE_TX_HEX, MULTI_INPUT_TX_HEX] {
        let mut tx = Transaction::from_hex(raw).expect("should parse");
        assert_eq!(tx.serialize(true).unwrap().to_hex(), raw);
    }
}

#[test]
fn test_decode_fields() {
    let tx = Transaction::from_hex(MULTI_INPUT_TX_HEX).unwrap();
    assert_eq!(tx.version(), 2);
    assert_eq!(tx.input_count(), 3);
    assert_eq!(tx.output_count(), 2);
    assert_eq!(tx.lock_time(), 103);
    assert_eq!(tx.inputs()[0].sequence, 0xffff_fffe);
    assert_eq!(tx.inputs()[0].index, 1);
    // Wire order a9bc..a0 is displayed reversed.
    assert!(tx.inputs()[0].prev_tx_hash_hex().starts_with("a0f39f41"));
    assert!(tx.inputs()[0].script_pub_key.is_empty());
    assert_eq!(tx.total_output_value(), 0x4a81_7c80 + 0x0ee6_b076);

    let source = Transaction::from_hex(SOURCE_RAW_TX).unwrap();
    assert!(!source.outputs()[0].script_pub_key.is_empty());
    assert_eq!(source.outputs()[0].value, 0x05dc);
}

#[test]
fn test_decode_errors() {
    let trailing = format!("{}00", SOURCE_RAW_TX);
    assert!(matches!(
        Transaction::from_hex(&trailing),
        Err(TransactionError::Serialization(_))
    ));
    assert!(matches!(
        Transaction::from_hex("zz"),
        Err(TransactionError::Serialization(_))
    ));
    assert!(Transaction::from_bytes(&[]).is_err());
    assert!(Transaction::from_hex(&SOURCE_RAW_TX[..SOURCE_RAW_TX.len() - 8]).is_err());
}
