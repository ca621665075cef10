use proptest::prelude::*;

use utxo_script::Script;
use utxo_transaction::{Transaction, TxInput, TxOutput};

/// Strategy to generate a transaction whose inputs carry fixed scripts.
fn arb_transaction() -> impl Strategy<Value = Transaction> {
    let arb_input = (
        prop::array::uniform32(any::<u8>()),        // prev tx hash
        any::<u32>(),                               // prev tx index
        prop::collection::vec(any::<u8>(), 0..64),  // scriptSig
        prop::collection::vec(any::<u8>(), 0..64),  // spent scriptPubKey
        any::<u32>(),                               // sequence
    ).prop_map(|(hash, idx, sig_bytes, spk_bytes, seq)| {
        TxInput::from_hash(hash, idx, Script::from_bytes(&spk_bytes))
            .with_script(Script::from_bytes(&sig_bytes))
            .with_sequence(seq)
    });

    let arb_output = (
        any::<u64>(),
        prop::collection::vec(any::<u8>(), 0..64),
    ).prop_map(|(value, script_bytes)| TxOutput::new(value, Script::from_bytes(&script_bytes)));

    (
        0..=i32::MAX,  // version
        prop::collection::vec(arb_input, 1..4),
        prop::collection::vec(arb_output, 1..4),
        any::<u32>(),  // locktime
    ).prop_map(|(version, inputs, outputs, locktime)| {
        let mut tx = Transaction::new();
        tx.set_version(version).unwrap();
        tx.set_lock_time(locktime);
        for i in inputs { tx.add_input(i); }
        for o in outputs { tx.add_output(o); }
        tx
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn signed_bytes_decode_back(mut tx in arb_transaction()) {
        let signed = tx.serialize(true).unwrap();
        let mut decoded = Transaction::from_bytes(signed.as_bytes()).unwrap();
        prop_assert_eq!(decoded.version(), tx.version());
        prop_assert_eq!(decoded.lock_time(), tx.lock_time());
        prop_assert_eq!(decoded.outputs(), tx.outputs());
        for (a, b) in decoded.inputs().iter().zip(tx.inputs()) {
            prop_assert_eq!(a.prev_tx_hash, b.prev_tx_hash);
            prop_assert_eq!(a.unlocking_script(), b.unlocking_script());
        }
        prop_assert_eq!(decoded.serialize(true).unwrap(), signed);
    }

    #[test]
    fn unsigned_is_deterministic(mut tx in arb_transaction()) {
        let a = tx.serialize(false).unwrap();
        let b = tx.serialize(false).unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(&a.as_bytes()[a.len() - 4..], &[1u8, 0, 0, 0][..]);
    }

    #[test]
    fn unsigned_and_signed_differ_in_length_by_scripts(mut tx in arb_transaction()) {
        let unsigned = tx.serialize(false).unwrap();
        let signed = tx.serialize(true).unwrap();
        let sig_len: usize = tx.inputs().iter().map(|i| i.unlocking_script().map_or(0, Script::len)).sum();
        let spk_len: usize = tx.inputs().iter().map(|i| i.script_pub_key.len()).sum();
        // Script lengths stay below 0xfd, so each length prefix is one byte.
        prop_assert_eq!(unsigned.len() + sig_len, signed.len() + spk_len + 4);
    }
}
