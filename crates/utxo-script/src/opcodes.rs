//! Opcode constants and the closed mnemonic table.
//!
//! Only a trimmed subset of the instruction set is supported. Every name the
//! assembler accepts is listed in [`OPCODE_TABLE`]; anything else is rejected.

pub const OP_0: u8 = 0x00;
pub const OP_FALSE: u8 = 0x00;
pub const OP_DATA_1: u8 = 0x01;
pub const OP_DATA_20: u8 = 0x14;
pub const OP_DATA_32: u8 = 0x20;
pub const OP_DATA_33: u8 = 0x21;
pub const OP_DATA_75: u8 = 0x4b;
pub const OP_PUSHDATA1: u8 = 0x4c;
pub const OP_PUSHDATA2: u8 = 0x4d;
pub const OP_PUSHDATA4: u8 = 0x4e;
pub const OP_1: u8 = 0x51;
pub const OP_TRUE: u8 = 0x51;
pub const OP_16: u8 = 0x60;
pub const OP_IF: u8 = 0x63;
pub const OP_NOTIF: u8 = 0x64;
pub const OP_ELSE: u8 = 0x67;
pub const OP_ENDIF: u8 = 0x68;
pub const OP_VERIFY: u8 = 0x69;
pub const OP_RETURN: u8 = 0x6a;
pub const OP_DUP: u8 = 0x76;
pub const OP_EQUAL: u8 = 0x87;
pub const OP_EQUALVERIFY: u8 = 0x88;
pub const OP_1ADD: u8 = 0x8b;
pub const OP_1SUB: u8 = 0x8c;
pub const OP_ADD: u8 = 0x93;
pub const OP_SUB: u8 = 0x94;
pub const OP_RIPEMD160: u8 = 0xa6;
pub const OP_SHA1: u8 = 0xa7;
pub const OP_SHA256: u8 = 0xa8;
pub const OP_HASH160: u8 = 0xa9;
pub const OP_HASH256: u8 = 0xaa;
pub const OP_CHECKSIG: u8 = 0xac;
pub const OP_CHECKSIGVERIFY: u8 = 0xad;
pub const OP_CHECKMULTISIG: u8 = 0xae;
pub const OP_CHECKMULTISIGVERIFY: u8 = 0xaf;

/// Mnemonic to byte mapping. Where two names share a byte, the first one
/// listed is the canonical name used when decompiling.
pub const OPCODE_TABLE: &[(&str, u8)] = &[
    ("OP_0", OP_0),
    ("OP_FALSE", OP_FALSE),
    ("OP_1", OP_1),
    ("OP_TRUE", OP_TRUE),
    ("OP_2", 0x52),
    ("OP_3", 0x53),
    ("OP_4", 0x54),
    ("OP_5", 0x55),
    ("OP_6", 0x56),
    ("OP_7", 0x57),
    ("OP_8", 0x58),
    ("OP_9", 0x59),
    ("OP_10", 0x5a),
    ("OP_11", 0x5b),
    ("OP_12", 0x5c),
    ("OP_13", 0x5d),
    ("OP_14", 0x5e),
    ("OP_15", 0x5f),
    ("OP_16", OP_16),
    ("OP_IF", OP_IF),
    ("OP_NOTIF", OP_NOTIF),
    ("OP_ELSE", OP_ELSE),
    ("OP_ENDIF", OP_ENDIF),
    ("OP_VERIFY", OP_VERIFY),
    ("OP_RETURN", OP_RETURN),
    ("OP_DUP", OP_DUP),
    ("OP_EQUAL", OP_EQUAL),
    ("OP_EQUALVERIFY", OP_EQUALVERIFY),
    ("OP_1ADD", OP_1ADD),
    ("OP_1SUB", OP_1SUB),
    ("OP_ADD", OP_ADD),
    ("OP_SUB", OP_SUB),
    ("OP_RIPEMD160", OP_RIPEMD160),
    ("OP_SHA1", OP_SHA1),
    ("OP_SHA256", OP_SHA256),
    ("OP_HASH160", OP_HASH160),
    ("OP_HASH256", OP_HASH256),
    ("OP_CHECKSIG", OP_CHECKSIG),
    ("OP_CHECKSIGVERIFY", OP_CHECKSIGVERIFY),
    ("OP_CHECKMULTISIG", OP_CHECKMULTISIG),
    ("OP_CHECKMULTISIGVERIFY", OP_CHECKMULTISIGVERIFY),
];

/// Look up a mnemonic. Matching is case-insensitive and the `OP_` prefix
/// is optional, so `"dup"`, `"DUP"` and `"OP_DUP"` all resolve to `OP_DUP`.
pub fn string_to_opcode(name: &str) -> Option<u8> {
    let upper = name.trim().to_ascii_uppercase();
    let full = if upper.starts_with("OP_") {
        upper
    } else {
        format!("OP_{}", upper)
    };
    OPCODE_TABLE
        .iter()
        .find(|(mnemonic, _)| *mnemonic == full)
        .map(|(_, op)| *op)
}

/// Canonical mnemonic for a supported opcode byte.
pub fn opcode_to_string(op: u8) -> Option<&'static str> {
    OPCODE_TABLE
        .iter()
        .find(|(_, byte)| *byte == op)
        .map(|(mnemonic, _)| *mnemonic)
}

/// Whether `op` is in the supported table.
pub fn is_supported(op: u8) -> bool {
    opcode_to_string(op).is_some()
}

/// The opcode that pushes the small integer `n` (0..=16).
pub fn small_int_opcode(n: usize) -> Option<u8> {
    match n {
        0 => Some(OP_0),
        1..=16 => Some(OP_1 + (n as u8 - 1)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive_and_prefix_optional() {
        assert_eq!(string_to_opcode("OP_DUP"), Some(OP_DUP));
        assert_eq!(string_to_opcode("dup"), Some(OP_DUP));
        assert_eq!(string_to_opcode("op_checkmultisig"), Some(OP_CHECKMULTISIG));
        assert_eq!(string_to_opcode("TRUE"), Some(0x51));
    }

    #[test]
    fn test_unknown_mnemonics() {
        assert_eq!(string_to_opcode("OP_CAT"), None);
        assert_eq!(string_to_opcode("OP_17"), None);
        assert_eq!(string_to_opcode(""), None);
    }

    #[test]
    fn test_canonical_names() {
        assert_eq!(opcode_to_string(0x00), Some("OP_0"));
        assert_eq!(opcode_to_string(0x51), Some("OP_1"));
        assert_eq!(opcode_to_string(0xae), Some("OP_CHECKMULTISIG"));
        assert_eq!(opcode_to_string(0xb0), None);
    }

    #[test]
    fn test_table_stays_in_range() {
        assert!(OPCODE_TABLE.iter().all(|(_, op)| *op <= 0xaf));
    }

    #[test]
    fn test_small_int_opcode() {
        assert_eq!(small_int_opcode(0), Some(OP_0));
        assert_eq!(small_int_opcode(2), Some(0x52));
        assert_eq!(small_int_opcode(16), Some(OP_16));
        assert_eq!(small_int_opcode(17), None);
    }
}
