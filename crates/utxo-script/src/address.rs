//! Address hierarchy.
//!
//! Four variants share one shape: a network version byte, the 20-byte hash
//! it prefixes, and the checksummed string. The segwit-wrapped variants also
//! keep the scripts needed to spend them. Every constructor takes the
//! network constants and the check-encoding codec explicitly.

use std::fmt;

use utxo_primitives::ec::PublicKey;
use utxo_primitives::CheckEncoding;

use crate::network::Network;
use crate::opcodes::OP_0;
use crate::script::Script;
use crate::ScriptError;

/// Length of a decoded address payload: version byte plus hash.
const PAYLOAD_LEN: usize = 21;

/// Decode an address string into its version byte and hash.
pub(crate) fn decode_payload<C: CheckEncoding + ?Sized>(
    s: &str,
    codec: &C,
) -> Result<(u8, [u8; 20]), ScriptError> {
    let payload = codec
        .check_decode(s)
        .map_err(|e| ScriptError::AddressDecode(format!("{}: {}", s, e)))?;
    if payload.len() != PAYLOAD_LEN {
        return Err(ScriptError::AddressDecode(format!(
            "{}: expected {} payload bytes, got {}",
            s,
            PAYLOAD_LEN,
            payload.len()
        )));
    }
    let mut hash = [0u8; 20];
    hash.copy_from_slice(&payload[1..]);
    Ok((payload[0], hash))
}

/// Decode `s` and require its version byte to equal `expected`.
fn decode_with_prefix<C: CheckEncoding + ?Sized>(
    s: &str,
    expected: u8,
    codec: &C,
) -> Result<[u8; 20], ScriptError> {
    let (found, hash) = decode_payload(s, codec)?;
    if found != expected {
        return Err(ScriptError::AddressPrefixMismatch { expected, found });
    }
    Ok(hash)
}

fn encode_payload<C: CheckEncoding + ?Sized>(prefix: u8, hash: &[u8; 20], codec: &C) -> String {
    let mut payload = Vec::with_capacity(PAYLOAD_LEN);
    payload.push(prefix);
    payload.extend_from_slice(hash);
    codec.check_encode(&payload)
}

/// Version-0 witness program: `OP_0 PUSH(len) <program>`.
fn witness_program(program: &[u8]) -> Script {
    let mut bytes = Vec::with_capacity(2 + program.len());
    bytes.push(OP_0);
    // Programs are 20 or 32 bytes.
    bytes.push(program.len() as u8);
    bytes.extend_from_slice(program);
    Script::from_bytes(&bytes)
}

// ---------------------------------------------------------------------------
// P2PKH
// ---------------------------------------------------------------------------

/// Pay-to-public-key-hash address.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct P2pkhAddress {
    prefix: u8,
    hash: [u8; 20],
    encoded: String,
}

impl P2pkhAddress {
    /// Build an address over a known public key hash.
    ///
    /// # Arguments
    /// * `hash` - hash160 of the compressed public key.
    /// * `network` - Supplies the P2PKH version byte.
    /// * `codec` - Check-encoding codec.
    pub fn from_hash<C: CheckEncoding + ?Sized>(hash: &[u8; 20], network: &Network, codec: &C) -> Self {
        let prefix = network.p2pkh_prefix;
        P2pkhAddress {
            prefix,
            hash: *hash,
            encoded: encode_payload(prefix, hash, codec),
        }
    }

    /// Build the address of a public key.
    pub fn from_public_key<C: CheckEncoding + ?Sized>(key: &PublicKey, network: &Network, codec: &C) -> Self {
        Self::from_hash(&key.hash160(), network, codec)
    }

    /// Parse an encoded P2PKH address.
    ///
    /// # Returns
    /// `AddressDecode` for malformed strings, `AddressPrefixMismatch` when the
    /// version byte is not the network's P2PKH prefix.
    pub fn from_string<C: CheckEncoding + ?Sized>(s: &str, network: &Network, codec: &C) -> Result<Self, ScriptError> {
        let hash = decode_with_prefix(s, network.p2pkh_prefix, codec)?;
        Ok(Self::from_parts(network.p2pkh_prefix, hash, s))
    }

    /// Wrap an already decoded and prefix-checked string.
    pub(crate) fn from_parts(prefix: u8, hash: [u8; 20], encoded: &str) -> Self {
        P2pkhAddress {
            prefix,
            hash,
            encoded: encoded.to_string(),
        }
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    pub fn hash(&self) -> &[u8; 20] {
        &self.hash
    }

    /// The checksummed address string.
    pub fn encoded(&self) -> &str {
        &self.encoded
    }

    /// `OP_DUP OP_HASH160 <hash> OP_EQUALVERIFY OP_CHECKSIG`
    pub fn script_pub_key(&self) -> Script {
        Script::p2pkh(&self.hash)
    }
}

// ---------------------------------------------------------------------------
// P2SH
// ---------------------------------------------------------------------------

/// Pay-to-script-hash address.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct P2shAddress {
    prefix: u8,
    hash: [u8; 20],
    encoded: String,
}

impl P2shAddress {
    /// Build an address over a known script hash.
    pub fn from_hash<C: CheckEncoding + ?Sized>(hash: &[u8; 20], network: &Network, codec: &C) -> Self {
        let prefix = network.p2sh_prefix;
        P2shAddress {
            prefix,
            hash: *hash,
            encoded: encode_payload(prefix, hash, codec),
        }
    }

    /// Build the address committing to `redeem_script`.
    pub fn from_redeem_script<C: CheckEncoding + ?Sized>(
        redeem_script: &Script,
        network: &Network,
        codec: &C,
    ) -> Self {
        Self::from_hash(&redeem_script.hash160(), network, codec)
    }

    /// Parse an encoded P2SH address.
    pub fn from_string<C: CheckEncoding + ?Sized>(s: &str, network: &Network, codec: &C) -> Result<Self, ScriptError> {
        let hash = decode_with_prefix(s, network.p2sh_prefix, codec)?;
        Ok(Self::from_parts(network.p2sh_prefix, hash, s))
    }

    pub(crate) fn from_parts(prefix: u8, hash: [u8; 20], encoded: &str) -> Self {
        P2shAddress {
            prefix,
            hash,
            encoded: encoded.to_string(),
        }
    }

    /// Parse `s` as P2SH and require it to commit to `witness_script`.
    fn committing_to<C: CheckEncoding + ?Sized>(
        s: &str,
        witness_script: &Script,
        network: &Network,
        codec: &C,
    ) -> Result<Self, ScriptError> {
        let p2sh = Self::from_string(s, network, codec)?;
        if p2sh.hash != witness_script.hash160() {
            return Err(ScriptError::WitnessScriptMismatch {
                address: s.to_string(),
                witness_script: witness_script.to_hex(),
            });
        }
        Ok(p2sh)
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    pub fn hash(&self) -> &[u8; 20] {
        &self.hash
    }

    pub fn encoded(&self) -> &str {
        &self.encoded
    }

    /// `OP_HASH160 <hash> OP_EQUAL`
    pub fn script_pub_key(&self) -> Script {
        Script::p2sh(&self.hash)
    }
}

// ---------------------------------------------------------------------------
// P2SH-P2WPKH
// ---------------------------------------------------------------------------

/// A version-0 key-hash witness program wrapped in P2SH.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct P2shP2wpkhAddress {
    p2sh: P2shAddress,
    witness_script: Script,
}

impl P2shP2wpkhAddress {
    /// Wrap `OP_0 PUSH(20) hash160(key)` in a P2SH address.
    pub fn from_public_key<C: CheckEncoding + ?Sized>(key: &PublicKey, network: &Network, codec: &C) -> Self {
        let witness_script = witness_program(&key.hash160());
        P2shP2wpkhAddress {
            p2sh: P2shAddress::from_redeem_script(&witness_script, network, codec),
            witness_script,
        }
    }

    /// Rebuild the address of `key` from its encoded string.
    ///
    /// # Returns
    /// `AddressDecode` or `AddressPrefixMismatch` as for P2SH, and
    /// `WitnessScriptMismatch` if the string belongs to another key.
    pub fn from_string<C: CheckEncoding + ?Sized>(
        s: &str,
        key: &PublicKey,
        network: &Network,
        codec: &C,
    ) -> Result<Self, ScriptError> {
        let witness_script = witness_program(&key.hash160());
        Ok(P2shP2wpkhAddress {
            p2sh: P2shAddress::committing_to(s, &witness_script, network, codec)?,
            witness_script,
        })
    }

    /// The outer P2SH address.
    pub fn p2sh(&self) -> &P2shAddress {
        &self.p2sh
    }

    /// The witness program the P2SH hash commits to.
    pub fn witness_script(&self) -> &Script {
        &self.witness_script
    }

    pub fn script_pub_key(&self) -> Script {
        self.p2sh.script_pub_key()
    }
}

// ---------------------------------------------------------------------------
// P2SH-P2WSH
// ---------------------------------------------------------------------------

/// A version-0 script-hash witness program wrapped in P2SH.
///
/// Retains the redeem script and the witness script so that a spender can
/// later build the unlocking data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct P2shP2wshAddress {
    p2sh: P2shAddress,
    redeem_script: Script,
    witness_script: Script,
}

impl P2shP2wshAddress {
    /// Wrap `OP_0 PUSH(32) hash256(redeem_script)` in a P2SH address.
    pub fn from_redeem_script<C: CheckEncoding + ?Sized>(
        redeem_script: &Script,
        network: &Network,
        codec: &C,
    ) -> Self {
        let witness_script = witness_program(&redeem_script.hash256());
        P2shP2wshAddress {
            p2sh: P2shAddress::from_redeem_script(&witness_script, network, codec),
            redeem_script: redeem_script.clone(),
            witness_script,
        }
    }

    /// Rebuild the address of `redeem_script` from its encoded string.
    ///
    /// # Returns
    /// `WitnessScriptMismatch` if the string commits to a different script.
    pub fn from_string<C: CheckEncoding + ?Sized>(
        s: &str,
        redeem_script: &Script,
        network: &Network,
        codec: &C,
    ) -> Result<Self, ScriptError> {
        let witness_script = witness_program(&redeem_script.hash256());
        Ok(P2shP2wshAddress {
            p2sh: P2shAddress::committing_to(s, &witness_script, network, codec)?,
            redeem_script: redeem_script.clone(),
            witness_script,
        })
    }

    pub fn p2sh(&self) -> &P2shAddress {
        &self.p2sh
    }

    pub fn redeem_script(&self) -> &Script {
        &self.redeem_script
    }

    pub fn witness_script(&self) -> &Script {
        &self.witness_script
    }

    pub fn script_pub_key(&self) -> Script {
        self.p2sh.script_pub_key()
    }
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// Any supported address variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Address {
    /// Pay-to-public-key-hash.
    P2pkh(P2pkhAddress),
    /// Pay-to-script-hash.
    P2sh(P2shAddress),
    /// P2SH-wrapped key-hash witness program.
    P2shP2wpkh(P2shP2wpkhAddress),
    /// P2SH-wrapped script-hash witness program.
    P2shP2wsh(P2shP2wshAddress),
}

impl Address {
    /// The checksummed address string.
    pub fn encoded(&self) -> &str {
        match self {
            Address::P2pkh(a) => a.encoded(),
            Address::P2sh(a) => a.encoded(),
            Address::P2shP2wpkh(a) => a.p2sh.encoded(),
            Address::P2shP2wsh(a) => a.p2sh.encoded(),
        }
    }

    /// The 20-byte hash encoded in the address.
    pub fn hash160(&self) -> &[u8; 20] {
        match self {
            Address::P2pkh(a) => a.hash(),
            Address::P2sh(a) => a.hash(),
            Address::P2shP2wpkh(a) => a.p2sh.hash(),
            Address::P2shP2wsh(a) => a.p2sh.hash(),
        }
    }

    /// The network version byte.
    pub fn prefix(&self) -> u8 {
        match self {
            Address::P2pkh(a) => a.prefix(),
            Address::P2sh(a) => a.prefix(),
            Address::P2shP2wpkh(a) => a.p2sh.prefix(),
            Address::P2shP2wsh(a) => a.p2sh.prefix(),
        }
    }

    /// The locking script paying to this address.
    pub fn script_pub_key(&self) -> Script {
        match self {
            Address::P2pkh(a) => a.script_pub_key(),
            Address::P2sh(a) => a.script_pub_key(),
            Address::P2shP2wpkh(a) => a.script_pub_key(),
            Address::P2shP2wsh(a) => a.script_pub_key(),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encoded())
    }
}

impl From<P2pkhAddress> for Address {
    fn from(a: P2pkhAddress) -> Self {
        Address::P2pkh(a)
    }
}

impl From<P2shAddress> for Address {
    fn from(a: P2shAddress) -> Self {
        Address::P2sh(a)
    }
}

impl From<P2shP2wpkhAddress> for Address {
    fn from(a: P2shP2wpkhAddress) -> Self {
        Address::P2shP2wpkh(a)
    }
}

impl From<P2shP2wshAddress> for Address {
    fn from(a: P2shP2wshAddress) -> Self {
        Address::P2shP2wsh(a)
    }
}
