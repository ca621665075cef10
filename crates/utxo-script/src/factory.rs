//! Address identification.
//!
//! `AddressFactory` turns encoded strings and locking scripts back into
//! typed addresses for one network. P2PKH is always tried before P2SH and
//! version bytes are compared as whole bytes.

use tracing::debug;
use utxo_primitives::{Base58Check, CheckEncoding};

use crate::address::{decode_payload, Address, P2pkhAddress, P2shAddress};
use crate::network::Network;
use crate::script::Script;
use crate::ScriptError;

/// Parses addresses and scripts against a network's prefixes.
#[derive(Clone, Debug)]
pub struct AddressFactory<C: CheckEncoding = Base58Check> {
    network: Network,
    codec: C,
}

impl AddressFactory<Base58Check> {
    /// Factory using the Base58Check codec.
    pub fn new(network: Network) -> Self {
        Self::with_codec(network, Base58Check)
    }
}

impl<C: CheckEncoding> AddressFactory<C> {
    /// Factory using a caller-supplied codec.
    pub fn with_codec(network: Network, codec: C) -> Self {
        AddressFactory { network, codec }
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Identify an encoded address.
    ///
    /// # Arguments
    /// * `s` - A checksummed address string.
    ///
    /// # Returns
    /// A P2PKH or P2SH address. `AddressDecode` if the string is malformed,
    /// `UnidentifiedAddress` if its prefix matches neither network constant.
    pub fn address(&self, s: &str) -> Result<Address, ScriptError> {
        let (prefix, hash) = decode_payload(s, &self.codec)?;

        let address = if prefix == self.network.p2pkh_prefix {
            Address::P2pkh(P2pkhAddress::from_parts(prefix, hash, s))
        } else if prefix == self.network.p2sh_prefix {
            Address::P2sh(P2shAddress::from_parts(prefix, hash, s))
        } else {
            debug!(network = %self.network.name, prefix, "unidentified address prefix");
            return Err(ScriptError::UnidentifiedAddress(s.to_string()));
        };

        debug!(network = %self.network.name, variant = variant_name(&address), "identified address");
        Ok(address)
    }

    /// Parse `s` strictly as a P2PKH address.
    pub fn p2pkh(&self, s: &str) -> Result<P2pkhAddress, ScriptError> {
        P2pkhAddress::from_string(s, &self.network, &self.codec)
    }

    /// Parse `s` strictly as a P2SH address.
    pub fn p2sh(&self, s: &str) -> Result<P2shAddress, ScriptError> {
        P2shAddress::from_string(s, &self.network, &self.codec)
    }

    /// Identify the address a standard locking script pays to.
    ///
    /// # Returns
    /// `UnidentifiedScriptPattern` unless the script is a P2PKH or P2SH template.
    pub fn from_script(&self, script: &Script) -> Result<Address, ScriptError> {
        let address = if let Some(hash) = script.match_p2pkh() {
            Address::P2pkh(P2pkhAddress::from_hash(&hash, &self.network, &self.codec))
        } else if let Some(hash) = script.match_p2sh() {
            Address::P2sh(P2shAddress::from_hash(&hash, &self.network, &self.codec))
        } else {
            debug!(script = %script, "unidentified script pattern");
            return Err(ScriptError::UnidentifiedScriptPattern(script.to_hex()));
        };

        debug!(network = %self.network.name, variant = variant_name(&address), "identified script");
        Ok(address)
    }
}

fn variant_name(address: &Address) -> &'static str {
    match address {
        Address::P2pkh(_) => "p2pkh",
        Address::P2sh(_) => "p2sh",
        Address::P2shP2wpkh(_) => "p2sh-p2wpkh",
        Address::P2shP2wsh(_) => "p2sh-p2wsh",
    }
}
