//! Network version constants.
//!
//! Address prefixes come from a `Network` value passed to every address
//! constructor. The two presets cover mainnet and testnet; other networks
//! can be loaded from JSON.

use serde::{Deserialize, Serialize};

use crate::ScriptError;

/// Version constants for one chain.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Network {
    /// Human-readable name, e.g. "mainnet".
    pub name: String,
    /// Version byte of P2PKH addresses.
    pub p2pkh_prefix: u8,
    /// Version byte of P2SH addresses (including segwit-wrapped ones).
    pub p2sh_prefix: u8,
    /// BIP32 extended public key version.
    pub bip32_public_prefix: u32,
    /// BIP32 extended private key version.
    pub bip32_private_prefix: u32,
    /// Version byte of WIF-encoded private keys.
    pub wif_prefix: u8,
}

impl Network {
    /// Main network constants.
    pub fn mainnet() -> Self {
        Network {
            name: "mainnet".to_string(),
            p2pkh_prefix: 0x00,
            p2sh_prefix: 0x05,
            bip32_public_prefix: 0x0488_b21e,
            bip32_private_prefix: 0x0488_ade4,
            wif_prefix: 0x80,
        }
    }

    /// Test network constants.
    pub fn testnet() -> Self {
        Network {
            name: "testnet".to_string(),
            p2pkh_prefix: 0x6f,
            p2sh_prefix: 0xc4,
            bip32_public_prefix: 0x0435_87cf,
            bip32_private_prefix: 0x0435_8394,
            wif_prefix: 0xef,
        }
    }

    /// Parse and validate a network from JSON.
    ///
    /// # Arguments
    /// * `json` - An object with the same field names as this struct.
    ///
    /// # Returns
    /// The network, or `ScriptError::InvalidNetwork` if the JSON is malformed
    /// or the prefixes are inconsistent.
    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        let network: Network =
            serde_json::from_str(json).map_err(|e| ScriptError::InvalidNetwork(e.to_string()))?;
        network.validate()?;
        Ok(network)
    }

    /// Serialize the network to JSON.
    pub fn to_json(&self) -> Result<String, ScriptError> {
        serde_json::to_string(self).map_err(|e| ScriptError::InvalidNetwork(e.to_string()))
    }

    /// Check that address prefixes can be told apart.
    pub fn validate(&self) -> Result<(), ScriptError> {
        if self.p2pkh_prefix == self.p2sh_prefix {
            return Err(ScriptError::InvalidNetwork(format!(
                "{}: P2PKH and P2SH prefixes are both 0x{:02x}",
                self.name, self.p2pkh_prefix
            )));
        }
        Ok(())
    }
}

impl Default for Network {
    fn default() -> Self {
        Self::mainnet()
    }
}
