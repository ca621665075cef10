//! M-of-N multisig redeem scripts.
//!
//! The redeem script is
//! `OP_<req> <pubkey_1> ... <pubkey_n> OP_<total> OP_CHECKMULTISIG`
//! with keys in the order given. It can be paid to directly through P2SH or
//! through a P2SH-wrapped version-0 witness program.

use std::fmt;

use utxo_primitives::ec::PublicKey;
use utxo_primitives::CheckEncoding;

use crate::address::{P2shAddress, P2shP2wshAddress};
use crate::builder::ScriptBuilder;
use crate::network::Network;
use crate::opcodes::OP_CHECKMULTISIG;
use crate::script::Script;
use crate::ScriptError;

/// Largest `req` or `total` accepted.
pub const MAX_MULTISIG_KEYS: usize = 14;

/// Why an M-of-N configuration was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MultiSigReason {
    /// `req` was zero.
    ZeroRequired,
    /// `req` exceeded the number of keys.
    ExcessRequired,
    /// `req` or `total` exceeded [`MAX_MULTISIG_KEYS`].
    TooManyKeys,
}

impl fmt::Display for MultiSigReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MultiSigReason::ZeroRequired => write!(f, "at least one signature must be required"),
            MultiSigReason::ExcessRequired => {
                write!(f, "required signatures exceed the number of keys")
            }
            MultiSigReason::TooManyKeys => {
                write!(f, "at most {} keys are supported", MAX_MULTISIG_KEYS)
            }
        }
    }
}

/// A validated M-of-N key set and its redeem script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultiSigScript {
    required: usize,
    public_keys: Vec<PublicKey>,
    redeem_script: Script,
}

impl MultiSigScript {
    /// Validate the configuration and assemble the redeem script.
    ///
    /// # Arguments
    /// * `required` - Number of signatures needed to spend.
    /// * `public_keys` - Participant keys. Order is preserved.
    ///
    /// # Returns
    /// `ScriptError::MultiSigConfiguration` with the first failing check:
    /// zero required, then more required than keys, then too many keys.
    pub fn new(required: usize, public_keys: Vec<PublicKey>) -> Result<Self, ScriptError> {
        let total = public_keys.len();
        check_configuration(required, total)?;

        let mut builder = ScriptBuilder::new();
        builder.small_int(required)?;
        for key in &public_keys {
            builder.push_data(&key.to_compressed())?;
        }
        builder.small_int(total)?.opcode(OP_CHECKMULTISIG)?;

        Ok(MultiSigScript {
            required,
            public_keys,
            redeem_script: builder.build(),
        })
    }

    /// Signatures needed to spend.
    pub fn required(&self) -> usize {
        self.required
    }

    /// Number of participant keys.
    pub fn total(&self) -> usize {
        self.public_keys.len()
    }

    pub fn public_keys(&self) -> &[PublicKey] {
        &self.public_keys
    }

    pub fn redeem_script(&self) -> &Script {
        &self.redeem_script
    }

    /// P2SH address committing directly to the redeem script.
    pub fn as_p2sh<C: CheckEncoding + ?Sized>(&self, network: &Network, codec: &C) -> P2shAddress {
        P2shAddress::from_redeem_script(&self.redeem_script, network, codec)
    }

    /// P2SH address over the witness program `OP_0 PUSH(32) hash256(redeem)`.
    ///
    /// The returned address keeps both the redeem and witness scripts.
    pub fn as_segwit_wrapped<C: CheckEncoding + ?Sized>(
        &self,
        network: &Network,
        codec: &C,
    ) -> P2shP2wshAddress {
        P2shP2wshAddress::from_redeem_script(&self.redeem_script, network, codec)
    }
}

fn check_configuration(required: usize, total: usize) -> Result<(), ScriptError> {
    let reason = if required == 0 {
        MultiSigReason::ZeroRequired
    } else if required > total {
        MultiSigReason::ExcessRequired
    } else if required > MAX_MULTISIG_KEYS || total > MAX_MULTISIG_KEYS {
        MultiSigReason::TooManyKeys
    } else {
        return Ok(());
    };
    Err(ScriptError::MultiSigConfiguration(reason))
}
