//! UTXO SDK - Script assembly, addresses and multisig.
//!
//! Provides the immutable `Script` type, the opcode assembler, script chunk
//! decoding, the address hierarchy with its factory, network constants and
//! M-of-N redeem scripts.

pub mod script;
pub mod opcodes;
pub mod chunk;
pub mod builder;
pub mod network;
pub mod address;
pub mod factory;
pub mod multisig;

mod error;
pub use error::ScriptError;
pub use script::Script;
pub use chunk::ScriptChunk;
pub use builder::{ScriptBuilder, Token};
pub use network::Network;
pub use address::{Address, P2pkhAddress, P2shAddress, P2shP2wpkhAddress, P2shP2wshAddress};
pub use factory::AddressFactory;
pub use multisig::{MultiSigReason, MultiSigScript, MAX_MULTISIG_KEYS};
