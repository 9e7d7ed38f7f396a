//! Address decoding: human-readable address in, locking script out.
//!
//! Bitcoin accepts segwit (bech32/bech32m) and legacy Base58Check addresses. Zcash accepts
//! transparent Base58Check addresses only; they share Bitcoin's script model so both chains
//! end up in the same P2PKH/P2SH templates.

use crate::primitives::{Chain, Network};

mod base58;
mod bitcoin;
mod script;
mod zcash;

pub use script::*;

#[derive(Debug, thiserror::Error)]
pub enum AddressError {
    #[error("invalid base58 encoding: {0}")]
    Base58(#[from] bs58::decode::Error),
    #[error("invalid segwit address: {0}")]
    Segwit(#[from] bech32::segwit::DecodeError),
    #[error("base58check checksum mismatch")]
    Checksum,
    #[error("unexpected payload length {actual}, expected {expected}")]
    Length { expected: usize, actual: usize },
    #[error("unrecognized version prefix 0x{0}")]
    UnknownPrefix(String),
    #[error("unrecognized segwit human-readable part {0:?}")]
    UnknownHrp(String),
    #[error("unsupported witness program: version {version}, {len} bytes")]
    WitnessProgram { version: u8, len: usize },
    #[error("address is for {found}, expected {expected}")]
    NetworkMismatch { expected: Network, found: Network },
}

/// What a decoded address commits to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressKind {
    PubkeyHash([u8; 20]),
    ScriptHash([u8; 20]),
    WitnessProgram { version: u8, program: Vec<u8> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedAddress {
    pub chain: Chain,
    pub network: Network,
    pub kind: AddressKind,
}

impl DecodedAddress {
    pub fn script_pubkey(&self) -> Result<Script, AddressError> {
        match &self.kind {
            AddressKind::PubkeyHash(hash) => Ok(Script::p2pkh(hash)),
            AddressKind::ScriptHash(hash) => Ok(Script::p2sh(hash)),
            AddressKind::WitnessProgram { version, program } => {
                Script::witness_program(*version, program)
            }
        }
    }

    /// Fails unless the address can be paid on `expected`.
    pub fn require_network(&self, expected: Network) -> Result<(), AddressError> {
        if self.network.is_compatible_with(expected) {
            Ok(())
        } else {
            Err(AddressError::NetworkMismatch {
                expected,
                found: self.network,
            })
        }
    }
}

pub fn decode_address(chain: Chain, address: &str) -> Result<DecodedAddress, AddressError> {
    let address = address.trim();
    match chain {
        Chain::Bitcoin => bitcoin::decode(address),
        Chain::Zcash => zcash::decode(address),
    }
}

/// Converts `address` into the hex encoding of its locking script.
pub fn address_to_script(chain: Chain, address: &str) -> Result<String, AddressError> {
    Ok(decode_address(chain, address)?.script_pubkey()?.to_hex())
}

/// Copies a 20-byte hash out of a versioned payload, checking the total length first.
fn hash160_payload(payload: &[u8], prefix_len: usize) -> Result<[u8; 20], AddressError> {
    let expected = prefix_len + 20;
    if payload.len() != expected {
        return Err(AddressError::Length {
            expected,
            actual: payload.len(),
        });
    }
    let mut hash = [0u8; 20];
    hash.copy_from_slice(&payload[prefix_len..]);
    Ok(hash)
}
