use std::fmt;
use std::ops::RangeInclusive;

use super::AddressError;

pub const OP_0: u8 = 0x00;
pub const OP_PUSHNUM_1: u8 = 0x51;
pub const OP_DUP: u8 = 0x76;
pub const OP_EQUAL: u8 = 0x87;
pub const OP_EQUALVERIFY: u8 = 0x88;
pub const OP_HASH160: u8 = 0xa9;
pub const OP_CHECKSIG: u8 = 0xac;

/// Witness versions `OP_0` and `OP_1..OP_16` can express.
const MAX_WITNESS_VERSION: u8 = 16;
/// Witness program sizes allowed by BIP-141.
const WITNESS_PROGRAM_LEN: RangeInclusive<usize> = 2..=40;

/// A locking script (`scriptPubKey`) in the standard templates this crate emits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Script(Vec<u8>);

impl Script {
    /// `OP_DUP OP_HASH160 <20B> OP_EQUALVERIFY OP_CHECKSIG`
    pub fn p2pkh(pubkey_hash: &[u8; 20]) -> Self {
        let mut bytes = Vec::with_capacity(25);
        bytes.extend([OP_DUP, OP_HASH160]);
        push_slice(&mut bytes, pubkey_hash);
        bytes.extend([OP_EQUALVERIFY, OP_CHECKSIG]);
        Self(bytes)
    }

    /// `OP_HASH160 <20B> OP_EQUAL`
    pub fn p2sh(script_hash: &[u8; 20]) -> Self {
        let mut bytes = Vec::with_capacity(23);
        bytes.push(OP_HASH160);
        push_slice(&mut bytes, script_hash);
        bytes.push(OP_EQUAL);
        Self(bytes)
    }

    /// `<OP_n> <program>`, where `OP_n` is `OP_0` for version 0 and `OP_1..OP_16` after.
    pub fn witness_program(version: u8, program: &[u8]) -> Result<Self, AddressError> {
        if version > MAX_WITNESS_VERSION || !WITNESS_PROGRAM_LEN.contains(&program.len()) {
            return Err(AddressError::WitnessProgram {
                version,
                len: program.len(),
            });
        }
        let mut bytes = Vec::with_capacity(2 + program.len());
        bytes.push(match version {
            0 => OP_0,
            v => OP_PUSHNUM_1 + (v - 1),
        });
        push_slice(&mut bytes, program);
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl AsRef<[u8]> for Script {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Direct push, only used for payloads of at most 75 bytes.
fn push_slice(bytes: &mut Vec<u8>, data: &[u8]) {
    bytes.push(data.len() as u8);
    bytes.extend_from_slice(data);
}
