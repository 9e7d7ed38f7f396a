use bech32::hrp;

use super::{AddressError, AddressKind, DecodedAddress, base58, hash160_payload};
use crate::primitives::{Chain, Network};

const P2PKH_MAINNET: u8 = 0x00;
const P2SH_MAINNET: u8 = 0x05;
const P2PKH_TESTNET: u8 = 0x6f;
const P2SH_TESTNET: u8 = 0xc4;

const SEGWIT_PREFIXES: [&str; 3] = ["bc1", "tb1", "bcrt1"];

pub(super) fn decode(address: &str) -> Result<DecodedAddress, AddressError> {
    match bech32::segwit::decode(address) {
        Ok((prefix, version, program)) => {
            let network = if prefix == hrp::BC {
                Network::Mainnet
            } else if prefix == hrp::TB {
                Network::Testnet
            } else if prefix == hrp::BCRT {
                Network::Regtest
            } else {
                return Err(AddressError::UnknownHrp(prefix.to_string()));
            };
            Ok(DecodedAddress {
                chain: Chain::Bitcoin,
                network,
                kind: AddressKind::WitnessProgram {
                    version: version.to_u8(),
                    program,
                },
            })
        }
        Err(err) if looks_like_segwit(address) => Err(err.into()),
        Err(_) => decode_legacy(address),
    }
}

fn looks_like_segwit(address: &str) -> bool {
    let lower = address.to_lowercase();
    SEGWIT_PREFIXES.iter().any(|prefix| lower.starts_with(prefix))
}

fn decode_legacy(address: &str) -> Result<DecodedAddress, AddressError> {
    let payload = base58::decode_check(address)?;
    let hash = hash160_payload(&payload, 1)?;
    let (network, kind) = match payload[0] {
        P2PKH_MAINNET => (Network::Mainnet, AddressKind::PubkeyHash(hash)),
        P2SH_MAINNET => (Network::Mainnet, AddressKind::ScriptHash(hash)),
        P2PKH_TESTNET => (Network::Testnet, AddressKind::PubkeyHash(hash)),
        P2SH_TESTNET => (Network::Testnet, AddressKind::ScriptHash(hash)),
        other => return Err(AddressError::UnknownPrefix(hex::encode([other]))),
    };
    Ok(DecodedAddress {
        chain: Chain::Bitcoin,
        network,
        kind,
    })
}
