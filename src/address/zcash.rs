use super::{AddressError, AddressKind, DecodedAddress, base58, hash160_payload};
use crate::primitives::{Chain, Network};

#[derive(Clone, Copy)]
enum Transparent {
    PubkeyHash,
    ScriptHash,
}

/// Two-byte Base58Check version prefixes of transparent addresses.
const PREFIXES: [([u8; 2], Network, Transparent); 4] = [
    ([0x1c, 0xb8], Network::Mainnet, Transparent::PubkeyHash), // t1
    ([0x1c, 0xbd], Network::Mainnet, Transparent::ScriptHash), // t3
    ([0x1d, 0x25], Network::Testnet, Transparent::PubkeyHash), // tm
    ([0x1c, 0xba], Network::Testnet, Transparent::ScriptHash), // t2
];

pub(super) fn decode(address: &str) -> Result<DecodedAddress, AddressError> {
    let payload = base58::decode_check(address)?;
    let hash = hash160_payload(&payload, 2)?;

    let (network, kind) = PREFIXES
        .iter()
        .find(|(prefix, ..)| payload.starts_with(prefix))
        .map(|(_, network, kind)| (*network, *kind))
        .ok_or_else(|| AddressError::UnknownPrefix(hex::encode(&payload[..2])))?;

    let kind = match kind {
        Transparent::PubkeyHash => AddressKind::PubkeyHash(hash),
        Transparent::ScriptHash => AddressKind::ScriptHash(hash),
    };
    Ok(DecodedAddress {
        chain: Chain::Zcash,
        network,
        kind,
    })
}
