use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The UTXO ledger family an address or fee rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    Bitcoin,
    Zcash,
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Chain::Bitcoin => write!(f, "bitcoin"),
            Chain::Zcash => write!(f, "zcash"),
        }
    }
}

impl FromStr for Chain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_ref() {
            "bitcoin" | "btc" => Ok(Chain::Bitcoin),
            "zcash" | "zec" => Ok(Chain::Zcash),
            s => Err(format!(
                "unknown chain {}, valid chains are: `bitcoin`, `zcash`",
                s
            )),
        }
    }
}

/// Network an address is encoded for.
///
/// Signet shares testnet's encodings, so it is not a separate variant. Regtest only differs
/// from testnet in its bech32 human-readable part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
    Regtest,
}

impl Network {
    /// Whether addresses of `self` and `other` are interchangeable on the wire.
    ///
    /// Legacy base58 versions are the same on testnet and regtest, so a base58 address decoded
    /// as testnet is accepted where regtest is expected.
    pub fn is_compatible_with(&self, other: Network) -> bool {
        match (self, other) {
            (Network::Mainnet, Network::Mainnet) => true,
            (Network::Mainnet, _) | (_, Network::Mainnet) => false,
            _ => true,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => write!(f, "mainnet"),
            Network::Testnet => write!(f, "testnet"),
            Network::Regtest => write!(f, "regtest"),
        }
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_ref() {
            "mainnet" | "main" => Ok(Network::Mainnet),
            "testnet" | "test" | "signet" => Ok(Network::Testnet),
            "regtest" => Ok(Network::Regtest),
            s => Err(format!(
                "unknown network {}, valid networks are: `mainnet`, `testnet`, `regtest`",
                s
            )),
        }
    }
}
