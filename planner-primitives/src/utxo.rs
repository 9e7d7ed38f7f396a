use serde::{Deserialize, Serialize};

use crate::RawAmount;

/// An unspent output as listed by the custodian's registry, before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawUtxo {
    pub txid: String,
    pub vout: u32,
    pub balance: RawAmount,
    /// Full serialized funding transaction, needed by some signers for legacy inputs.
    #[serde(default, alias = "rawTx", skip_serializing_if = "Option::is_none")]
    pub raw_tx: Option<RawBytes>,
    /// HD derivation path of the key controlling this output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl RawUtxo {
    pub fn new(txid: impl Into<String>, vout: u32, balance: impl Into<RawAmount>) -> Self {
        Self {
            txid: txid.into(),
            vout,
            balance: balance.into(),
            raw_tx: None,
            path: None,
        }
    }

    pub fn with_raw_tx(mut self, raw_tx: RawBytes) -> Self {
        self.raw_tx = Some(raw_tx);
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// Opaque bytes that may arrive hex-encoded or as a plain array of octets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawBytes {
    Hex(String),
    Bytes(Vec<u8>),
}

impl RawBytes {
    pub fn to_bytes(&self) -> Result<Vec<u8>, hex::FromHexError> {
        match self {
            RawBytes::Hex(s) => hex::decode(s.trim_start_matches("0x")),
            RawBytes::Bytes(b) => Ok(b.clone()),
        }
    }
}
