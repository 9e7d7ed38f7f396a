use std::fmt;

use serde::{Deserialize, Serialize};

/// Reference to a previous transaction output, the only part of a UTXO a plan needs to carry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Input {
    /// Transaction id in the usual big-endian display hex, lowercase.
    pub txid: String,
    pub vout: u32,
}

impl Input {
    pub fn new(txid: impl Into<String>, vout: u32) -> Self {
        Self {
            txid: txid.into(),
            vout,
        }
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.txid, self.vout)
    }
}
