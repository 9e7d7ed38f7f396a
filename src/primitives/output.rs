use num::BigUint;
use serde::{Deserialize, Serialize};

/// A planned transaction output: value plus the locking script as hex.
#[derive(PartialEq, Eq, Debug, Clone, Serialize, Deserialize)]
pub struct Output {
    #[serde(with = "planner_primitives::decimal")]
    pub value: BigUint,
    #[serde(rename = "scriptPubkeyHex", alias = "script_pubkey")]
    pub script_pubkey: String,
}

impl Output {
    pub fn new(value: BigUint, script_pubkey: String) -> Self {
        Self {
            value,
            script_pubkey,
        }
    }
}
