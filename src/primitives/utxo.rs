use num::BigUint;

use super::Input;

/// A candidate input after normalization: exact amount, carried-through metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedUtxo {
    pub input: Input,
    pub amount: BigUint,
    pub raw_tx: Option<Vec<u8>>,
    pub path: Option<String>,
}

impl NormalizedUtxo {
    pub fn new(input: Input, amount: impl Into<BigUint>) -> Self {
        Self {
            input,
            amount: amount.into(),
            raw_tx: None,
            path: None,
        }
    }
}
