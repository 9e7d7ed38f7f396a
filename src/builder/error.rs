use num::BigUint;
use planner_primitives::AmountError;

use crate::address::AddressError;

#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// Destination or change address could not be turned into a locking script
    #[error("invalid address {address:?}: {source}")]
    InvalidAddress {
        address: String,
        #[source]
        source: AddressError,
    },
    /// No bounded subset of the candidates covers amount plus fee
    #[error("insufficient funds: {required} required, candidates hold {available}")]
    InsufficientFunds {
        required: BigUint,
        available: BigUint,
    },
    /// Covering the amount needs more inputs than allowed
    #[error("covering the amount requires more than {max_inputs} inputs")]
    InputLimitExceeded { max_inputs: usize },
    #[error("no UTXOs available to fund the withdrawal")]
    NoUtxosAvailable,
    /// A registry entry could not be normalized
    #[error("invalid UTXO {outpoint}: {source}")]
    InvalidUtxo {
        outpoint: String,
        #[source]
        source: UtxoError,
    },
    #[error("withdrawal amount must be greater than zero")]
    InvalidAmount,
}

#[derive(Debug, thiserror::Error)]
pub enum UtxoError {
    #[error("bad balance: {0}")]
    Balance(#[from] AmountError),
    #[error("txid must be 32 bytes of hex")]
    MalformedTxid,
    #[error("raw transaction bytes are not valid hex: {0}")]
    RawTx(#[from] hex::FromHexError),
    #[error("outpoint listed more than once")]
    Duplicate,
}
