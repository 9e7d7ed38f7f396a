use std::collections::HashSet;

use super::{PlanError, UtxoError};
use crate::primitives::{Input, NormalizedUtxo, RawUtxo};

/// Resolves registry entries into exact, strictly typed candidates.
///
/// Order is preserved. Fails on the first entry that cannot be represented exactly, and on an
/// outpoint listed twice, which would otherwise be counted (and spent) twice.
pub fn normalize_utxos(raw: &[RawUtxo]) -> Result<Vec<NormalizedUtxo>, PlanError> {
    let mut seen = HashSet::with_capacity(raw.len());
    raw.iter()
        .map(|utxo| {
            let normalized = normalize_utxo(utxo)?;
            if !seen.insert(normalized.input.clone()) {
                return Err(invalid(utxo, UtxoError::Duplicate));
            }
            Ok(normalized)
        })
        .collect()
}

pub fn normalize_utxo(raw: &RawUtxo) -> Result<NormalizedUtxo, PlanError> {
    let txid = raw.txid.trim();
    if txid.len() != 64 || !txid.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid(raw, UtxoError::MalformedTxid));
    }

    let amount = raw
        .balance
        .to_biguint()
        .map_err(|err| invalid(raw, err.into()))?;
    let raw_tx = raw
        .raw_tx
        .as_ref()
        .map(|bytes| bytes.to_bytes())
        .transpose()
        .map_err(|err| invalid(raw, err.into()))?;

    Ok(NormalizedUtxo {
        input: Input::new(txid.to_lowercase(), raw.vout),
        amount,
        raw_tx,
        path: raw.path.clone(),
    })
}

fn invalid(raw: &RawUtxo, source: UtxoError) -> PlanError {
    PlanError::InvalidUtxo {
        outpoint: format!("{}:{}", raw.txid, raw.vout),
        source,
    }
}
