//! Withdrawal planning: raw registry UTXOs and a request in, a fee-correct plan out.

use num::{BigUint, Zero as _};
use serde::{Deserialize, Serialize};

use crate::address::decode_address;
use crate::primitives::{Chain, Input, Network, NormalizedUtxo, Output, RawUtxo};

pub mod coin_selection;
mod error;
pub mod fee;
mod normalize;

#[cfg(test)]
mod tests;

pub use error::*;
pub use normalize::*;

use coin_selection::{SelectionOptions, SelectionOrder, select_utxos};
use fee::FeeParams;

/// Everything decided upstream about a withdrawal: how much, where to, and under which rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalRequest {
    pub chain: Chain,
    /// When set, both addresses must belong to this network
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<Network>,
    #[serde(with = "planner_primitives::decimal")]
    pub amount: BigUint,
    pub destination: String,
    pub change_address: String,
    pub fee_params: FeeParams,
    #[serde(with = "planner_primitives::decimal")]
    pub dust_threshold: BigUint,
    #[serde(
        default,
        with = "planner_primitives::decimal_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_change: Option<BigUint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_inputs: Option<usize>,
    #[serde(default)]
    pub order: SelectionOrder,
}

impl WithdrawalRequest {
    pub fn new(
        chain: Chain,
        amount: impl Into<BigUint>,
        destination: impl Into<String>,
        change_address: impl Into<String>,
        fee_params: FeeParams,
        dust_threshold: impl Into<BigUint>,
    ) -> Self {
        Self {
            chain,
            network: None,
            amount: amount.into(),
            destination: destination.into(),
            change_address: change_address.into(),
            fee_params,
            dust_threshold: dust_threshold.into(),
            min_change: None,
            max_inputs: None,
            order: SelectionOrder::default(),
        }
    }

    pub fn network(mut self, network: Network) -> Self {
        self.network = Some(network);
        self
    }

    pub fn min_change(mut self, min_change: impl Into<BigUint>) -> Self {
        self.min_change = Some(min_change.into());
        self
    }

    pub fn max_inputs(mut self, max_inputs: usize) -> Self {
        self.max_inputs = Some(max_inputs);
        self
    }

    pub fn order(mut self, order: SelectionOrder) -> Self {
        self.order = order;
        self
    }

    pub fn selection_options(&self) -> SelectionOptions<'_> {
        SelectionOptions {
            fee_policy: &self.fee_params,
            dust_threshold: self.dust_threshold.clone(),
            min_change: self.min_change.clone(),
            max_inputs: self.max_inputs,
            order: self.order,
        }
    }

    fn script_for(&self, address: &str) -> Result<String, PlanError> {
        let invalid = |source| PlanError::InvalidAddress {
            address: address.to_string(),
            source,
        };
        let decoded = decode_address(self.chain, address).map_err(invalid)?;
        if let Some(network) = self.network {
            decoded.require_network(network).map_err(invalid)?;
        }
        Ok(decoded.script_pubkey().map_err(invalid)?.to_hex())
    }
}

/// A complete, unsigned spending plan.
///
/// Outputs are ordered: the withdrawal first, change (if any) second.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalPlan {
    pub inputs: Vec<Input>,
    pub outputs: Vec<Output>,
    #[serde(with = "planner_primitives::decimal")]
    pub fee: BigUint,
}

impl WithdrawalPlan {
    pub fn total_output(&self) -> BigUint {
        self.outputs.iter().map(|output| &output.value).sum()
    }

    pub fn change(&self) -> Option<&Output> {
        self.outputs.get(1)
    }

    /// Checks that `spent` are exactly the plan's inputs and that they pay for outputs and fee
    /// to the last base unit.
    pub fn is_balanced(&self, spent: &[NormalizedUtxo]) -> bool {
        if spent.len() != self.inputs.len()
            || spent
                .iter()
                .zip(&self.inputs)
                .any(|(utxo, input)| utxo.input != *input)
        {
            return false;
        }
        let total_input: BigUint = spent.iter().map(|utxo| &utxo.amount).sum();
        total_input == self.total_output() + &self.fee
    }
}

/// Normalizes `raw_utxos`, selects inputs and materializes the outputs.
///
/// Pure: the plan is advisory until someone signs and broadcasts it, and nothing here touches
/// the registry's spent/unspent bookkeeping.
pub fn build_withdrawal_plan(
    raw_utxos: &[RawUtxo],
    request: &WithdrawalRequest,
) -> Result<WithdrawalPlan, PlanError> {
    if raw_utxos.is_empty() {
        return Err(PlanError::NoUtxosAvailable);
    }

    let candidates = normalize_utxos(raw_utxos)?;
    let selection = select_utxos(&candidates, &request.amount, &request.selection_options())?;

    let destination = request.script_for(&request.destination)?;
    let change_script = request.script_for(&request.change_address)?;

    let mut outputs = vec![Output::new(request.amount.clone(), destination)];
    if !selection.change.is_zero() {
        outputs.push(Output::new(selection.change.clone(), change_script));
    }

    tracing::info!(
        chain = %request.chain,
        amount = %request.amount,
        inputs = selection.inputs.len(),
        outputs = outputs.len(),
        fee = %selection.fee,
        change = %selection.change,
        "built withdrawal plan"
    );

    Ok(WithdrawalPlan {
        inputs: selection
            .inputs
            .into_iter()
            .map(|utxo| utxo.input)
            .collect(),
        outputs,
        fee: selection.fee,
    })
}
