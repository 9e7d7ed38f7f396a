use std::cmp::max;

use num::{BigUint, Zero as _};
use serde::{Deserialize, Serialize};

use super::PlanError;
use super::fee::FeePolicy;
use crate::primitives::NormalizedUtxo;

/// Order in which candidates are offered to the selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionOrder {
    /// Keep the caller's order
    #[default]
    AsSupplied,
    /// Fewest inputs, cheapest transaction
    LargestFirst,
    /// Sweeps small outputs, consolidating the custodied set
    SmallestFirst,
}

pub struct SelectionOptions<'a> {
    pub fee_policy: &'a dyn FeePolicy,
    pub dust_threshold: BigUint,
    pub min_change: Option<BigUint>,
    pub max_inputs: Option<usize>,
    pub order: SelectionOrder,
}

impl<'a> SelectionOptions<'a> {
    pub fn new(fee_policy: &'a dyn FeePolicy, dust_threshold: impl Into<BigUint>) -> Self {
        Self {
            fee_policy,
            dust_threshold: dust_threshold.into(),
            min_change: None,
            max_inputs: None,
            order: SelectionOrder::default(),
        }
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

    /// Smallest change worth an output of its own.
    pub fn change_floor(&self) -> BigUint {
        match &self.min_change {
            Some(min_change) => max(&self.dust_threshold, min_change).clone(),
            None => self.dust_threshold.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionResult {
    /// Chosen inputs, in selection order
    pub inputs: Vec<NormalizedUtxo>,
    pub total_input: BigUint,
    /// Fee the transaction actually pays. Includes `absorbed` when change was dropped.
    pub fee: BigUint,
    /// Zero when the remainder was absorbed into the fee
    pub change: BigUint,
    /// Part of `fee` above what the fee policy asks for
    pub absorbed: BigUint,
    /// 1 (payment only) or 2 (payment and change)
    pub outputs: usize,
}

impl SelectionResult {
    pub fn has_change(&self) -> bool {
        !self.change.is_zero()
    }
}

/// Greedy, single pass coin selection.
///
/// 1. Order candidates as configured
/// 2. Take one at a time until `total >= target + fee(n, 2)`, assuming a change output
/// 3. If the change left over is under the floor, drop it and let the fee absorb it
///
/// This is deliberately not an optimal search; the same candidates, target and options always
/// produce the same selection.
pub fn select_utxos(
    candidates: &[NormalizedUtxo],
    target: &BigUint,
    options: &SelectionOptions<'_>,
) -> Result<SelectionResult, PlanError> {
    if target.is_zero() {
        return Err(PlanError::InvalidAmount);
    }

    let mut ordered = candidates.iter().collect::<Vec<_>>();
    // stable sorts, ties keep the supplied order
    match options.order {
        SelectionOrder::AsSupplied => {}
        SelectionOrder::LargestFirst => ordered.sort_by(|a, b| b.amount.cmp(&a.amount)),
        SelectionOrder::SmallestFirst => ordered.sort_by(|a, b| a.amount.cmp(&b.amount)),
    }

    let mut selected: Vec<NormalizedUtxo> = vec![];
    let mut total_input = BigUint::zero();
    for utxo in ordered {
        if let Some(max_inputs) = options.max_inputs
            && selected.len() >= max_inputs
        {
            tracing::debug!(
                max_inputs,
                %total_input,
                "input limit reached before covering withdrawal"
            );
            return Err(PlanError::InputLimitExceeded { max_inputs });
        }

        total_input += &utxo.amount;
        selected.push(utxo.clone());

        let fee = options.fee_policy.fee(selected.len(), 2);
        let required = target + &fee;
        tracing::debug!(
            input = %utxo.input,
            amount = %utxo.amount,
            %total_input,
            %required,
            "selected input"
        );
        if total_input >= required {
            return Ok(settle_change(selected, total_input, target, fee, options));
        }
    }

    let required = target + options.fee_policy.fee(max(selected.len(), 1), 2);
    Err(PlanError::InsufficientFunds {
        required,
        available: total_input,
    })
}

/// Decides between a change output and absorbing the remainder into the fee.
///
/// Expects `total_input >= target + fee_with_change`.
fn settle_change(
    inputs: Vec<NormalizedUtxo>,
    total_input: BigUint,
    target: &BigUint,
    fee_with_change: BigUint,
    options: &SelectionOptions<'_>,
) -> SelectionResult {
    let change = &total_input - target - &fee_with_change;
    let floor = options.change_floor();
    // a zero-valued change output is never worth emitting, even with a zero floor
    if !change.is_zero() && change >= floor {
        return SelectionResult {
            inputs,
            total_input,
            fee: fee_with_change,
            change,
            absorbed: BigUint::zero(),
            outputs: 2,
        };
    }

    // one output less, so the policy fee can only go down and the difference is absorbed
    let fee_without_change = options.fee_policy.fee(inputs.len(), 1);
    let fee = &total_input - target;
    let absorbed = if fee >= fee_without_change {
        &fee - &fee_without_change
    } else {
        BigUint::zero()
    };
    tracing::warn!(
        %change,
        %floor,
        %absorbed,
        "change below floor, remainder absorbed into fee"
    );
    SelectionResult {
        inputs,
        total_input,
        fee,
        change: BigUint::zero(),
        absorbed,
        outputs: 1,
    }
}
