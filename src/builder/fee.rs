use std::cmp::max;

use num::BigUint;
use serde::{Deserialize, Serialize};

use crate::primitives::Chain;

/// Fee market rule: the fee owed by a transaction with the given input and output counts.
///
/// Implementations must be deterministic and non-decreasing in both arguments; coin selection
/// relies on adding an input or output never making a transaction cheaper.
pub trait FeePolicy {
    fn fee(&self, inputs: usize, outputs: usize) -> BigUint;
}

impl<F> FeePolicy for F
where
    F: Fn(usize, usize) -> BigUint,
{
    fn fee(&self, inputs: usize, outputs: usize) -> BigUint {
        self(inputs, outputs)
    }
}

/// Byte-proportional fee: `rate * (base + inputs * per_input + outputs * per_output)`.
///
/// The size coefficients are in (virtual) bytes and `rate` in base units per byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearFee {
    pub rate: u64,
    pub base: u64,
    pub per_input: u64,
    pub per_output: u64,
}

impl LinearFee {
    pub fn new(rate: u64, base: u64, per_input: u64, per_output: u64) -> Self {
        Self {
            rate,
            base,
            per_input,
            per_output,
        }
    }

    /// Native segwit v0 spends and outputs, sizes in vbytes (10.5 byte overhead rounded up).
    pub fn p2wpkh(rate: u64) -> Self {
        Self::new(rate, 11, 68, 31)
    }

    /// Legacy spends and outputs with compressed keys.
    pub fn p2pkh(rate: u64) -> Self {
        Self::new(rate, 10, 148, 34)
    }

    pub fn size(&self, inputs: usize, outputs: usize) -> BigUint {
        BigUint::from(self.base)
            + BigUint::from(inputs) * self.per_input
            + BigUint::from(outputs) * self.per_output
    }
}

impl FeePolicy for LinearFee {
    fn fee(&self, inputs: usize, outputs: usize) -> BigUint {
        self.size(inputs, outputs) * self.rate
    }
}

/// ZIP-317 conventional fee for transparent transactions.
///
/// `marginal_fee * max(grace_actions, max(inputs, outputs))`. Nodes refuse to relay
/// transactions paying less, so the constants default to the values fixed by the ZIP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Zip317Fee {
    pub marginal_fee: u64,
    pub grace_actions: u64,
}

impl Zip317Fee {
    pub const MARGINAL_FEE: u64 = 5_000;
    pub const GRACE_ACTIONS: u64 = 2;

    /// Logical actions are the larger of the two counts, not their sum.
    pub fn logical_actions(&self, inputs: usize, outputs: usize) -> u64 {
        max(self.grace_actions, max(inputs, outputs) as u64)
    }
}

impl Default for Zip317Fee {
    fn default() -> Self {
        Self {
            marginal_fee: Self::MARGINAL_FEE,
            grace_actions: Self::GRACE_ACTIONS,
        }
    }
}

impl FeePolicy for Zip317Fee {
    fn fee(&self, inputs: usize, outputs: usize) -> BigUint {
        BigUint::from(self.marginal_fee) * self.logical_actions(inputs, outputs)
    }
}

/// Fee policy as it appears in a withdrawal request.
///
/// ```json
/// {"kind": "linear", "rate": 2, "base": 11, "per_input": 68, "per_output": 31}
/// {"kind": "zip317"}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FeeParams {
    Linear(LinearFee),
    Zip317(Zip317Fee),
}

impl FeeParams {
    /// The usual rule for `chain`: a 1 sat/vB segwit estimate for Bitcoin, ZIP-317 for Zcash.
    pub fn default_for(chain: Chain) -> Self {
        match chain {
            Chain::Bitcoin => FeeParams::Linear(LinearFee::p2wpkh(1)),
            Chain::Zcash => FeeParams::Zip317(Zip317Fee::default()),
        }
    }
}

impl FeePolicy for FeeParams {
    fn fee(&self, inputs: usize, outputs: usize) -> BigUint {
        match self {
            FeeParams::Linear(linear) => linear.fee(inputs, outputs),
            FeeParams::Zip317(zip317) => zip317.fee(inputs, outputs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fee(policy: &dyn FeePolicy, inputs: usize, outputs: usize) -> u64 {
        policy.fee(inputs, outputs).try_into().unwrap()
    }

    #[test]
    fn linear_fee() {
        let policy = LinearFee::new(1, 10, 68, 31);
        assert_eq!(fee(&policy, 1, 1), 109);
        assert_eq!(fee(&policy, 2, 2), 208);
        assert_eq!(fee(&LinearFee::new(2, 10, 68, 31), 2, 2), 416);
        assert_eq!(fee(&LinearFee::new(2, 10, 68, 31), 1, 1), 218);
    }

    #[test]
    fn zip317_fee() {
        let policy = Zip317Fee::default();
        assert_eq!(fee(&policy, 1, 1), 10_000);
        assert_eq!(fee(&policy, 3, 1), 15_000);
        assert_eq!(fee(&policy, 1, 3), 15_000);
        assert_eq!(fee(&policy, 0, 0), 10_000);
    }

    #[test]
    fn fees_are_monotonic() {
        let policies: [&dyn FeePolicy; 3] = [
            &LinearFee::new(3, 10, 68, 31),
            &LinearFee::p2pkh(1),
            &Zip317Fee::default(),
        ];
        for policy in policies {
            for inputs in 0..12 {
                for outputs in 0..12 {
                    let here = policy.fee(inputs, outputs);
                    assert!(policy.fee(inputs + 1, outputs) >= here);
                    assert!(policy.fee(inputs, outputs + 1) >= here);
                }
            }
        }
    }

    #[test]
    fn closures_are_policies() {
        let flat = |_: usize, _: usize| BigUint::from(1_000u32);
        assert_eq!(fee(&flat, 5, 2), 1_000);
    }

    #[test]
    fn params_from_json() {
        let linear: FeeParams = serde_json::from_str(
            r#"{"kind": "linear", "rate": 2, "base": 10, "per_input": 68, "per_output": 31}"#,
        )
        .unwrap();
        assert_eq!(fee(&linear, 1, 1), 218);

        let zip317: FeeParams = serde_json::from_str(r#"{"kind": "zip317"}"#).unwrap();
        assert_eq!(zip317, FeeParams::Zip317(Zip317Fee::default()));
        assert_eq!(fee(&zip317, 3, 1), 15_000);
    }
}
