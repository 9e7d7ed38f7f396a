use num::BigUint;
use serde_json::json;

use super::fee::{FeeParams, LinearFee, Zip317Fee};
use super::{PlanError, WithdrawalRequest, build_withdrawal_plan, normalize_utxos};
use crate::address::AddressError;
use crate::builder::coin_selection::SelectionOrder;
use crate::primitives::{Chain, Network, RawUtxo};

const DESTINATION: &str = "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4";
const DESTINATION_SCRIPT: &str = "0014751e76e8199196d454941c45d1b3a323f1433bd6";
const CHANGE: &str = "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa";
const CHANGE_SCRIPT: &str = "76a91462e907b15cbf27d5425399ebf6f0fb50ebb88f1888ac";

fn txid(n: u8) -> String {
    hex::encode([n; 32])
}

fn raw_utxos(amounts: &[u64]) -> Vec<RawUtxo> {
    amounts
        .iter()
        .enumerate()
        .map(|(i, amount)| RawUtxo::new(txid(i as u8 + 1), i as u32, *amount))
        .collect()
}

fn bitcoin_request(amount: u64) -> WithdrawalRequest {
    WithdrawalRequest::new(
        Chain::Bitcoin,
        amount,
        DESTINATION,
        CHANGE,
        FeeParams::Linear(LinearFee::new(1, 10, 68, 31)),
        546u64,
    )
    .min_change(1_000u64)
}

#[test]
fn plan_with_change_output() {
    let plan = build_withdrawal_plan(&raw_utxos(&[70_000]), &bitcoin_request(60_000)).unwrap();

    assert_eq!(plan.inputs.len(), 1);
    assert_eq!(plan.inputs[0].txid, txid(1));
    assert_eq!(plan.fee, BigUint::from(140u32));

    // destination first, change second
    assert_eq!(plan.outputs.len(), 2);
    assert_eq!(plan.outputs[0].value, BigUint::from(60_000u32));
    assert_eq!(plan.outputs[0].script_pubkey, DESTINATION_SCRIPT);
    assert_eq!(plan.outputs[1].value, BigUint::from(9_860u32));
    assert_eq!(plan.outputs[1].script_pubkey, CHANGE_SCRIPT);
    assert_eq!(plan.change().unwrap().script_pubkey, CHANGE_SCRIPT);

    let spent = normalize_utxos(&raw_utxos(&[70_000])).unwrap();
    assert!(plan.is_balanced(&spent));
}

#[test]
fn dust_change_is_folded_into_fee() {
    let request = WithdrawalRequest {
        dust_threshold: BigUint::from(1_000u32),
        ..bitcoin_request(60_000)
    };
    let plan = build_withdrawal_plan(&raw_utxos(&[61_000]), &request).unwrap();

    assert_eq!(plan.outputs.len(), 1);
    assert_eq!(plan.outputs[0].script_pubkey, DESTINATION_SCRIPT);
    assert!(plan.change().is_none());
    assert_eq!(plan.fee, BigUint::from(1_000u32));
    assert_eq!(
        plan.total_output() + &plan.fee,
        BigUint::from(61_000u32)
    );
}

#[test]
fn empty_candidates() {
    assert!(matches!(
        build_withdrawal_plan(&[], &bitcoin_request(1)),
        Err(PlanError::NoUtxosAvailable)
    ));
}

#[test]
fn selector_failures_propagate() {
    assert!(matches!(
        build_withdrawal_plan(&raw_utxos(&[20_000]), &bitcoin_request(50_000)),
        Err(PlanError::InsufficientFunds { .. })
    ));
    assert!(matches!(
        build_withdrawal_plan(
            &raw_utxos(&[30_000, 30_000]),
            &bitcoin_request(50_000).max_inputs(1)
        ),
        Err(PlanError::InputLimitExceeded { max_inputs: 1 })
    ));
}

#[test]
fn bad_addresses_fail_the_whole_plan() {
    let request = WithdrawalRequest {
        destination: "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t5".into(),
        ..bitcoin_request(60_000)
    };
    assert!(matches!(
        build_withdrawal_plan(&raw_utxos(&[70_000]), &request),
        Err(PlanError::InvalidAddress {
            source: AddressError::Segwit(_),
            ..
        })
    ));

    // change address is checked even when no change output is produced
    let request = WithdrawalRequest {
        change_address: "not-an-address".into(),
        dust_threshold: BigUint::from(1_000u32),
        ..bitcoin_request(60_000)
    };
    assert!(matches!(
        build_withdrawal_plan(&raw_utxos(&[61_000]), &request),
        Err(PlanError::InvalidAddress { .. })
    ));
}

#[test]
fn pinned_network_rejects_foreign_addresses() {
    let request = bitcoin_request(60_000).network(Network::Testnet);
    assert!(matches!(
        build_withdrawal_plan(&raw_utxos(&[70_000]), &request),
        Err(PlanError::InvalidAddress {
            source: AddressError::NetworkMismatch {
                expected: Network::Testnet,
                found: Network::Mainnet
            },
            ..
        })
    ));

    let request = bitcoin_request(60_000).network(Network::Mainnet);
    assert!(build_withdrawal_plan(&raw_utxos(&[70_000]), &request).is_ok());
}

#[test]
fn zcash_plan_uses_zip317() {
    let request = WithdrawalRequest::new(
        Chain::Zcash,
        100_000u64,
        "t3TacJtYxbdNdMWmYQuwP1mYHjxPuXkQNLp",
        "t1StbPM4X3j4FGM57HpGnb9BMbS7C1nFW1r",
        FeeParams::Zip317(Zip317Fee::default()),
        5_000u64,
    )
    .network(Network::Mainnet)
    .order(SelectionOrder::LargestFirst);

    let plan = build_withdrawal_plan(&raw_utxos(&[40_000, 40_000, 90_000]), &request).unwrap();

    // 90_000 + 40_000 covers 100_000 + 5000 * max(2, 2)
    assert_eq!(plan.inputs.len(), 2);
    assert_eq!(plan.inputs[0].txid, txid(3));
    assert_eq!(plan.fee, BigUint::from(10_000u32));
    assert_eq!(
        plan.outputs[0].script_pubkey,
        "a91462e907b15cbf27d5425399ebf6f0fb50ebb88f1887"
    );
    assert_eq!(plan.outputs[1].value, BigUint::from(20_000u32));
    assert_eq!(
        plan.outputs[1].script_pubkey,
        "76a91462e907b15cbf27d5425399ebf6f0fb50ebb88f1888ac"
    );
}

#[test]
fn loosely_typed_registry_snapshot() {
    let raw: Vec<RawUtxo> = serde_json::from_value(json!([
        {"txid": txid(1), "vout": 0, "balance": "25000", "path": "m/84'/0'/0'/0/0"},
        {"txid": txid(2), "vout": 1, "balance": 50000, "rawTx": "0100"},
    ]))
    .unwrap();

    let plan = build_withdrawal_plan(&raw, &bitcoin_request(60_000)).unwrap();
    assert_eq!(plan.inputs.len(), 2);
    assert_eq!(plan.fee, BigUint::from(208u32));
    assert_eq!(plan.outputs[1].value, BigUint::from(14_792u32));

    let floating: Vec<RawUtxo> = serde_json::from_value(json!([
        {"txid": txid(1), "vout": 0, "balance": 25000.5},
    ]))
    .unwrap();
    assert!(matches!(
        build_withdrawal_plan(&floating, &bitcoin_request(1_000)),
        Err(PlanError::InvalidUtxo { .. })
    ));
}

#[test]
fn request_and_plan_json() {
    let request: WithdrawalRequest = serde_json::from_value(json!({
        "chain": "bitcoin",
        "amount": "60000",
        "destination": DESTINATION,
        "change_address": CHANGE,
        "fee_params": {"kind": "linear", "rate": 1, "base": 10, "per_input": 68, "per_output": 31},
        "dust_threshold": 546,
        "min_change": "1000",
    }))
    .unwrap();
    assert_eq!(request, bitcoin_request(60_000));

    let plan = build_withdrawal_plan(&raw_utxos(&[70_000]), &request).unwrap();
    assert_eq!(
        serde_json::to_value(&plan).unwrap(),
        json!({
            "inputs": [{"txid": txid(1), "vout": 0}],
            "outputs": [
                {"value": "60000", "scriptPubkeyHex": DESTINATION_SCRIPT},
                {"value": "9860", "scriptPubkeyHex": CHANGE_SCRIPT},
            ],
            "fee": "140",
        })
    );
}

#[test]
fn planning_is_deterministic() {
    let utxos = raw_utxos(&[5_000, 17_000, 3_000, 41_000, 9_999]);
    let request = bitcoin_request(50_000).order(SelectionOrder::SmallestFirst);
    let first = build_withdrawal_plan(&utxos, &request).unwrap();
    for _ in 0..10 {
        assert_eq!(build_withdrawal_plan(&utxos, &request).unwrap(), first);
    }
}
