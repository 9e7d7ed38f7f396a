pub mod address;
pub mod builder;
pub mod primitives;

pub use builder::{
    PlanError, WithdrawalPlan, WithdrawalRequest, build_withdrawal_plan,
    coin_selection::{SelectionOptions, SelectionOrder, SelectionResult, select_utxos},
    fee::{FeeParams, FeePolicy, LinearFee, Zip317Fee},
};
