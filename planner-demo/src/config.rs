use std::path::PathBuf;

use clap::Parser;
use planner_primitives::Network;
use utxo_planner::SelectionOrder;

/// Plans a withdrawal from a registry snapshot without touching any node.
///
/// Every option can also be given as an environment variable, or in a `.env` file in the
/// working directory.
#[derive(Parser, Debug, Clone)]
pub struct Config {
    /// JSON array of `{txid, vout, balance, rawTx?, path?}` entries
    #[arg(long, env)]
    pub utxos_path: PathBuf,

    /// JSON withdrawal request (chain, amount, addresses, fee params, thresholds)
    #[arg(long, env)]
    pub request_path: PathBuf,

    /// Overrides the request's network pin. Either `mainnet`, `testnet` or `regtest`.
    #[arg(long, env, value_parser = clap::value_parser!(Network))]
    pub network: Option<Network>,

    /// Overrides the request's maximum input count
    #[arg(long, env)]
    pub max_inputs: Option<usize>,

    /// Overrides the request's candidate ordering
    #[arg(long, env, value_parser = parse_order)]
    pub order: Option<SelectionOrder>,

    /// Print the plan on one line instead of pretty-printed
    #[arg(long)]
    pub compact: bool,
}

fn parse_order(s: &str) -> Result<SelectionOrder, String> {
    match s.to_lowercase().replace('-', "_").as_ref() {
        "as_supplied" => Ok(SelectionOrder::AsSupplied),
        "largest_first" => Ok(SelectionOrder::LargestFirst),
        "smallest_first" => Ok(SelectionOrder::SmallestFirst),
        s => Err(format!(
            "Invalid order: {}, valid orders are: `as-supplied`, `largest-first`, `smallest-first`",
            s
        )),
    }
}
