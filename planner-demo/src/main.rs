use anyhow::Context as _;
use clap::Parser as _;
use planner_primitives::RawUtxo;
use tracing::info;
use utxo_planner::{WithdrawalRequest, build_withdrawal_plan};

mod config;

fn main() -> anyhow::Result<()> {
    // a missing `.env` is fine, everything can come from the environment or flags
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let config = config::Config::parse();

    let utxos = std::fs::read_to_string(&config.utxos_path)
        .with_context(|| format!("could not read {}", config.utxos_path.display()))?;
    let utxos: Vec<RawUtxo> =
        serde_json::from_str(&utxos).context("could not parse UTXO snapshot")?;

    let request = std::fs::read_to_string(&config.request_path)
        .with_context(|| format!("could not read {}", config.request_path.display()))?;
    let mut request: WithdrawalRequest =
        serde_json::from_str(&request).context("could not parse withdrawal request")?;

    if let Some(network) = config.network {
        request.network = Some(network);
    }
    if let Some(max_inputs) = config.max_inputs {
        request.max_inputs = Some(max_inputs);
    }
    if let Some(order) = config.order {
        request.order = order;
    }

    info!(
        candidates = utxos.len(),
        chain = %request.chain,
        amount = %request.amount,
        "planning withdrawal"
    );

    let plan = build_withdrawal_plan(&utxos, &request).context("could not plan withdrawal")?;

    let json = if config.compact {
        serde_json::to_string(&plan)?
    } else {
        serde_json::to_string_pretty(&plan)?
    };
    println!("{json}");

    Ok(())
}
