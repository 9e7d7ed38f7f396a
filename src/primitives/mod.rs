pub use planner_primitives::{Chain, Network, RawAmount, RawBytes, RawUtxo};

mod input;
mod output;
mod utxo;

pub use input::*;
pub use output::*;
pub use utxo::*;
