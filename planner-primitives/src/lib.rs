mod amount;
mod network;
mod utxo;

pub use amount::*;
pub use network::*;
pub use utxo::*;
