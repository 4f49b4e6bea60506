pub mod config;
pub mod network;

pub use config::{NetworkConfig, WeightRange};
pub use network::Network;
