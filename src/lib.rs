pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod train;
pub mod data;
pub mod error;

// Convenience re-exports
pub use activation::{sigmoid, sigmoid_derivative};
pub use layers::{Layer, LayerKind, Unit};
pub use network::{Network, NetworkConfig, WeightRange};
pub use loss::mse::MseLoss;
pub use train::{train_loop, train_network, EpochStats, TrainConfig, TrainSettings};
pub use data::{Sample, xor_samples};
pub use error::{DataError, NetworkError};
