pub mod trainer;
pub mod epoch_stats;
pub mod train_config;
pub mod loop_fn;
pub mod eval;

pub use trainer::train_network;
pub use epoch_stats::EpochStats;
pub use train_config::{TrainConfig, TrainSettings};
pub use loop_fn::train_loop;
pub use eval::{accuracy, argmax, evaluate};
