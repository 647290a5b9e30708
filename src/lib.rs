pub mod activation;
pub mod error;
pub mod loss;
pub mod math;
pub mod network;
pub mod train;

// Convenience re-exports
pub use activation::Activation;
pub use error::{NetworkError, Result};
pub use loss::Loss;
pub use network::{Network, SavedModel, Topology};
pub use train::{evaluate, max_index, train, zero_or_one, AccuracyFn, EpochStats, TrainConfig};
