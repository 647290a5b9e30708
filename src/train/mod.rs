pub mod accuracy;
pub mod config;
pub mod epoch_stats;
pub mod trainer;

pub use accuracy::{max_index, zero_or_one, AccuracyFn};
pub use config::TrainConfig;
pub use epoch_stats::EpochStats;
pub use trainer::{evaluate, train};
