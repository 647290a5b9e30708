/// Configuration for a `train` run.
///
/// # Fields
/// - `epochs`        — full passes over the training data
/// - `learning_rate` — scale of every gradient-descent step
/// - `shuffle`       — permute the example order with a fresh random
///                     permutation each epoch; when `false` the natural
///                     dataset order is used every epoch
/// - `verbose`       — print per-epoch accuracy and mean loss
#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub epochs: usize,
    pub learning_rate: f64,
    pub shuffle: bool,
    pub verbose: bool,
}

impl TrainConfig {
    /// Creates a quiet, unshuffled config.
    pub fn new(epochs: usize, learning_rate: f64) -> Self {
        TrainConfig {
            epochs,
            learning_rate,
            shuffle: false,
            verbose: false,
        }
    }
}
