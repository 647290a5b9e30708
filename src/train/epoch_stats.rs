use serde::{Deserialize, Serialize};

/// Per-epoch training statistics returned by `train`, one per completed
/// epoch. Accuracy is judged on each example's prediction BEFORE that
/// example's update is applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Fraction of examples the accuracy predicate accepted, in [0, 1].
    pub accuracy: f64,
    /// Mean per-example loss (summed over output nodes).
    pub mean_loss: f64,
}
