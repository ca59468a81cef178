use serde::{Serialize, Deserialize};

/// Per-epoch training statistics.
///
/// When a progress channel is configured in `TrainConfig`, the training loop
/// sends one `EpochStats` value at the end of every completed epoch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Quadratic mean error over the samples of this epoch.
    pub epoch_error: f64,
    /// Quadratic mean error over every sample of the run so far.
    pub run_error: f64,
    /// Samples consumed this epoch; whole batches only.
    pub samples: usize,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}
