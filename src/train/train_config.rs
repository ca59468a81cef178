use std::sync::mpsc;

use crate::error::{Error, Result};
use crate::train::epoch_stats::EpochStats;

/// Configuration for a training run.
///
/// # Fields
/// - `learning_rate`: step size for every weight adjustment; suitable values
///   lie in `(0, 1]`
/// - `epochs`: number of full passes over the training data
/// - `batches`: how many batches each epoch's shuffled data is segmented
///   into; samples that do not fill a whole batch are skipped for that epoch
/// - `progress_tx`: optional channel sender; one `EpochStats` is sent per
///   completed epoch, and a dropped receiver is ignored
pub struct TrainConfig {
    pub learning_rate: f64,
    pub epochs: usize,
    pub batches: usize,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
}

impl TrainConfig {
    /// Creates a config with no progress channel.
    pub fn new(learning_rate: f64, epochs: usize, batches: usize) -> TrainConfig {
        TrainConfig {
            learning_rate,
            epochs,
            batches,
            progress_tx: None,
        }
    }

    /// Attaches a progress channel.
    pub fn with_progress(mut self, progress_tx: mpsc::Sender<EpochStats>) -> TrainConfig {
        self.progress_tx = Some(progress_tx);
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(Error::IllegalState("learning rate must be positive and finite"));
        }
        if self.epochs == 0 {
            return Err(Error::IllegalState("epochs must be at least 1"));
        }
        if self.batches == 0 {
            return Err(Error::IllegalState("batches must be at least 1"));
        }
        Ok(())
    }
}
