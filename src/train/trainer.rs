use std::time::Instant;

use rand::seq::SliceRandom;
use tracing::debug;

use crate::data::training_set::TrainingSet;
use crate::error::Result;
use crate::network::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;

impl Network {
    /// Trains the network on `data` and returns the quadratic mean error
    /// over every sample consumed during the run.
    ///
    /// Each epoch shuffles the full sample collection, segments it into
    /// `batches` equally sized batches (samples that do not fill a whole
    /// batch are skipped for that epoch) and backpropagates each remaining
    /// sample with `learning_rate`.
    pub fn train<S>(
        &mut self,
        data: &S,
        learning_rate: f64,
        epochs: usize,
        batches: usize,
    ) -> Result<f64>
    where
        S: TrainingSet + ?Sized,
    {
        self.train_with(data, &TrainConfig::new(learning_rate, epochs, batches))
    }

    /// Like [`Network::train`], with progress reporting per `config`.
    pub fn train_with<S>(&mut self, data: &S, config: &TrainConfig) -> Result<f64>
    where
        S: TrainingSet + ?Sized,
    {
        config.validate()?;

        let mut run_error = 0.0;
        let mut run_sample: u64 = 1;

        for epoch in 1..=config.epochs {
            let started = Instant::now();

            let mut items = data.training_data();
            items.shuffle(&mut self.rng);

            let batch_size = items.len() / config.batches;
            let consumed = batch_size * config.batches;

            let mut epoch_error = 0.0;
            let mut epoch_sample: u64 = 1;

            if batch_size > 0 {
                for batch in items[..consumed].chunks(batch_size) {
                    for item in batch {
                        let output = self.feed_forward(item.input())?;
                        let error = output.subtract(item.reference())?;
                        let error_transpose = error.transpose();

                        let quad = error.multiply(&error_transpose)?.get(0, 0);
                        run_error += (quad - run_error) / run_sample as f64;
                        run_sample += 1;
                        epoch_error += (quad - epoch_error) / epoch_sample as f64;
                        epoch_sample += 1;

                        self.back_propagate(&error_transpose, config.learning_rate)?;
                    }
                }
            }

            let stats = EpochStats {
                epoch,
                total_epochs: config.epochs,
                epoch_error,
                run_error,
                samples: consumed,
                elapsed_ms: started.elapsed().as_millis() as u64,
            };
            debug!(
                "epoch {}/{}: error {:.6} over {} samples in {} ms",
                stats.epoch, stats.total_epochs, stats.epoch_error, stats.samples, stats.elapsed_ms
            );
            if let Some(ref tx) = config.progress_tx {
                // A dropped receiver never interrupts training.
                let _ = tx.send(stats);
            }
        }

        Ok(run_error)
    }
}
