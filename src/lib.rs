pub mod math;
pub mod activation;
pub mod data;
pub mod error;
pub mod layers;
pub mod network;
pub mod train;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use data::training_set::{TrainingCursor, TrainingItem, TrainingSet, TrainingShape, VecTrainingSet};
pub use error::{Error, Result};
pub use layers::dense::Layer;
pub use network::network::Network;
pub use train::epoch_stats::EpochStats;
pub use train::train_config::TrainConfig;
