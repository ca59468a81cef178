pub mod training_set;

pub use training_set::{TrainingCursor, TrainingItem, TrainingSet, TrainingShape, VecTrainingSet};
