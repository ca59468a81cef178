use std::sync::mpsc;

use lamina_nn::{ActivationFunction, Matrix, Network, TrainConfig, TrainingItem, VecTrainingSet};

fn main() -> lamina_nn::Result<()> {
    let truth_table = [
        ([0.0, 0.0], 0.0),
        ([0.0, 1.0], 1.0),
        ([1.0, 0.0], 1.0),
        ([1.0, 1.0], 0.0),
    ];

    let items = truth_table
        .iter()
        .map(|&(input, output)| {
            TrainingItem::new(
                Matrix::from_rows(vec![input.to_vec()])?,
                Matrix::from_rows(vec![vec![output]])?,
            )
        })
        .collect::<lamina_nn::Result<Vec<_>>>()?;
    let data = VecTrainingSet::new(items)?;

    let mut network = Network::new(2, &[2], 1, true, ActivationFunction::Sigmoid)?;

    let (tx, rx) = mpsc::channel();
    let config = TrainConfig::new(0.7, 10_000, 1).with_progress(tx);
    let error = network.train_with(&data, &config)?;

    for stats in rx.try_iter() {
        if stats.epoch % 1000 == 0 {
            println!("epoch {}: error = {:.6}", stats.epoch, stats.epoch_error);
        }
    }
    println!("final quadratic mean error: {error:.6}");

    for &(input, expected) in &truth_table {
        let probe = Matrix::from_rows(vec![input.to_vec()])?;
        let prediction = network.predict(&probe)?.get(0, 0);
        println!("{input:?} -> {prediction:.4} (expected {expected})");
    }

    Ok(())
}
