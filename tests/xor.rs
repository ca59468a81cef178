use std::fs::File;

use approx::assert_abs_diff_eq;
use lamina_nn::{ActivationFunction, Matrix, Network, TrainingItem, TrainingSet, VecTrainingSet};

fn xor_training_set() -> VecTrainingSet {
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
                Matrix::from_rows(vec![input.to_vec()]).unwrap(),
                Matrix::from_rows(vec![vec![output]]).unwrap(),
            )
            .unwrap()
        })
        .collect();
    VecTrainingSet::new(items).unwrap()
}

fn predicts_truth_table(network: &mut Network, data: &VecTrainingSet) -> bool {
    data.training_data().iter().all(|item| {
        let prediction = network.predict(item.input()).unwrap().get(0, 0);
        (prediction > 0.5) == (item.reference().get(0, 0) > 0.5)
    })
}

#[test]
fn learns_the_xor_truth_table() {
    let data = xor_training_set();

    // Plain backpropagation on a 2-2-1 net can stall for unlucky initial
    // weights, so accept the first converging draw.
    let converged = [3, 7, 21, 42, 99].iter().any(|&seed| {
        let mut network =
            Network::with_seed(2, &[2], 1, true, ActivationFunction::Sigmoid, seed).unwrap();
        network.train(&data, 0.7, 10_000, 1).unwrap();
        predicts_truth_table(&mut network, &data)
    });

    assert!(converged, "no weight draw learned the truth table");
}

#[test]
fn training_reports_a_bounded_quadratic_mean_error() {
    let data = xor_training_set();
    let mut network =
        Network::with_seed(2, &[4], 1, true, ActivationFunction::Sigmoid, 13).unwrap();

    let error = network.train(&data, 0.7, 10_000, 1).unwrap();

    // One sigmoid output against a 0/1 target keeps every sample's squared
    // error below 1, and the mean with it.
    assert!(error >= 0.0 && error < 1.0, "implausible mean error {error}");
}

#[test]
fn reloaded_network_predicts_like_the_saved_one() {
    let data = xor_training_set();
    let mut network =
        Network::with_seed(2, &[3], 1, true, ActivationFunction::Sigmoid, 11).unwrap();
    network.train(&data, 0.7, 500, 1).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("xor.net");
    network.save(File::create(&path).unwrap()).unwrap();
    let mut reloaded = Network::load(File::open(&path).unwrap()).unwrap();

    assert_eq!(reloaded.use_bias(), network.use_bias());
    assert_eq!(reloaded.layers().len(), network.layers().len());

    // Weights are written with six decimals, so predictions agree to within
    // text precision rather than bit-exactly.
    for item in data.training_data() {
        let before = network.predict(item.input()).unwrap().get(0, 0);
        let after = reloaded.predict(item.input()).unwrap().get(0, 0);
        assert_abs_diff_eq!(before, after, epsilon = 1e-4);
    }
}

#[test]
fn a_reloaded_network_can_keep_training() {
    let data = xor_training_set();
    let mut network =
        Network::with_seed(2, &[3], 1, true, ActivationFunction::Sigmoid, 29).unwrap();
    network.train(&data, 0.7, 200, 1).unwrap();

    let mut saved = Vec::new();
    network.save(&mut saved).unwrap();
    let mut reloaded = Network::load(saved.as_slice()).unwrap();

    assert!(reloaded.train(&data, 0.7, 200, 1).is_ok());
}
