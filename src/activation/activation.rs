use serde::{Deserialize, Serialize};

/// The sigmoid-family nonlinearity applied after a layer's weighted sum.
///
/// Only the logistic/tanh pair is supported: backpropagation computes the
/// activation derivative from the cached layer output via the logistic
/// identity `y * (1 - y)` (see `Layer::back_propagate`), so activations
/// outside this family would train incorrectly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivationFunction {
    Sigmoid,
    Tanh,
}

impl ActivationFunction {
    /// Element-wise activation value.
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            ActivationFunction::Tanh => x.tanh(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn sigmoid_is_centered_and_bounded() {
        let f = ActivationFunction::Sigmoid;

        assert_abs_diff_eq!(f.apply(0.0), 0.5);
        assert!(f.apply(10.0) > 0.99);
        assert!(f.apply(-10.0) < 0.01);
    }

    #[test]
    fn tanh_is_odd() {
        let f = ActivationFunction::Tanh;

        assert_abs_diff_eq!(f.apply(0.0), 0.0);
        assert_abs_diff_eq!(f.apply(1.5), -f.apply(-1.5));
        assert!(f.apply(10.0) > 0.99 && f.apply(10.0) <= 1.0);
    }
}
