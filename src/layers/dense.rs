use rand::rngs::StdRng;
use rand::Rng;

use crate::activation::activation::ActivationFunction;
use crate::error::{Error, Result};
use crate::math::matrix::Matrix;

/// One layer of a feed-forward network.
///
/// A layer owns the weights on its *incoming* edges: `weights` has one row
/// per predecessor neuron and one column per neuron of this layer. The input
/// layer carries no weights at all and passes signals through unchanged.
///
/// Every forward pass caches its input and output row vectors; the next
/// backward pass consumes those caches.
#[derive(Debug, Clone)]
pub struct Layer {
    thickness: usize,
    activation: ActivationFunction,
    use_bias: bool,
    weights: Option<Matrix>,
    bias: Option<Matrix>,  // 1 x thickness, present only when use_bias and weights are generated
    last_input: Option<Matrix>,
    last_output: Option<Matrix>,
}

impl Layer {
    pub(crate) fn new(thickness: usize, use_bias: bool, activation: ActivationFunction) -> Layer {
        Layer {
            thickness,
            activation,
            use_bias,
            weights: None,
            bias: None,
            last_input: None,
            last_output: None,
        }
    }

    /// Rebuilds a layer from persisted weight matrices. The thickness is
    /// taken from the row count of `weights`, which matches the predecessor
    /// rather than this layer; downstream consumers only ever read it to
    /// size the synthesized input layer, where that value is the right one.
    pub(crate) fn from_parts(weights: Matrix, bias: Option<Matrix>) -> Layer {
        Layer {
            thickness: weights.rows(),
            activation: ActivationFunction::Sigmoid,
            use_bias: bias.is_some(),
            weights: Some(weights),
            bias,
            last_input: None,
            last_output: None,
        }
    }

    /// Draws fresh connection weights (and bias weights, when enabled)
    /// uniformly from (-0.5, 0.5).
    pub(crate) fn generate_weights(
        &mut self,
        predecessor_thickness: usize,
        rng: &mut StdRng,
    ) -> Result<()> {
        self.weights = Some(Matrix::from_fn(predecessor_thickness, self.thickness, |_, _| {
            rng.gen::<f64>() - 0.5
        })?);
        if self.use_bias {
            self.bias = Some(Matrix::from_fn(1, self.thickness, |_, _| {
                rng.gen::<f64>() - 0.5
            })?);
        }
        Ok(())
    }

    /// Runs one forward step: `activation(input * weights + bias)`.
    ///
    /// A layer without weights is the input layer and returns `input`
    /// unchanged. Input and output are cached for the backward pass.
    pub(crate) fn feed_forward(&mut self, input: &Matrix) -> Result<Matrix> {
        self.last_input = Some(input.clone());
        let output = match &self.weights {
            None => input.clone(),
            Some(weights) => {
                let weighted = input.multiply(weights)?;
                let weighted = match &self.bias {
                    Some(bias) => weighted.add(bias)?,
                    None => weighted,
                };
                weighted.apply(|x| self.activation.apply(x))
            }
        };
        self.last_output = Some(output.clone());
        Ok(output)
    }

    /// Runs one backward step against `error`, a column vector with one row
    /// per neuron of this layer. Adjusts the weights (and bias weights) and
    /// returns the error for the predecessor, or `None` at the input layer.
    ///
    /// The derivative is taken from the cached output as `y * (1 - y)`, the
    /// closed form of the logistic derivative. Training therefore assumes a
    /// sigmoid forward pass whatever activation the layer is configured with.
    ///
    /// The propagated error flows through the already-updated weights.
    pub(crate) fn back_propagate(
        &mut self,
        error: &Matrix,
        learning_rate: f64,
    ) -> Result<Option<Matrix>> {
        let weights = match &self.weights {
            None => return Ok(None),
            Some(weights) => weights,
        };
        let output = self
            .last_output
            .as_ref()
            .ok_or(Error::IllegalState("backward pass requires a preceding forward pass"))?;
        let input = self
            .last_input
            .as_ref()
            .ok_or(Error::IllegalState("backward pass requires a preceding forward pass"))?;

        let derivative = output.apply(|y| y * (1.0 - y)).diagonalize()?;
        let back_error = derivative.multiply(error)?;

        let delta_weights = back_error.multiply(input)?.scale(learning_rate).transpose();
        let updated = weights.subtract(&delta_weights)?;
        let propagated = updated.multiply(&back_error)?;
        self.weights = Some(updated);

        if let Some(bias) = &self.bias {
            let delta_bias = back_error.scale(learning_rate).transpose();
            let updated_bias = bias.subtract(&delta_bias)?;
            self.bias = Some(updated_bias);
        }

        Ok(Some(propagated))
    }

    /// Number of neurons in this layer.
    pub fn thickness(&self) -> usize {
        self.thickness
    }

    /// Output of the most recent forward pass, if any.
    pub fn output(&self) -> Option<&Matrix> {
        self.last_output.as_ref()
    }

    /// Incoming connection weights. `None` for the input layer.
    pub fn weights(&self) -> Option<&Matrix> {
        self.weights.as_ref()
    }

    /// Bias weights of this layer.
    ///
    /// Fails for layers created without active bias, and for layers whose
    /// weights have not been generated yet.
    pub fn bias(&self) -> Result<&Matrix> {
        if !self.use_bias {
            return Err(Error::IllegalState("layer was not created with active bias"));
        }
        self.bias
            .as_ref()
            .ok_or(Error::IllegalState("bias weights have not been generated"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn input_layer_passes_signal_through() {
        let mut layer = Layer::new(3, true, ActivationFunction::Sigmoid);
        let signal = Matrix::from_rows(vec![vec![0.1, 0.2, 0.3]]).unwrap();

        let output = layer.feed_forward(&signal).unwrap();

        assert_eq!(output, signal);
        assert_eq!(layer.output(), Some(&signal));
    }

    #[test]
    fn generated_weights_are_centered_and_shaped() {
        let mut layer = Layer::new(4, true, ActivationFunction::Sigmoid);
        layer.generate_weights(3, &mut rng()).unwrap();

        let weights = layer.weights().unwrap();
        assert_eq!((weights.rows(), weights.cols()), (3, 4));
        for r in 0..weights.rows() {
            for c in 0..weights.cols() {
                assert!(weights.get(r, c).abs() < 0.5);
            }
        }

        let bias = layer.bias().unwrap();
        assert_eq!((bias.rows(), bias.cols()), (1, 4));
        for c in 0..bias.cols() {
            assert!(bias.get(0, c).abs() < 0.5);
        }
    }

    #[test]
    fn forward_output_is_a_row_vector_of_layer_thickness() {
        let mut layer = Layer::new(4, false, ActivationFunction::Sigmoid);
        layer.generate_weights(2, &mut rng()).unwrap();

        let output = layer
            .feed_forward(&Matrix::from_rows(vec![vec![1.0, -1.0]]).unwrap())
            .unwrap();

        assert_eq!((output.rows(), output.cols()), (1, 4));
        for c in 0..output.cols() {
            let y = output.get(0, c);
            assert!(y > 0.0 && y < 1.0, "sigmoid output out of range: {y}");
        }
    }

    #[test]
    fn bias_access_fails_without_active_bias() {
        let layer = Layer::new(2, false, ActivationFunction::Sigmoid);
        assert!(matches!(layer.bias(), Err(Error::IllegalState(_))));
    }

    #[test]
    fn backward_without_forward_is_an_illegal_state() {
        let mut layer = Layer::new(2, false, ActivationFunction::Sigmoid);
        layer.generate_weights(2, &mut rng()).unwrap();

        let error = Matrix::from_rows(vec![vec![0.1], vec![0.2]]).unwrap();
        assert!(matches!(
            layer.back_propagate(&error, 0.5),
            Err(Error::IllegalState(_))
        ));
    }

    #[test]
    fn backward_stops_at_the_input_layer() {
        let mut layer = Layer::new(2, false, ActivationFunction::Sigmoid);
        let signal = Matrix::from_rows(vec![vec![0.4, 0.6]]).unwrap();
        layer.feed_forward(&signal).unwrap();

        let error = Matrix::from_rows(vec![vec![0.1], vec![0.2]]).unwrap();
        assert_eq!(layer.back_propagate(&error, 0.5).unwrap(), None);
    }

    #[test]
    fn backward_updates_weights_by_the_logistic_rule() {
        let weights = Matrix::from_rows(vec![vec![2.0]]).unwrap();
        let mut layer = Layer::from_parts(weights, None);

        let input = Matrix::from_rows(vec![vec![0.5]]).unwrap();
        let output = layer.feed_forward(&input).unwrap();
        let y = output.get(0, 0);
        assert_abs_diff_eq!(y, 1.0 / (1.0 + (-1.0f64).exp()), epsilon = 1e-12);

        let error = Matrix::from_rows(vec![vec![0.2]]).unwrap();
        let propagated = layer.back_propagate(&error, 1.0).unwrap().unwrap();

        let back_error = y * (1.0 - y) * 0.2;
        let expected_weight = 2.0 - back_error * 0.5;
        assert_abs_diff_eq!(
            layer.weights().unwrap().get(0, 0),
            expected_weight,
            epsilon = 1e-12
        );
        // The propagated error already sees the adjusted weight.
        assert_abs_diff_eq!(
            propagated.get(0, 0),
            expected_weight * back_error,
            epsilon = 1e-12
        );
    }

    #[test]
    fn backward_adjusts_bias_weights() {
        let weights = Matrix::from_rows(vec![vec![2.0]]).unwrap();
        let bias = Matrix::from_rows(vec![vec![0.5]]).unwrap();
        let mut layer = Layer::from_parts(weights, Some(bias));

        let input = Matrix::from_rows(vec![vec![0.5]]).unwrap();
        let output = layer.feed_forward(&input).unwrap();
        let y = output.get(0, 0);
        assert_abs_diff_eq!(y, 1.0 / (1.0 + (-1.5f64).exp()), epsilon = 1e-12);

        let error = Matrix::from_rows(vec![vec![0.2]]).unwrap();
        layer.back_propagate(&error, 1.0).unwrap().unwrap();

        let back_error = y * (1.0 - y) * 0.2;
        assert_abs_diff_eq!(
            layer.bias().unwrap().get(0, 0),
            0.5 - back_error,
            epsilon = 1e-12
        );
    }
}
