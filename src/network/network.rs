use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::activation::activation::ActivationFunction;
use crate::error::Result;
use crate::layers::dense::Layer;
use crate::math::matrix::Matrix;

/// A feed-forward network: an input layer, any number of hidden layers and
/// an output layer, chained in order.
///
/// Index 0 of the chain is the input layer. Every later layer owns the
/// weights on the connections from the layer before it, so walking the
/// vector front to back is a forward pass and back to front a backward pass.
#[derive(Debug)]
pub struct Network {
    pub(crate) layers: Vec<Layer>,
    pub(crate) use_bias: bool,
    pub(crate) activation: ActivationFunction,
    pub(crate) rng: StdRng,
}

impl Network {
    /// Builds a network with freshly drawn random weights.
    ///
    /// `topology` lists the thickness of each hidden layer from the input
    /// side; an empty slice connects the input layer straight to the output
    /// layer. With `use_bias` set, every non-input layer carries a bias term.
    pub fn new(
        nbr_inputs: usize,
        topology: &[usize],
        nbr_outputs: usize,
        use_bias: bool,
        activation: ActivationFunction,
    ) -> Result<Network> {
        Network::build(
            nbr_inputs,
            topology,
            nbr_outputs,
            use_bias,
            activation,
            StdRng::from_entropy(),
        )
    }

    /// Like [`Network::new`] but with a deterministic weight draw: two
    /// networks built from the same seed start out identical.
    pub fn with_seed(
        nbr_inputs: usize,
        topology: &[usize],
        nbr_outputs: usize,
        use_bias: bool,
        activation: ActivationFunction,
        seed: u64,
    ) -> Result<Network> {
        Network::with_rng(
            nbr_inputs,
            topology,
            nbr_outputs,
            use_bias,
            activation,
            StdRng::seed_from_u64(seed),
        )
    }

    /// Like [`Network::new`] but drawing from a caller-built random source.
    /// The network keeps the source and draws from it again when shuffling
    /// training data.
    pub fn with_rng(
        nbr_inputs: usize,
        topology: &[usize],
        nbr_outputs: usize,
        use_bias: bool,
        activation: ActivationFunction,
        rng: StdRng,
    ) -> Result<Network> {
        Network::build(nbr_inputs, topology, nbr_outputs, use_bias, activation, rng)
    }

    fn build(
        nbr_inputs: usize,
        topology: &[usize],
        nbr_outputs: usize,
        use_bias: bool,
        activation: ActivationFunction,
        mut rng: StdRng,
    ) -> Result<Network> {
        let mut layers = Vec::with_capacity(topology.len() + 2);
        layers.push(Layer::new(nbr_inputs, use_bias, activation));

        let mut predecessor_thickness = nbr_inputs;
        for &thickness in topology {
            let mut layer = Layer::new(thickness, use_bias, activation);
            layer.generate_weights(predecessor_thickness, &mut rng)?;
            layers.push(layer);
            predecessor_thickness = thickness;
        }

        let mut output_layer = Layer::new(nbr_outputs, use_bias, activation);
        output_layer.generate_weights(predecessor_thickness, &mut rng)?;
        layers.push(output_layer);

        Ok(Network {
            layers,
            use_bias,
            activation,
            rng,
        })
    }

    /// Runs `input` through the whole chain and returns the output layer's
    /// activation.
    pub fn predict(&mut self, input: &Matrix) -> Result<Matrix> {
        self.feed_forward(input)
    }

    /// The layer chain, input layer first.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Whether non-input layers carry a bias term.
    pub fn use_bias(&self) -> bool {
        self.use_bias
    }

    /// The activation function fresh layers were built with.
    pub fn activation(&self) -> ActivationFunction {
        self.activation
    }

    pub(crate) fn feed_forward(&mut self, input: &Matrix) -> Result<Matrix> {
        let mut signal = input.clone();
        for layer in &mut self.layers {
            signal = layer.feed_forward(&signal)?;
        }
        Ok(signal)
    }

    /// Distributes an output error backwards through the chain. `error` is a
    /// column vector with one row per output neuron.
    pub(crate) fn back_propagate(&mut self, error: &Matrix, learning_rate: f64) -> Result<()> {
        let mut signal = error.clone();
        for layer in self.layers.iter_mut().rev() {
            match layer.back_propagate(&signal, learning_rate)? {
                Some(propagated) => signal = propagated,
                None => break,
            }
        }
        Ok(())
    }
}
