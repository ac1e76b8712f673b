//! A Network is a fixed-topology, fully-connected feedforward
//! neural network. Its layers, neurons and weights are laid out
//! by position: a neuron's identity is its index within its layer,
//! and every neuron stores the weights of its connections *to*
//! the next layer, indexed by destination neuron.
//!
//! All of a network's tunable parameters can be read and written
//! as a single flat vector, whose order is given by a [`WeightLayout`].
mod codec;
mod config;
mod errors;
mod topology;

pub use codec::{encoded_len, weight_count, WeightLayout};
pub use config::NetworkConfig;
pub use errors::NetworkError;
pub use topology::Topology;

use oxievo::Genome;
use rand::Rng;

/// Constant input fed through every neuron's bias weight.
pub const BIAS_INPUT: f64 = 1.0;

/// The logistic function, `1 / (1 + e^-x)`.
///
/// # Examples
/// ```
/// use oxievo_ff::networks::sigmoid;
///
/// assert_eq!(sigmoid(0.0), 0.5);
/// ```
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

#[derive(Clone, Debug, Default)]
struct Neuron {
    bias_weight: f64,
    /// Weights of the connections to each neuron of the
    /// next layer. Empty for output neurons.
    outgoing_weights: Box<[f64]>,
    /// Output of the neuron during the last forward pass.
    activation: f64,
}

#[derive(Clone, Debug)]
struct Layer {
    neurons: Box<[Neuron]>,
}

impl Layer {
    fn new(size: usize, next_layer_size: usize) -> Layer {
        Layer {
            neurons: (0..size)
                .map(|_| Neuron {
                    outgoing_weights: vec![0.0; next_layer_size].into(),
                    ..Neuron::default()
                })
                .collect(),
        }
    }
}

/// A layered feedforward neural network
/// with sigmoid activations.
#[derive(Clone, Debug)]
pub struct Network {
    topology: Topology,
    layout: WeightLayout,
    layers: Box<[Layer]>,
}

impl Network {
    /// Builds a network with the given topology,
    /// the [`Compat`] weight layout, and all weights 0.
    ///
    /// [`Compat`]: WeightLayout::Compat
    ///
    /// # Examples
    /// ```
    /// use oxievo_ff::networks::{Network, Topology};
    ///
    /// let network = Network::new(Topology::new(vec![1, 2, 1]).unwrap());
    /// assert_eq!(network.weight_count(), 8);
    /// assert!(network.weights().iter().all(|w| *w == 0.0));
    /// ```
    pub fn new(topology: Topology) -> Network {
        Network::with_layout(topology, WeightLayout::Compat)
    }

    /// Builds a network with the given topology and weight layout,
    /// and all weights 0.
    pub fn with_layout(topology: Topology, layout: WeightLayout) -> Network {
        let sizes = topology.layers();
        let layers = sizes
            .iter()
            .enumerate()
            .map(|(i, size)| Layer::new(*size, sizes.get(i + 1).copied().unwrap_or(0)))
            .collect();
        Network {
            topology,
            layout,
            layers,
        }
    }

    /// Builds a network and writes `weights` into it.
    ///
    /// # Errors
    /// Returns [`NetworkError::WeightCountMismatch`] if `weights`
    /// doesn't have the network's [weight count].
    ///
    /// [weight count]: Network::weight_count
    pub fn with_weights(
        topology: Topology,
        layout: WeightLayout,
        weights: &[f64],
    ) -> Result<Network, NetworkError> {
        let mut network = Network::with_layout(topology, layout);
        network.set_weights(weights)?;
        Ok(network)
    }

    /// Builds a network as specified by `config`, with
    /// weights drawn uniformly from `[0, 1)`.
    ///
    /// # Examples
    /// ```
    /// use oxievo_ff::networks::{Network, NetworkConfig, Topology};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let config = NetworkConfig::new(Topology::new(vec![2, 3, 1]).unwrap());
    /// let a = Network::random(&config, &mut StdRng::seed_from_u64(3));
    /// let b = Network::random(&config, &mut StdRng::seed_from_u64(3));
    /// assert_eq!(a.weights(), b.weights());
    /// ```
    pub fn random<R: Rng + ?Sized>(config: &NetworkConfig, rng: &mut R) -> Network {
        let mut network = Network::with_layout(config.topology.clone(), config.layout);
        network.set_random_weights(rng);
        network
    }

    /// Returns the network's topology.
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Returns the network's flat weight layout.
    pub fn layout(&self) -> WeightLayout {
        self.layout
    }

    /// Returns the length of the network's flat weight vector.
    pub fn weight_count(&self) -> usize {
        weight_count(&self.topology, self.layout)
    }

    /// Overwrites the network's weights from a flat vector.
    ///
    /// # Errors
    /// Returns [`NetworkError::WeightCountMismatch`] if `weights`
    /// doesn't have the network's [weight count]. Slots past the
    /// [encoded length] are checked for but otherwise ignored.
    ///
    /// [weight count]: Network::weight_count
    /// [encoded length]: encoded_len
    ///
    /// # Examples
    /// ```
    /// use oxievo_ff::networks::{Network, NetworkError, Topology};
    ///
    /// let mut network = Network::new(Topology::new(vec![2, 1]).unwrap());
    /// assert_eq!(
    ///     network.set_weights(&[1.0, 2.0]),
    ///     Err(NetworkError::WeightCountMismatch { expected: 5, found: 2 })
    /// );
    /// assert!(network.set_weights(&[1.0, 2.0, 3.0, 4.0, 5.0]).is_ok());
    /// ```
    pub fn set_weights(&mut self, weights: &[f64]) -> Result<(), NetworkError> {
        codec::decode(&mut self.layers, &self.topology, self.layout, weights)
    }

    /// Returns the network's weights as a flat vector.
    /// Slots past the [encoded length] are 0.
    ///
    /// [encoded length]: encoded_len
    pub fn weights(&self) -> Vec<f64> {
        codec::encode(&self.layers, &self.topology, self.layout)
    }

    /// Overwrites the network's weights with
    /// values drawn uniformly from `[0, 1)`.
    pub fn set_random_weights<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let weights: Vec<f64> = (0..self.weight_count()).map(|_| rng.gen::<f64>()).collect();
        // The length always matches the network's own weight count.
        let _ = self.set_weights(&weights);
    }

    /// Runs a forward pass and returns the
    /// activation of each output neuron.
    ///
    /// # Errors
    /// Returns [`NetworkError::InputSizeMismatch`] if `input`
    /// doesn't match the size of the input layer.
    ///
    /// # Examples
    /// ```
    /// use oxievo_ff::networks::{sigmoid, Network, Topology, WeightLayout};
    ///
    /// // Two inputs connected to one output, with a bias.
    /// let mut network = Network::with_weights(
    ///     Topology::new(vec![2, 1]).unwrap(),
    ///     WeightLayout::Exact,
    ///     &[0.5, -0.25, 0.125],
    /// )
    /// .unwrap();
    ///
    /// let output = network.calculate_output(&[1.0, 1.0]).unwrap();
    /// assert_eq!(output, vec![sigmoid(0.5 - 0.25 + 0.125)]);
    /// ```
    pub fn calculate_output(&mut self, input: &[f64]) -> Result<Vec<f64>, NetworkError> {
        self.set_inputs(input)?;
        self.propagate(BIAS_INPUT);
        Ok(self.outputs())
    }

    /// Sets the activations of the input layer.
    /// Input neurons pass their input through unchanged.
    fn set_inputs(&mut self, input: &[f64]) -> Result<(), NetworkError> {
        let input_neurons = &mut self.layers[0].neurons;
        if input_neurons.len() != input.len() {
            return Err(NetworkError::InputSizeMismatch {
                expected: input_neurons.len(),
                found: input.len(),
            });
        }
        for (neuron, value) in input_neurons.iter_mut().zip(input) {
            neuron.activation = *value;
        }
        Ok(())
    }

    /// Computes the activations of every non-input layer in order.
    ///
    /// Neuron `j`'s input from neuron `k` of the previous layer is
    /// weighted by `k.outgoing_weights[j]`.
    fn propagate(&mut self, bias_input: f64) {
        for layer in 1..self.layers.len() {
            let (before, after) = self.layers.split_at_mut(layer);
            let previous = &before[layer - 1];
            for (j, neuron) in after[0].neurons.iter_mut().enumerate() {
                let sum = previous
                    .neurons
                    .iter()
                    .fold(neuron.bias_weight * bias_input, |sum, p| {
                        sum + p.activation * p.outgoing_weights[j]
                    });
                neuron.activation = sigmoid(sum);
            }
        }
    }

    /// Returns the activations of the output layer.
    fn outputs(&self) -> Vec<f64> {
        self.layers[self.layers.len() - 1]
            .neurons
            .iter()
            .map(|n| n.activation)
            .collect()
    }
}

impl Genome for Network {
    type Config = NetworkConfig;
    type Error = NetworkError;

    fn new<R: Rng + ?Sized>(config: &NetworkConfig, rng: &mut R) -> Result<Network, NetworkError> {
        Ok(Network::random(config, rng))
    }

    fn from_weights(config: &NetworkConfig, weights: &[f64]) -> Result<Network, NetworkError> {
        Network::with_weights(config.topology.clone(), config.layout, weights)
    }

    fn weights(&self) -> Vec<f64> {
        Network::weights(self)
    }

    fn predict(&mut self, input: &[f64]) -> Result<Vec<f64>, NetworkError> {
        self.calculate_output(input)
    }
}
