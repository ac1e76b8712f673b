//! Mapping between a network's neurons and its flat weight vector.
//!
//! Nothing outside this module knows the order in which
//! weights are packed.
use super::{Layer, NetworkError, Topology};

use serde::{Deserialize, Serialize};

/// Order and extent of a network's flat weight vector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightLayout {
    /// Counts one bias slot for every neuron of every layer.
    /// Only the leading `weight_count - output_count` slots are
    /// ever written or read: for each non-output layer, each
    /// neuron's outgoing weights followed by its own bias.
    /// The trailing slots are accepted and ignored on decode,
    /// and zeroed on encode. Output-layer biases are never set.
    #[default]
    Compat,
    /// One slot per parameter read during propagation. For each
    /// destination layer, the outgoing weights of every neuron in
    /// the layer before it, followed by the biases of the
    /// destination layer's neurons.
    Exact,
}

/// Returns the length of the flat weight vector of a network
/// with the given topology.
///
/// # Examples
/// ```
/// use oxievo_ff::networks::{weight_count, Topology, WeightLayout};
///
/// let topology = Topology::new(vec![1, 2, 1]).unwrap();
/// // 1×2 + 2×1 connections, plus 1 + 2 + 1 biases.
/// assert_eq!(weight_count(&topology, WeightLayout::Compat), 8);
/// // 1×2 + 2×1 connections, plus 2 + 1 biases.
/// assert_eq!(weight_count(&topology, WeightLayout::Exact), 7);
/// ```
pub fn weight_count(topology: &Topology, layout: WeightLayout) -> usize {
    let biases: usize = match layout {
        WeightLayout::Compat => topology.layers().iter().sum(),
        WeightLayout::Exact => topology.layers()[1..].iter().sum(),
    };
    topology.connection_count() + biases
}

/// Returns how many leading slots of the flat weight vector
/// are actually written by [`encode`] and read by [`decode`].
pub fn encoded_len(topology: &Topology, layout: WeightLayout) -> usize {
    match layout {
        WeightLayout::Compat => weight_count(topology, layout) - topology.output_count(),
        WeightLayout::Exact => weight_count(topology, layout),
    }
}

/// Packs the layers' weights into a vector of
/// `weight_count(topology, layout)` elements.
pub(super) fn encode(layers: &[Layer], topology: &Topology, layout: WeightLayout) -> Vec<f64> {
    let total = weight_count(topology, layout);
    let mut weights = Vec::with_capacity(total);
    match layout {
        WeightLayout::Compat => {
            for layer in &layers[..layers.len() - 1] {
                for neuron in layer.neurons.iter() {
                    weights.extend_from_slice(&neuron.outgoing_weights);
                    weights.push(neuron.bias_weight);
                }
            }
        }
        WeightLayout::Exact => {
            for pair in layers.windows(2) {
                for source in pair[0].neurons.iter() {
                    weights.extend_from_slice(&source.outgoing_weights);
                }
                weights.extend(pair[1].neurons.iter().map(|n| n.bias_weight));
            }
        }
    }
    weights.resize(total, 0.0);
    weights
}

/// Writes `weights` back into the layers, in [`encode`] order.
///
/// # Errors
/// Returns [`NetworkError::WeightCountMismatch`] if `weights` is
/// not exactly `weight_count(topology, layout)` long, even though
/// the [`Compat`] layout only reads a prefix of it.
///
/// [`Compat`]: WeightLayout::Compat
pub(super) fn decode(
    layers: &mut [Layer],
    topology: &Topology,
    layout: WeightLayout,
    weights: &[f64],
) -> Result<(), NetworkError> {
    let expected = weight_count(topology, layout);
    if weights.len() != expected {
        return Err(NetworkError::WeightCountMismatch {
            expected,
            found: weights.len(),
        });
    }

    let mut index = 0;
    let mut next = || {
        let value = weights[index];
        index += 1;
        value
    };
    match layout {
        WeightLayout::Compat => {
            let last = layers.len() - 1;
            for layer in &mut layers[..last] {
                for neuron in layer.neurons.iter_mut() {
                    for weight in neuron.outgoing_weights.iter_mut() {
                        *weight = next();
                    }
                    neuron.bias_weight = next();
                }
            }
        }
        WeightLayout::Exact => {
            for destination in 1..layers.len() {
                let (before, after) = layers.split_at_mut(destination);
                for source in before[destination - 1].neurons.iter_mut() {
                    for weight in source.outgoing_weights.iter_mut() {
                        *weight = next();
                    }
                }
                for neuron in after[0].neurons.iter_mut() {
                    neuron.bias_weight = next();
                }
            }
        }
    }
    Ok(())
}
