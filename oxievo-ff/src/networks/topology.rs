use super::NetworkError;

use serde::{Deserialize, Serialize};

use std::convert::TryFrom;

/// Neuron count of each layer of a network, input layer first
/// and output layer last.
///
/// A topology always has at least two layers, none of them empty.
/// Deserialization goes through the same validation as [`Topology::new`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Topology(Box<[usize]>);

impl Topology {
    /// Validates and wraps a list of layer sizes.
    ///
    /// # Errors
    /// Returns [`NetworkError::InvalidTopology`] if there are
    /// fewer than two layers or any layer size is zero.
    ///
    /// # Examples
    /// ```
    /// use oxievo_ff::networks::Topology;
    ///
    /// let topology = Topology::new(vec![1, 2, 1]).unwrap();
    /// assert_eq!(topology.layers(), &[1, 2, 1]);
    ///
    /// assert!(Topology::new(vec![3]).is_err());
    /// assert!(Topology::new(vec![3, 0, 1]).is_err());
    /// ```
    pub fn new(layers: Vec<usize>) -> Result<Topology, NetworkError> {
        if layers.len() < 2 || layers.contains(&0) {
            return Err(NetworkError::InvalidTopology(layers));
        }
        Ok(Topology(layers.into()))
    }

    /// Returns the neuron count of every layer.
    pub fn layers(&self) -> &[usize] {
        &self.0
    }

    /// Returns the number of layers.
    pub fn layer_count(&self) -> usize {
        self.0.len()
    }

    /// Returns the size of the input layer.
    pub fn input_count(&self) -> usize {
        self.0[0]
    }

    /// Returns the size of the output layer.
    pub fn output_count(&self) -> usize {
        self.0[self.0.len() - 1]
    }

    /// Number of inter-layer connections.
    pub fn connection_count(&self) -> usize {
        self.0.windows(2).map(|pair| pair[0] * pair[1]).sum()
    }
}

impl TryFrom<Vec<usize>> for Topology {
    type Error = NetworkError;

    fn try_from(layers: Vec<usize>) -> Result<Topology, NetworkError> {
        Topology::new(layers)
    }
}

impl From<Topology> for Vec<usize> {
    fn from(topology: Topology) -> Vec<usize> {
        topology.0.into_vec()
    }
}
