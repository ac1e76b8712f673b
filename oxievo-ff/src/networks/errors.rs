use std::error::Error;
use std::fmt;

/// An error type indicating a malformed network
/// or a malformed request made of one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NetworkError {
    /// The topology has fewer than two layers,
    /// or some layer has no neurons.
    InvalidTopology(Vec<usize>),
    /// The supplied flat weight vector does not
    /// have the network's weight count.
    WeightCountMismatch { expected: usize, found: usize },
    /// The supplied input does not match the
    /// size of the network's input layer.
    InputSizeMismatch { expected: usize, found: usize },
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTopology(layers) => write!(
                f,
                "invalid topology {:?}: at least two layers of at least one neuron are required",
                layers
            ),
            Self::WeightCountMismatch { expected, found } => write!(
                f,
                "number of supplied weights ({}) does not match number of weights in network ({})",
                found, expected
            ),
            Self::InputSizeMismatch { expected, found } => write!(
                f,
                "given input size ({}) does not match network input size ({})",
                found, expected
            ),
        }
    }
}

impl Error for NetworkError {}
