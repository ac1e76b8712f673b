//! Minimal genomes for exercising populations without a network.
use crate::Genome;

use rand::Rng;

use std::error::Error;
use std::fmt;

#[derive(Debug, PartialEq)]
pub(crate) struct TaggedError;

impl fmt::Display for TaggedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tagged genome error")
    }
}

impl Error for TaggedError {}

/// A genome whose first weight identifies it, and
/// which predicts that weight for every input.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Tagged {
    weights: Vec<f64>,
}

impl Tagged {
    pub(crate) fn with_tag(tag: f64, weight_count: usize) -> Tagged {
        let mut weights = vec![0.0; weight_count];
        weights[0] = tag;
        Tagged { weights }
    }

    pub(crate) fn tag(&self) -> f64 {
        self.weights[0]
    }
}

impl Genome for Tagged {
    /// Weight count.
    type Config = usize;
    type Error = TaggedError;

    fn new<R: Rng + ?Sized>(config: &usize, rng: &mut R) -> Result<Tagged, TaggedError> {
        Ok(Tagged {
            weights: (0..*config).map(|_| rng.gen::<f64>()).collect(),
        })
    }

    fn from_weights(config: &usize, weights: &[f64]) -> Result<Tagged, TaggedError> {
        if weights.len() != *config {
            return Err(TaggedError);
        }
        Ok(Tagged {
            weights: weights.to_vec(),
        })
    }

    fn weights(&self) -> Vec<f64> {
        self.weights.clone()
    }

    fn predict(&mut self, _input: &[f64]) -> Result<Vec<f64>, TaggedError> {
        Ok(vec![self.weights[0]])
    }
}

/// A genome that predicts its input.
#[derive(Clone, Debug)]
pub(crate) struct Echo;

impl Genome for Echo {
    type Config = ();
    type Error = TaggedError;

    fn new<R: Rng + ?Sized>(_config: &(), _rng: &mut R) -> Result<Echo, TaggedError> {
        Ok(Echo)
    }

    fn from_weights(_config: &(), _weights: &[f64]) -> Result<Echo, TaggedError> {
        Ok(Echo)
    }

    fn weights(&self) -> Vec<f64> {
        vec![]
    }

    fn predict(&mut self, input: &[f64]) -> Result<Vec<f64>, TaggedError> {
        Ok(input.to_vec())
    }
}
