use rand::Rng;

/// An interface for models that can be evolved by a [`Population`].
///
/// Every genome built from the same configuration must accept the
/// flat weight vector of any other, so that a survivor's weights
/// can be copied into a freshly built genome.
///
/// [`Population`]: crate::Population
pub trait Genome: Sized {
    type Config;
    type Error: std::error::Error + 'static;

    /// Returns a randomized genome.
    fn new<R: Rng + ?Sized>(config: &Self::Config, rng: &mut R) -> Result<Self, Self::Error>;

    /// Returns a genome built from `config`
    /// and carrying the passed weights.
    fn from_weights(config: &Self::Config, weights: &[f64]) -> Result<Self, Self::Error>;

    /// Returns the genome's flat weight vector.
    fn weights(&self) -> Vec<f64>;

    /// Returns the genome's output for the passed input.
    fn predict(&mut self, input: &[f64]) -> Result<Vec<f64>, Self::Error>;
}
