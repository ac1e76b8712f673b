use super::ReplacementError;
use crate::mutation::CloneMutation;
use crate::Scoring;

use serde::{Deserialize, Serialize};

use std::num::NonZeroUsize;

/// Configuration data for population generation
/// and evolution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Size of the population.
    pub size: NonZeroUsize,
    /// Number of replacement rounds. The population
    /// is evaluated once more than this.
    pub generations: usize,
    /// Number of freshly randomized genomes
    /// introduced each replacement round.
    pub new_count: usize,
    /// Number of top genomes whose weights are cloned
    /// into new genomes each replacement round.
    pub mutate_count: usize,
    /// Which output channels are scored.
    #[serde(default)]
    pub scoring: Scoring,
    /// Mutation applied to cloned weights.
    /// If `None`, clones are exact copies.
    #[serde(default)]
    pub clone_mutation: Option<CloneMutation>,
}

impl PopulationConfig {
    /// Returns a "zero-valued" default configuration.
    /// All values are 0, empty, or in the case of
    /// `NonZeroUsize`s, 1.
    ///
    /// # Note
    /// This value is not suitable for use in most experiments.
    /// It is meant as a way to abbreviate configuration
    /// instantiation, or to fill in unused values.
    ///
    /// # Examples
    /// ```
    /// use oxievo::PopulationConfig;
    /// use std::num::NonZeroUsize;
    ///
    /// let cfg1 = PopulationConfig::zero();
    ///
    /// let cfg2 = PopulationConfig {
    ///     // Specify some values here...
    ///     size: NonZeroUsize::new(30).unwrap(),
    ///     new_count: 10,
    ///     mutate_count: 10,
    ///     // Default the rest...
    ///     ..PopulationConfig::zero()
    /// };
    /// ```
    pub const fn zero() -> PopulationConfig {
        PopulationConfig {
            size: match NonZeroUsize::new(1) {
                Some(size) => size,
                None => unreachable!(),
            },
            generations: 0,
            new_count: 0,
            mutate_count: 0,
            scoring: Scoring::FirstChannel,
            clone_mutation: None,
        }
    }

    /// Number of worst-ranked genomes discarded
    /// each replacement round.
    pub fn kill_count(&self) -> usize {
        self.new_count + self.mutate_count
    }

    /// Checks that replacement quotas fit the population.
    ///
    /// # Errors
    /// Returns an error if more genomes would be discarded than
    /// exist, or more would be cloned than survive.
    ///
    /// # Examples
    /// ```
    /// use oxievo::{PopulationConfig, ReplacementError};
    /// use std::num::NonZeroUsize;
    ///
    /// let config = PopulationConfig {
    ///     size: NonZeroUsize::new(10).unwrap(),
    ///     new_count: 0,
    ///     mutate_count: 6,
    ///     ..PopulationConfig::zero()
    /// };
    /// assert_eq!(
    ///     config.validate(),
    ///     Err(ReplacementError::IndexOutOfRange { mutate_count: 6, survivors: 4 })
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), ReplacementError> {
        check_quotas(self, self.size.get())
    }
}

/// Checks the replacement quotas against
/// a population of `population` genomes.
pub(super) fn check_quotas(
    config: &PopulationConfig,
    population: usize,
) -> Result<(), ReplacementError> {
    let kill_count = config.kill_count();
    if kill_count > population {
        return Err(ReplacementError::KillCountExceedsPopulation {
            kill_count,
            population,
        });
    }
    let survivors = population - kill_count;
    if config.mutate_count > survivors {
        return Err(ReplacementError::IndexOutOfRange {
            mutate_count: config.mutate_count,
            survivors,
        });
    }
    Ok(())
}
