use std::error::Error;
use std::fmt;

/// An error type indicating replacement quotas
/// that don't fit the population.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplacementError {
    /// More genomes would be discarded than exist.
    KillCountExceedsPopulation { kill_count: usize, population: usize },
    /// More genomes would be cloned than survive the cull.
    IndexOutOfRange { mutate_count: usize, survivors: usize },
}

/// An error type indicating a population
/// in an unusable state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PopulationError {
    /// The entry at this position has not been evaluated.
    Unevaluated(usize),
    /// More seed genomes were given than fit the population.
    TooManySeeds { seeds: usize, size: usize },
}

impl fmt::Display for ReplacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KillCountExceedsPopulation {
                kill_count,
                population,
            } => write!(
                f,
                "replacement discards {} genomes from a population of {}",
                kill_count, population
            ),
            Self::IndexOutOfRange {
                mutate_count,
                survivors,
            } => write!(
                f,
                "replacement clones {} genomes but only {} survive",
                mutate_count, survivors
            ),
        }
    }
}

impl fmt::Display for PopulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unevaluated(index) => {
                write!(f, "attempted ranking with unevaluated genome at {}", index)
            }
            Self::TooManySeeds { seeds, size } => write!(
                f,
                "{} seed genomes given for a population of {}",
                seeds, size
            ),
        }
    }
}

impl Error for ReplacementError {}
impl Error for PopulationError {}
