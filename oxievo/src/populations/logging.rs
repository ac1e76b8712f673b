use super::Population;

use crate::genome::Genome;

use std::fmt;

/// Defines different possible reporting levels for logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportingLevel {
    /// Clones the entire population.
    AllGenomes,
    /// Clones only the population champion.
    PopulationChampion,
    /// Clones no genomes.
    NoGenomes,
}

/// A snapshot of a ranked population.
#[derive(Clone, Debug)]
pub struct Log<G> {
    pub round: usize,
    pub generation_sample: GenerationMemberRecord<G>,
    pub fitness: Stats,
}

impl<G> fmt::Display for Log<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Log {{\n\
            \tround: {}\n\
            \tfitness: {:?}\n\
            }}",
            self.round, self.fitness,
        )
    }
}

/// A struct for reporting basic statistical data.
#[derive(Clone, Debug, PartialEq)]
pub struct Stats {
    pub maximum: f64,
    pub minimum: f64,
    pub mean: f64,
    pub median: f64,
}

impl Stats {
    /// Returns statistics about numbers in a sequence.
    /// All statistics of an empty sequence are NaN.
    ///
    /// # Examples
    /// ```
    /// use oxievo::logging::Stats;
    ///
    /// let stats = Stats::from([-2.0, -1.0, 0.5, 1.0, 1.5].iter().copied());
    /// assert_eq!(stats.maximum, 1.5);
    /// assert_eq!(stats.minimum, -2.0);
    /// assert_eq!(stats.mean, 0.0);
    /// assert_eq!(stats.median, 0.5);
    ///
    /// let stats = Stats::from([4.0, 1.0, 3.0, 2.0].iter().copied());
    /// assert_eq!(stats.median, 2.5);
    /// ```
    pub fn from(data: impl Iterator<Item = f64>) -> Stats {
        let mut data: Vec<f64> = data.collect();
        if data.is_empty() {
            return Stats {
                maximum: f64::NAN,
                minimum: f64::NAN,
                mean: f64::NAN,
                median: f64::NAN,
            };
        }
        data.sort_by(f64::total_cmp);
        let mid = data.len() / 2;
        let median = if data.len() % 2 == 0 {
            (data[mid - 1] + data[mid]) / 2.0
        } else {
            data[mid]
        };
        Stats {
            maximum: data[data.len() - 1],
            minimum: data[0],
            mean: data.iter().sum::<f64>() / data.len() as f64,
            median,
        }
    }
}

/// A reporting-level dependant store
/// of genomes from a population.
#[derive(Clone, Debug)]
pub enum GenerationMemberRecord<G> {
    /// Every genome with its fitness, best first.
    AllGenomes(Vec<(G, f64)>),
    /// Only the population champion and its fitness.
    PopulationChampion(G, f64),
    /// Empty.
    None,
}

/// A log of the evolution of a population over time.
#[derive(Clone, Debug)]
pub struct EvolutionLogger<G> {
    reporting_level: ReportingLevel,
    logs: Vec<Log<G>>,
}

impl<G: Genome + Clone> EvolutionLogger<G> {
    /// Returns a logger with the appropiate reporting level.
    ///
    /// # Examples
    /// ```
    /// use oxievo::logging::{EvolutionLogger, ReportingLevel};
    /// use oxievo_ff::networks::Network;
    ///
    /// let logger = EvolutionLogger::<Network>::new(ReportingLevel::NoGenomes);
    /// assert_eq!(logger.iter().count(), 0);
    /// ```
    pub fn new(reporting_level: ReportingLevel) -> EvolutionLogger<G> {
        EvolutionLogger {
            reporting_level,
            logs: vec![],
        }
    }

    /// Store a snapshot of a population's evaluated
    /// genomes, tagged with the evaluation round.
    pub fn log<C>(&mut self, round: usize, population: &Population<C, G>)
    where
        G: Genome<Config = C>,
    {
        let evaluated = || {
            population
                .entries()
                .filter_map(|e| e.fitness().map(|f| (e.genome(), f)))
        };
        self.logs.push(Log {
            round,
            generation_sample: match self.reporting_level {
                ReportingLevel::AllGenomes => GenerationMemberRecord::AllGenomes(
                    evaluated().map(|(g, f)| (g.clone(), f)).collect(),
                ),
                ReportingLevel::PopulationChampion => match population.champion() {
                    Some(champion) => GenerationMemberRecord::PopulationChampion(
                        champion.genome().clone(),
                        champion.fitness().unwrap_or(f64::NAN),
                    ),
                    None => GenerationMemberRecord::None,
                },
                ReportingLevel::NoGenomes => GenerationMemberRecord::None,
            },
            fitness: Stats::from(evaluated().map(|(_, f)| f)),
        })
    }

    /// Iterate over all logged snapshots.
    pub fn iter(&self) -> impl Iterator<Item = &Log<G>> {
        self.logs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_genome::{Tagged, TaggedError};
    use crate::PopulationConfig;

    use rand::{rngs::StdRng, SeedableRng};

    use std::num::NonZeroUsize;

    fn population() -> Population<usize, Tagged> {
        let config = PopulationConfig {
            size: NonZeroUsize::new(3).unwrap(),
            ..PopulationConfig::zero()
        };
        let genomes = (0..3).map(|i| Tagged::with_tag(i as f64, 1)).collect();
        let mut population =
            Population::from_genomes(genomes, config, 1, &mut StdRng::seed_from_u64(0)).unwrap();
        let mut scores = [0.75, 0.25, 0.5].iter().copied();
        population
            .evaluate_fitness(|_| scores.next().ok_or(TaggedError))
            .unwrap();
        population
    }

    #[test]
    fn logs_fitness_stats() {
        let mut logger = EvolutionLogger::new(ReportingLevel::NoGenomes);
        logger.log(4, &population());
        let log = logger.iter().next().unwrap();
        assert_eq!(log.round, 4);
        assert_eq!(
            log.fitness,
            Stats {
                maximum: 0.75,
                minimum: 0.25,
                mean: 0.5,
                median: 0.5,
            }
        );
        assert!(matches!(log.generation_sample, GenerationMemberRecord::None));
    }

    #[test]
    fn records_champion() {
        let mut logger = EvolutionLogger::new(ReportingLevel::PopulationChampion);
        logger.log(0, &population());
        match &logger.iter().next().unwrap().generation_sample {
            GenerationMemberRecord::PopulationChampion(genome, fitness) => {
                assert_eq!(genome.tag(), 1.0);
                assert_eq!(*fitness, 0.25);
            }
            other => panic!("unexpected record {:?}", other),
        };
    }

    #[test]
    fn records_all_genomes() {
        let mut logger = EvolutionLogger::new(ReportingLevel::AllGenomes);
        logger.log(0, &population());
        match &logger.iter().next().unwrap().generation_sample {
            GenerationMemberRecord::AllGenomes(genomes) => {
                let tags: Vec<_> = genomes.iter().map(|(g, f)| (g.tag(), *f)).collect();
                assert_eq!(tags, vec![(0.0, 0.75), (1.0, 0.25), (2.0, 0.5)]);
            }
            other => panic!("unexpected record {:?}", other),
        };
    }

    #[test]
    fn empty_stats_are_nan() {
        let stats = Stats::from(std::iter::empty());
        assert!(stats.maximum.is_nan() && stats.median.is_nan());
    }
}
