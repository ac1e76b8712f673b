use super::logging::EvolutionLogger;
use super::Population;

use crate::dataset::Dataset;
use crate::Genome;

use rand::Rng;

use std::error::Error;

/// Phase of an [`EvolutionLoop`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    /// The population is about to be scored.
    Evaluating,
    /// The population has been scored and sorted.
    Ranked,
    /// The worst genomes are about to be replaced.
    Replacing,
    /// The final round has been ranked.
    Terminal,
}

/// Outcome of a completed [`EvolutionLoop`].
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    /// Fitness of the best genome after the final round.
    pub fitness: f64,
    /// Weights of the best genome after the final round.
    pub weights: Vec<f64>,
    /// Number of evaluation rounds run.
    pub rounds: usize,
}

/// Drives a population through repeated
/// evaluate-rank-replace rounds against a dataset.
///
/// The population is evaluated `generations + 1` times;
/// the last evaluation is not followed by a replacement.
pub struct EvolutionLoop<'d, C, G> {
    population: Population<C, G>,
    dataset: &'d Dataset,
    round: usize,
    state: LoopState,
    logger: Option<EvolutionLogger<G>>,
}

impl<'d, C, G> EvolutionLoop<'d, C, G>
where
    G: Genome<Config = C> + Clone,
{
    /// Prepares to evolve `population` against `dataset`.
    pub fn new(population: Population<C, G>, dataset: &'d Dataset) -> EvolutionLoop<'d, C, G> {
        EvolutionLoop {
            population,
            dataset,
            round: 0,
            state: LoopState::Evaluating,
            logger: None,
        }
    }

    /// Records a snapshot in `logger` after every ranking.
    pub fn with_logger(mut self, logger: EvolutionLogger<G>) -> EvolutionLoop<'d, C, G> {
        self.logger = Some(logger);
        self
    }

    /// Advances the loop by one phase and returns the new state.
    ///
    /// # Errors
    /// Returns an error if a genome can't be scored or built, or
    /// if the replacement quotas don't fit the population. The state
    /// is left unchanged on error.
    ///
    /// # Examples
    /// ```
    /// use oxievo::{Dataset, EvolutionLoop, LoopState, Population, PopulationConfig};
    /// use oxievo_ff::networks::{Network, NetworkConfig, Topology};
    /// use rand::{rngs::StdRng, SeedableRng};
    /// use std::num::NonZeroUsize;
    ///
    /// let dataset = Dataset::from_tables(vec![vec![1.0]], vec![vec![0.0]]).unwrap();
    /// let config = PopulationConfig {
    ///     size: NonZeroUsize::new(4).unwrap(),
    ///     generations: 1,
    ///     new_count: 1,
    ///     mutate_count: 1,
    ///     ..PopulationConfig::zero()
    /// };
    /// let mut rng = StdRng::seed_from_u64(0);
    /// let network_config = NetworkConfig::new(Topology::new(vec![1, 1]).unwrap());
    /// let population = Population::<_, Network>::new(config, network_config, &mut rng).unwrap();
    /// let mut evolution = EvolutionLoop::new(population, &dataset);
    ///
    /// assert_eq!(evolution.step(&mut rng).unwrap(), LoopState::Ranked);
    /// assert_eq!(evolution.step(&mut rng).unwrap(), LoopState::Replacing);
    /// assert_eq!(evolution.step(&mut rng).unwrap(), LoopState::Evaluating);
    /// assert_eq!(evolution.step(&mut rng).unwrap(), LoopState::Ranked);
    /// assert_eq!(evolution.step(&mut rng).unwrap(), LoopState::Terminal);
    /// assert_eq!(evolution.step(&mut rng).unwrap(), LoopState::Terminal);
    /// ```
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<LoopState, Box<dyn Error>> {
        self.state = match self.state {
            LoopState::Evaluating => {
                self.population.evaluate_on(self.dataset)?;
                self.population.rank()?;
                if let Some(logger) = &mut self.logger {
                    logger.log(self.round, &self.population);
                }
                LoopState::Ranked
            }
            LoopState::Ranked => {
                if self.round == self.population.config().generations {
                    LoopState::Terminal
                } else {
                    LoopState::Replacing
                }
            }
            LoopState::Replacing => {
                self.population.replace(rng)?;
                self.round += 1;
                LoopState::Evaluating
            }
            LoopState::Terminal => LoopState::Terminal,
        };
        Ok(self.state)
    }

    /// Steps the loop until it reaches [`LoopState::Terminal`],
    /// and reports the best genome.
    ///
    /// # Errors
    /// Returns the first error encountered while stepping.
    pub fn run<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<RunSummary, Box<dyn Error>> {
        while self.step(rng)? != LoopState::Terminal {}

        // A terminal population is ranked, so its first entry is the best.
        let champion = self
            .population
            .entries()
            .next()
            .ok_or("evolution finished with an empty population")?;
        Ok(RunSummary {
            fitness: champion.fitness().unwrap_or(f64::NAN),
            weights: champion.genome().weights(),
            rounds: self.round + 1,
        })
    }

    /// Returns the loop's current state.
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Returns the index of the current evaluation round.
    pub fn round(&self) -> usize {
        self.round
    }

    /// Returns the evolving population.
    pub fn population(&self) -> &Population<C, G> {
        &self.population
    }

    /// Returns the logger, if one was attached.
    pub fn logger(&self) -> Option<&EvolutionLogger<G>> {
        self.logger.as_ref()
    }

    /// Ends the loop and returns the population.
    pub fn into_population(self) -> Population<C, G> {
        self.population
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::ReportingLevel;
    use crate::test_genome::Tagged;
    use crate::PopulationConfig;

    use rand::{rngs::StdRng, SeedableRng};

    use std::num::NonZeroUsize;

    fn config(generations: usize) -> PopulationConfig {
        PopulationConfig {
            size: NonZeroUsize::new(30).unwrap(),
            generations,
            new_count: 10,
            mutate_count: 10,
            ..PopulationConfig::zero()
        }
    }

    fn dataset() -> Dataset {
        // A Tagged genome predicts its first weight, so the
        // best genomes have a first weight closest to 0.3.
        Dataset::from_tables(vec![vec![0.0], vec![1.0]], vec![vec![0.3], vec![0.3]]).unwrap()
    }

    #[test]
    fn evaluates_generations_plus_one_times() {
        let dataset = dataset();
        let mut rng = StdRng::seed_from_u64(0);
        let population = Population::<_, Tagged>::new(config(3), 2, &mut rng).unwrap();
        let mut evolution = EvolutionLoop::new(population, &dataset)
            .with_logger(EvolutionLogger::new(ReportingLevel::NoGenomes));

        let summary = evolution.run(&mut rng).unwrap();
        assert_eq!(summary.rounds, 4);
        assert_eq!(evolution.state(), LoopState::Terminal);
        assert_eq!(evolution.population().generation(), 3);
        let rounds: Vec<_> = evolution.logger().unwrap().iter().map(|l| l.round).collect();
        assert_eq!(rounds, vec![0, 1, 2, 3]);
    }

    #[test]
    fn zero_generations_is_a_single_evaluation() {
        let dataset = dataset();
        let mut rng = StdRng::seed_from_u64(1);
        let population = Population::<_, Tagged>::new(config(0), 2, &mut rng).unwrap();
        let mut evolution = EvolutionLoop::new(population, &dataset);
        let summary = evolution.run(&mut rng).unwrap();
        assert_eq!(summary.rounds, 1);
        assert_eq!(evolution.population().generation(), 0);
    }

    #[test]
    fn best_fitness_never_worsens() {
        let dataset = dataset();
        let mut rng = StdRng::seed_from_u64(2);
        let population = Population::<_, Tagged>::new(config(15), 2, &mut rng).unwrap();
        let mut evolution = EvolutionLoop::new(population, &dataset)
            .with_logger(EvolutionLogger::new(ReportingLevel::PopulationChampion));
        let summary = evolution.run(&mut rng).unwrap();

        let minima: Vec<f64> = evolution
            .logger()
            .unwrap()
            .iter()
            .map(|l| l.fitness.minimum)
            .collect();
        assert!(minima.windows(2).all(|w| w[1] <= w[0]));
        assert_eq!(summary.fitness, minima[minima.len() - 1]);
        let tag = summary.weights[0];
        assert_eq!(summary.fitness, (0.3 - tag).powi(2));
    }

    #[test]
    fn summary_matches_ranked_champion() {
        let dataset = dataset();
        let mut rng = StdRng::seed_from_u64(3);
        let population = Population::<_, Tagged>::new(config(2), 3, &mut rng).unwrap();
        let mut evolution = EvolutionLoop::new(population, &dataset);
        let summary = evolution.run(&mut rng).unwrap();
        let champion = evolution.population().champion().unwrap();
        assert_eq!(Some(summary.fitness), champion.fitness());
        assert_eq!(summary.weights, champion.genome().weights());
    }
}
