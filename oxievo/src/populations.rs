//! A Population is a collection of genomes paired with
//! their fitness (mean squared error, lower is better).
//! Each generation the worst performers are discarded, the
//! best have their weights copied into new genomes, and the
//! rest of the population is refilled with random genomes.
mod config;
mod errors;
mod evolution;
pub mod logging;

use crate::dataset::{mean_squared_error, Dataset, EvaluationError};
use crate::Genome;
pub use config::PopulationConfig;
pub use errors::{PopulationError, ReplacementError};
pub use evolution::{EvolutionLoop, LoopState, RunSummary};

use rand::Rng;

use std::cmp::Ordering;
use std::error::Error;

/// A genome and its most recently computed fitness.
#[derive(Clone, Debug)]
pub struct Entry<G> {
    genome: G,
    fitness: Option<f64>,
}

impl<G> Entry<G> {
    fn new(genome: G) -> Entry<G> {
        Entry {
            genome,
            fitness: None,
        }
    }

    /// Returns the entry's genome.
    pub fn genome(&self) -> &G {
        &self.genome
    }

    /// Returns the entry's fitness, or `None`
    /// if it hasn't been evaluated yet.
    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }
}

/// A population of genomes.
#[derive(Clone, Debug)]
pub struct Population<C, G> {
    entries: Vec<Entry<G>>,
    generation: usize,
    population_config: PopulationConfig,
    genetic_config: C,
}

impl<C, G> Population<C, G>
where
    G: Genome<Config = C>,
{
    /// Creates a new population of randomized genomes
    /// using the passed configurations.
    ///
    /// The type of `genetic_config` depends on the implementation
    /// of [`Genome`], and is effectively opaque to the population.
    ///
    /// # Errors
    /// Returns an error if the configured replacement quotas don't
    /// fit the population, or if a genome can't be generated.
    ///
    /// # Examples
    /// ```
    /// use oxievo::{Population, PopulationConfig};
    /// use oxievo_ff::networks::{Network, NetworkConfig, Topology};
    /// use rand::{rngs::StdRng, SeedableRng};
    /// use std::num::NonZeroUsize;
    ///
    /// let pop_config = PopulationConfig {
    ///     size: NonZeroUsize::new(30).unwrap(),
    ///     new_count: 10,
    ///     mutate_count: 10,
    ///     ..PopulationConfig::zero()
    /// };
    /// let genetic_config = NetworkConfig::new(Topology::new(vec![1, 2, 1]).unwrap());
    ///
    /// let mut rng = StdRng::seed_from_u64(0);
    /// let population = Population::<_, Network>::new(pop_config, genetic_config, &mut rng).unwrap();
    /// assert_eq!(population.entries().count(), 30);
    /// ```
    pub fn new<R: Rng + ?Sized>(
        population_config: PopulationConfig,
        genetic_config: C,
        rng: &mut R,
    ) -> Result<Population<C, G>, Box<dyn Error>> {
        Population::from_genomes(vec![], population_config, genetic_config, rng)
    }

    /// Creates a new population using the passed configurations,
    /// and seeds it with the specified genomes. If the number of seed
    /// genomes is not as large as the configured population size, the
    /// remaining space is filled with randomized genomes.
    ///
    /// # Errors
    /// Returns an error if there are more seeds than the configured
    /// population size, if the configured replacement quotas don't fit
    /// the population, or if a genome can't be generated.
    pub fn from_genomes<R: Rng + ?Sized>(
        genomes: Vec<G>,
        population_config: PopulationConfig,
        genetic_config: C,
        rng: &mut R,
    ) -> Result<Population<C, G>, Box<dyn Error>> {
        population_config.validate()?;
        let size = population_config.size.get();
        if genomes.len() > size {
            return Err(PopulationError::TooManySeeds {
                seeds: genomes.len(),
                size,
            }
            .into());
        }

        let mut entries: Vec<Entry<G>> = Vec::with_capacity(size);
        entries.extend(genomes.into_iter().map(Entry::new));
        while entries.len() < size {
            entries.push(Entry::new(G::new(&genetic_config, rng)?));
        }

        Ok(Population {
            entries,
            generation: 0,
            population_config,
            genetic_config,
        })
    }

    /// Evaluates the fitness of each genome in the
    /// population using the passed evaluator.
    ///
    /// # Errors
    /// Stops at and returns the first evaluator error.
    pub fn evaluate_fitness<E, F>(&mut self, mut evaluator: F) -> Result<(), E>
    where
        F: FnMut(&mut G) -> Result<f64, E>,
    {
        for entry in &mut self.entries {
            entry.fitness = Some(evaluator(&mut entry.genome)?);
        }
        Ok(())
    }

    /// Sets each genome's fitness to its mean squared
    /// error over `dataset`, scored as configured.
    ///
    /// # Errors
    /// Returns an error if any genome can't be scored.
    pub fn evaluate_on(&mut self, dataset: &Dataset) -> Result<(), EvaluationError<G::Error>> {
        let scoring = self.population_config.scoring;
        self.evaluate_fitness(|genome| mean_squared_error(genome, dataset, scoring))
    }

    /// Sorts the population by increasing fitness
    /// (best first). Genomes with equal fitness keep their
    /// relative order, and NaN fitnesses are ranked last.
    ///
    /// # Errors
    /// Returns an error if any genome hasn't been evaluated.
    pub fn rank(&mut self) -> Result<(), PopulationError> {
        if let Some(index) = self.entries.iter().position(|e| e.fitness.is_none()) {
            return Err(PopulationError::Unevaluated(index));
        }
        self.entries.sort_by(|a, b| {
            fitness_order(
                a.fitness.unwrap_or(f64::NAN),
                b.fitness.unwrap_or(f64::NAN),
            )
        });
        Ok(())
    }

    /// Replaces the worst genomes of a [ranked] population.
    ///
    /// The last `new_count + mutate_count` genomes are discarded.
    /// The weights of the first `mutate_count` survivors are copied
    /// (and mutated, if [configured]) into newly built genomes, and
    /// `new_count` randomized genomes are added. New genomes are
    /// unevaluated.
    ///
    /// [ranked]: Population::rank
    /// [configured]: PopulationConfig::clone_mutation
    ///
    /// # Errors
    /// Returns an error, leaving the population untouched, if the
    /// quotas don't fit the current population. Returns an error if
    /// a genome can't be generated.
    pub fn replace<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), Box<dyn Error>> {
        config::check_quotas(&self.population_config, self.entries.len())?;
        let survivors = self.entries.len() - self.population_config.kill_count();
        self.entries.truncate(survivors);

        for i in 0..self.population_config.mutate_count {
            let mut weights = self.entries[i].genome.weights();
            if let Some(mutation) = &self.population_config.clone_mutation {
                weights = mutation.apply(&weights, rng);
            }
            let clone = G::from_weights(&self.genetic_config, &weights)?;
            self.entries.push(Entry::new(clone));
        }
        for _ in 0..self.population_config.new_count {
            self.entries
                .push(Entry::new(G::new(&self.genetic_config, rng)?));
        }

        self.generation += 1;
        Ok(())
    }

    /// Returns the evaluated entry with the lowest fitness,
    /// or `None` if no entry has been evaluated.
    pub fn champion(&self) -> Option<&Entry<G>> {
        self.entries
            .iter()
            .filter(|e| e.fitness.is_some())
            .min_by(|a, b| {
                fitness_order(
                    a.fitness.unwrap_or(f64::NAN),
                    b.fitness.unwrap_or(f64::NAN),
                )
            })
    }

    /// Returns an iterator over all entries, in their current order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry<G>> {
        self.entries.iter()
    }

    /// Returns the number of replacement rounds so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Returns the population's configuration.
    pub fn config(&self) -> &PopulationConfig {
        &self.population_config
    }

    /// Returns the configuration genomes are built from.
    pub fn genetic_config(&self) -> &C {
        &self.genetic_config
    }
}

/// Ascending order, with NaN after every number.
fn fitness_order(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => a.total_cmp(&b),
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutation::{CloneMutation, MutationOperator};
    use crate::test_genome::{Tagged, TaggedError};

    use rand::{rngs::StdRng, SeedableRng};

    use std::num::NonZeroUsize;

    fn config(size: usize, new_count: usize, mutate_count: usize) -> PopulationConfig {
        PopulationConfig {
            size: NonZeroUsize::new(size).unwrap(),
            new_count,
            mutate_count,
            ..PopulationConfig::zero()
        }
    }

    fn tagged_population(
        fitnesses: &[f64],
        population_config: PopulationConfig,
    ) -> Population<usize, Tagged> {
        let genomes = (0..fitnesses.len())
            .map(|i| Tagged::with_tag(i as f64, 3))
            .collect();
        let mut rng = StdRng::seed_from_u64(0);
        let mut population =
            Population::from_genomes(genomes, population_config, 3, &mut rng).unwrap();
        let mut scores = fitnesses.iter().copied();
        population
            .evaluate_fitness(|_| scores.next().ok_or(TaggedError))
            .unwrap();
        population
    }

    fn tags(population: &Population<usize, Tagged>) -> Vec<f64> {
        population.entries().map(|e| e.genome().tag()).collect()
    }

    #[test]
    fn new_population_is_unevaluated() {
        let mut rng = StdRng::seed_from_u64(1);
        let population = Population::<_, Tagged>::new(config(12, 2, 2), 4, &mut rng).unwrap();
        assert_eq!(population.entries().count(), 12);
        assert!(population.entries().all(|e| e.fitness().is_none()));
        assert!(population.champion().is_none());
        assert_eq!(population.generation(), 0);
    }

    #[test]
    fn invalid_quotas_are_rejected_up_front() {
        let mut rng = StdRng::seed_from_u64(2);
        let error = Population::<_, Tagged>::new(config(10, 0, 6), 4, &mut rng).unwrap_err();
        assert_eq!(
            error.downcast_ref::<ReplacementError>(),
            Some(&ReplacementError::IndexOutOfRange {
                mutate_count: 6,
                survivors: 4
            })
        );
    }

    #[test]
    fn too_many_seeds() {
        let mut rng = StdRng::seed_from_u64(3);
        let seeds = vec![Tagged::with_tag(0.0, 1); 3];
        let error = Population::from_genomes(seeds, config(2, 0, 0), 1, &mut rng).unwrap_err();
        assert_eq!(
            error.downcast_ref::<PopulationError>(),
            Some(&PopulationError::TooManySeeds { seeds: 3, size: 2 })
        );
    }

    #[test]
    fn ranking_is_stable() {
        let mut population = tagged_population(&[0.5, 0.2, 0.2, 0.9], config(4, 0, 0));
        population.rank().unwrap();
        assert_eq!(tags(&population), vec![1.0, 2.0, 0.0, 3.0]);
        let fitnesses: Vec<_> = population.entries().map(|e| e.fitness()).collect();
        assert_eq!(fitnesses, vec![Some(0.2), Some(0.2), Some(0.5), Some(0.9)]);
    }

    #[test]
    fn nan_ranks_last() {
        let mut population = tagged_population(&[f64::NAN, 0.3, -f64::NAN, 0.1], config(4, 0, 0));
        population.rank().unwrap();
        assert_eq!(tags(&population), vec![3.0, 1.0, 0.0, 2.0]);
        assert_eq!(population.champion().unwrap().genome().tag(), 3.0);
    }

    #[test]
    fn ranking_requires_evaluation() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut population = Population::<_, Tagged>::new(config(3, 0, 0), 2, &mut rng).unwrap();
        assert_eq!(population.rank(), Err(PopulationError::Unevaluated(0)));
    }

    #[test]
    fn replacement_restores_size() {
        let fitnesses: Vec<f64> = (0..30).map(|i| i as f64).collect();
        let mut population = tagged_population(&fitnesses, config(30, 10, 10));
        population.rank().unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        population.replace(&mut rng).unwrap();

        let entries: Vec<_> = population.entries().collect();
        assert_eq!(entries.len(), 30);

        let survivors = &entries[..10];
        let clones = &entries[10..20];
        let fresh = &entries[20..];
        for (i, entry) in survivors.iter().enumerate() {
            assert_eq!(entry.genome().tag(), i as f64);
            assert_eq!(entry.fitness(), Some(i as f64));
        }
        for (i, entry) in clones.iter().enumerate() {
            assert_eq!(entry.genome().weights(), survivors[i].genome().weights());
            assert_eq!(entry.fitness(), None);
        }
        for entry in fresh {
            assert_eq!(entry.fitness(), None);
            assert!(entry.genome().weights().iter().all(|w| (0.0..1.0).contains(w)));
        }
        assert_eq!(population.generation(), 1);
    }

    #[test]
    fn clones_are_mutated_when_configured() {
        let population_config = PopulationConfig {
            clone_mutation: Some(CloneMutation {
                operator: MutationOperator::Perturb,
                percentage: 0.5,
            }),
            ..config(4, 1, 1)
        };
        let mut population = tagged_population(&[0.0, 1.0, 2.0, 3.0], population_config);
        population.rank().unwrap();
        population.replace(&mut StdRng::seed_from_u64(6)).unwrap();

        let entries: Vec<_> = population.entries().collect();
        let parent = entries[0].genome().weights();
        let clone = entries[2].genome().weights();
        assert_ne!(clone, parent);
        assert!(clone
            .iter()
            .zip(&parent)
            .all(|(c, p)| (c - p).abs() <= 0.5));
    }

    #[test]
    fn replacement_guards_clone_quota() {
        let mut population = tagged_population(&[0.0, 1.0, 2.0, 3.0], config(4, 1, 1));
        population.rank().unwrap();
        population.population_config.mutate_count = 3;

        let error = population
            .replace(&mut StdRng::seed_from_u64(7))
            .unwrap_err();
        assert_eq!(
            error.downcast_ref::<ReplacementError>(),
            Some(&ReplacementError::IndexOutOfRange {
                mutate_count: 3,
                survivors: 0
            })
        );
        // Nothing was discarded or duplicated.
        assert_eq!(tags(&population), vec![0.0, 1.0, 2.0, 3.0]);
    }
}
