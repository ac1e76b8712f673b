//! A generational evolutionary search over flat weight vectors.
//!
//! A [`Population`] holds a fixed number of genomes, each paired
//! with its fitness: the mean squared error of its predictions over
//! a labeled [`Dataset`]. Every generation the population is ranked,
//! its worst genomes are discarded, the weights of its best genomes
//! are copied into newly built genomes, and the remainder is refilled
//! with random genomes. All randomness comes from an explicitly
//! passed random number generator, so runs are reproducible.
//!
//! Models are plugged in through the [`Genome`] trait. A fixed-topology
//! feedforward network implementation is supplied via the `OxiEvo-FF` crate.
//!
//! # Example usage: Evolution of a height classifier, using `OxiEvo-FF`
//! ```
//! use oxievo::logging::{EvolutionLogger, ReportingLevel};
//! use oxievo::{Dataset, EvolutionLoop, Population, PopulationConfig};
//! use oxievo_ff::networks::{Network, NetworkConfig, Topology};
//! use rand::{rngs::StdRng, SeedableRng};
//! use std::num::NonZeroUsize;
//!
//! let dataset = Dataset::from_tables(
//!     vec![vec![170.0], vec![190.0], vec![165.0], vec![180.0], vec![210.0]],
//!     vec![vec![1.0], vec![0.0], vec![1.0], vec![0.0], vec![1.0]],
//! )
//! .unwrap();
//!
//! let population_config = PopulationConfig {
//!     size: NonZeroUsize::new(30).unwrap(),
//!     generations: 10,
//!     new_count: 10,
//!     mutate_count: 10,
//!     ..PopulationConfig::zero()
//! };
//! let network_config = NetworkConfig::new(Topology::new(vec![1, 2, 1]).unwrap());
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let population =
//!     Population::<_, Network>::new(population_config, network_config, &mut rng).unwrap();
//! let mut evolution = EvolutionLoop::new(population, &dataset)
//!     .with_logger(EvolutionLogger::new(ReportingLevel::NoGenomes));
//!
//! match evolution.run(&mut rng) {
//!     Ok(summary) => println!("Best fitness: {}", summary.fitness),
//!     Err(e) => eprintln!("{}", e),
//! }
//! for log in evolution.logger().unwrap().iter() {
//!     println!("{}", log);
//! }
//! ```

mod dataset;
mod genome;
pub mod mutation;
mod populations;
#[cfg(test)]
mod test_genome;

pub use dataset::*;
pub use genome::*;
pub use populations::*;
