//! # OxiEvo-FF
//! A fixed-topology feedforward implementation of the [`OxiEvo` crate](../oxievo/index.html)'s `Genome` trait.
//!
//! Provides a [`Network`] type usable in `OxiEvo` `Population`s. A network's
//! shape is fixed by its [`Topology`] at construction; everything tunable lives
//! in a single flat weight vector whose order is defined by a [`WeightLayout`].
//!
//! [`Network`]: crate::networks::Network
//! [`Topology`]: crate::networks::Topology
//! [`WeightLayout`]: crate::networks::WeightLayout
//!
//! # Example usage: Evolution of a height classifier
//! ```
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
//! let network_config = NetworkConfig::new(Topology::new(vec![1, 2, 1]).unwrap());
//! let population_config = PopulationConfig {
//!     size: NonZeroUsize::new(30).unwrap(),
//!     generations: 20,
//!     new_count: 10,
//!     mutate_count: 10,
//!     ..PopulationConfig::zero()
//! };
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let population =
//!     Population::<_, Network>::new(population_config, network_config, &mut rng).unwrap();
//! let summary = EvolutionLoop::new(population, &dataset).run(&mut rng).unwrap();
//!
//! assert_eq!(summary.rounds, 21);
//! assert!(summary.fitness >= 0.0);
//! ```

pub mod networks;
