use oxievo::logging::{EvolutionLogger, ReportingLevel};
use oxievo::{Dataset, EvolutionLoop, Population, PopulationConfig};
use oxievo_ff::networks::{Network, NetworkConfig, Topology};

use rand::{rngs::StdRng, SeedableRng};
use serde::Deserialize;

use std::error::Error;
use std::fs;
use std::num::NonZeroUsize;

const HEIGHTS: [f64; 5] = [170.0, 190.0, 165.0, 180.0, 210.0];
const LABELS: [f64; 5] = [1.0, 0.0, 1.0, 0.0, 1.0];

#[derive(Deserialize)]
struct ExperimentConfig {
    /// Seed for the run's random number generator.
    /// Runs are seeded from entropy if absent.
    #[serde(default)]
    seed: Option<u64>,
    network: NetworkConfig,
    population: PopulationConfig,
    /// Print a fitness summary after every round.
    #[serde(default)]
    verbose: bool,
}

fn default_config() -> Result<ExperimentConfig, Box<dyn Error>> {
    Ok(ExperimentConfig {
        seed: None,
        network: NetworkConfig::new(Topology::new(vec![1, 2, 1])?),
        population: PopulationConfig {
            size: NonZeroUsize::new(30).ok_or("population size must be nonzero")?,
            generations: 0,
            new_count: 10,
            mutate_count: 10,
            ..PopulationConfig::zero()
        },
        verbose: false,
    })
}

fn load_config(path: &str) -> Result<ExperimentConfig, Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    Ok(ron::from_str(&text)?)
}

fn main() {
    let config = match std::env::args().nth(1) {
        Some(path) => load_config(&path),
        None => default_config(),
    };
    let result = config.and_then(run);
    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run(config: ExperimentConfig) -> Result<(), Box<dyn Error>> {
    let dataset = Dataset::from_tables(
        HEIGHTS.iter().map(|h| vec![*h]).collect(),
        LABELS.iter().map(|l| vec![*l]).collect(),
    )?;
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let population =
        Population::<_, Network>::new(config.population, config.network, &mut rng)?;
    let mut evolution = EvolutionLoop::new(population, &dataset)
        .with_logger(EvolutionLogger::new(ReportingLevel::NoGenomes));
    let summary = evolution.run(&mut rng)?;

    if config.verbose {
        if let Some(logger) = evolution.logger() {
            for log in logger.iter() {
                println!("{}", log);
            }
        }
    }
    println!("{}", summary.fitness);
    if config.verbose {
        println!("{:?}", summary.weights);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_experiment_parses() {
        let config: ExperimentConfig = ron::from_str(include_str!("../experiment.ron")).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.network.topology.layers(), &[1, 2, 1]);
        assert_eq!(config.population.generations, 50);
        assert!(config.population.validate().is_ok());
    }

    #[test]
    fn default_experiment_runs() {
        let config = ExperimentConfig {
            seed: Some(1),
            ..default_config().unwrap()
        };
        assert!(run(config).is_ok());
    }
}
