//! # EvolutionOptions
//!
//! The `EvolutionOptions` struct holds the run parameters of the genetic
//! algorithm. It is built once, validated, and then only read.
//!
//! ## Example
//!
//! ```rust
//! use genclust::evolution::{EvolutionOptions, MutationSchedule};
//!
//! let options = EvolutionOptions::builder()
//!     .population_size(50)
//!     .num_generations(200)
//!     .mutation_schedule(MutationSchedule::Constant(0.2))
//!     .seed(7)
//!     .build();
//!
//! assert!(options.validate().is_ok());
//! assert!(options.is_elitist());
//! ```
//!
//! ## Fields
//!
//! - `population_size`: N, the number of chromosomes per generation.
//! - `num_generations`: how many times the run driver calls `next_generation`.
//! - `elitism`: carry the best chromosome unchanged into the next generation.
//! - `parallel_threshold`: population size from which rayon is used.
//! - `max_regeneration_attempts`: how often a numerically unstable offspring
//!   is bred again before the generation fails.
//! - `mutation_schedule`: the mutation probability per generation.
//! - `seed`: optional seed for a reproducible run.

use crate::error::{GeneticError, Result};

use super::schedule::MutationSchedule;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionOptions {
    population_size: usize,
    num_generations: usize,
    elitism: bool,
    /// Minimum population size processed in parallel
    parallel_threshold: usize,
    max_regeneration_attempts: usize,
    mutation_schedule: MutationSchedule,
    seed: Option<u64>,
}

impl EvolutionOptions {
    pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1000;
    pub const DEFAULT_REGENERATION_ATTEMPTS: usize = 100;

    pub fn new(population_size: usize, num_generations: usize) -> Self {
        Self {
            population_size,
            num_generations,
            ..Self::default()
        }
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_num_generations(&self) -> usize {
        self.num_generations
    }

    pub fn is_elitist(&self) -> bool {
        self.elitism
    }

    /// Returns the minimum population size processed in parallel.
    pub fn get_parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    pub fn get_max_regeneration_attempts(&self) -> usize {
        self.max_regeneration_attempts
    }

    pub fn get_mutation_schedule(&self) -> &MutationSchedule {
        &self.mutation_schedule
    }

    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    /// Checks every parameter.
    ///
    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error describing the first
    /// invalid parameter.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(GeneticError::Configuration(
                "Population size cannot be zero".to_string(),
            ));
        }
        if self.num_generations == 0 {
            return Err(GeneticError::Configuration(
                "Number of generations cannot be zero".to_string(),
            ));
        }
        if self.max_regeneration_attempts == 0 {
            return Err(GeneticError::Configuration(
                "Maximum regeneration attempts cannot be zero".to_string(),
            ));
        }
        self.mutation_schedule.validate()
    }

    /// Returns a builder for creating an `EvolutionOptions` instance.
    pub fn builder() -> EvolutionOptionsBuilder {
        EvolutionOptionsBuilder::default()
    }
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        Self {
            population_size: 20,
            num_generations: 100,
            elitism: true,
            parallel_threshold: Self::DEFAULT_PARALLEL_THRESHOLD,
            max_regeneration_attempts: Self::DEFAULT_REGENERATION_ATTEMPTS,
            mutation_schedule: MutationSchedule::default(),
            seed: None,
        }
    }
}

/// Builder for `EvolutionOptions`.
///
/// Provides a fluent interface for constructing `EvolutionOptions` instances.
#[derive(Debug, Clone, Default)]
pub struct EvolutionOptionsBuilder {
    population_size: Option<usize>,
    num_generations: Option<usize>,
    elitism: Option<bool>,
    parallel_threshold: Option<usize>,
    max_regeneration_attempts: Option<usize>,
    mutation_schedule: Option<MutationSchedule>,
    seed: Option<u64>,
}

impl EvolutionOptionsBuilder {
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    pub fn num_generations(mut self, value: usize) -> Self {
        self.num_generations = Some(value);
        self
    }

    pub fn elitism(mut self, value: bool) -> Self {
        self.elitism = Some(value);
        self
    }

    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    pub fn max_regeneration_attempts(mut self, value: usize) -> Self {
        self.max_regeneration_attempts = Some(value);
        self
    }

    pub fn mutation_schedule(mut self, value: MutationSchedule) -> Self {
        self.mutation_schedule = Some(value);
        self
    }

    pub fn seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    /// Builds the `EvolutionOptions` instance. Unset fields take their defaults.
    pub fn build(self) -> EvolutionOptions {
        let defaults = EvolutionOptions::default();
        EvolutionOptions {
            population_size: self.population_size.unwrap_or(defaults.population_size),
            num_generations: self.num_generations.unwrap_or(defaults.num_generations),
            elitism: self.elitism.unwrap_or(defaults.elitism),
            parallel_threshold: self
                .parallel_threshold
                .unwrap_or(defaults.parallel_threshold),
            max_regeneration_attempts: self
                .max_regeneration_attempts
                .unwrap_or(defaults.max_regeneration_attempts),
            mutation_schedule: self
                .mutation_schedule
                .unwrap_or(defaults.mutation_schedule),
            seed: self.seed.or(defaults.seed),
        }
    }
}
