//! # MutationAgent
//!
//! The `MutationAgent` trait defines the interface for strategies that perturb
//! a chromosome in place. Each call is a single Bernoulli trial: with
//! probability `p` the whole chromosome is mutated, otherwise it is left alone.
pub mod gaussian;
pub mod swap;

use std::fmt::Debug;

use crate::{
    chromosome::Chromosome, cluster::ClusterChromosome, error::Result,
    rng::RandomNumberGenerator,
};

pub use gaussian::GaussianNoise;
pub use swap::Swap;

pub trait MutationAgent<C: Chromosome>: Debug + Send + Sync {
    /// Mutates `chromosome` with probability `probability`.
    ///
    /// ## Errors
    ///
    /// Returns `GeneticError::Configuration` if `probability` is outside `[0, 1]`
    /// or the chromosome does not fit the strategy.
    fn mutate(
        &self,
        chromosome: &mut C,
        probability: f64,
        rng: &mut RandomNumberGenerator,
    ) -> Result<()>;

    /// Checks, before any generation runs, that the strategy can operate on
    /// chromosomes shaped like `sample`.
    fn check(&self, _sample: &C) -> Result<()> {
        Ok(())
    }
}

/// The mutation variant chosen for a run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MutationKind {
    Swap,
    GaussianNoise(GaussianNoise),
}

impl Default for MutationKind {
    fn default() -> Self {
        MutationKind::GaussianNoise(GaussianNoise::default())
    }
}

impl MutationKind {
    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error if the variant's
    /// parameters are out of range.
    pub fn validate(&self) -> Result<()> {
        match self {
            MutationKind::Swap => Ok(()),
            MutationKind::GaussianNoise(noise) => noise.validate(),
        }
    }
}

impl MutationAgent<ClusterChromosome> for MutationKind {
    fn mutate(
        &self,
        chromosome: &mut ClusterChromosome,
        probability: f64,
        rng: &mut RandomNumberGenerator,
    ) -> Result<()> {
        match self {
            MutationKind::Swap => Swap.mutate(chromosome, probability, rng),
            MutationKind::GaussianNoise(noise) => noise.mutate(chromosome, probability, rng),
        }
    }

    fn check(&self, sample: &ClusterChromosome) -> Result<()> {
        match self {
            MutationKind::Swap => Swap.check(sample),
            MutationKind::GaussianNoise(noise) => noise.check(sample),
        }
    }
}
