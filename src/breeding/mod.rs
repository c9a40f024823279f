//! # ReproductionAgent
//!
//! The `ReproductionAgent` trait defines the interface for strategies that
//! combine two parent chromosomes into one offspring.
pub mod average;
pub mod one_point;

use std::fmt::Debug;

use crate::{
    chromosome::Chromosome, cluster::ClusterChromosome, error::Result,
    rng::RandomNumberGenerator,
};

pub use average::Average;
pub use one_point::OnePointCrossover;

/// Combines two parents into a single child.
pub trait ReproductionAgent<C: Chromosome>: Debug + Send + Sync {
    /// Produces one offspring from `first` and `second`.
    ///
    /// ## Errors
    ///
    /// Returns `GeneticError::Configuration` if the parents have different shapes.
    fn reproduce(&self, first: &C, second: &C, rng: &mut RandomNumberGenerator) -> Result<C>;
}

/// The reproduction variant chosen for a run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReproductionKind {
    OnePointCrossover,
    #[default]
    Average,
}

impl ReproductionAgent<ClusterChromosome> for ReproductionKind {
    fn reproduce(
        &self,
        first: &ClusterChromosome,
        second: &ClusterChromosome,
        rng: &mut RandomNumberGenerator,
    ) -> Result<ClusterChromosome> {
        match self {
            ReproductionKind::OnePointCrossover => OnePointCrossover.reproduce(first, second, rng),
            ReproductionKind::Average => Average.reproduce(first, second, rng),
        }
    }
}
