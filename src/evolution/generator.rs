use crate::{chromosome::Chromosome, error::Result, rng::RandomNumberGenerator};

/// Builds the initial population (generation 0) of an engine.
pub trait PopulationGenerator<C: Chromosome> {
    /// Number of chromosomes `generate` produces.
    fn size(&self) -> usize;

    fn generate(&self, rng: &mut RandomNumberGenerator) -> Result<Vec<C>>;
}
