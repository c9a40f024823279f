use std::sync::Arc;

use tracing::debug;

use crate::error::{GeneticError, Result};
use crate::evolution::PopulationGenerator;
use crate::rng::RandomNumberGenerator;
use crate::space::PointSpace;

use super::centroid::CentroidGenerator;
use super::chromosome::ClusterChromosome;

/// Builds generation 0: `size` chromosomes of `k` centroids each.
#[derive(Debug, Clone)]
pub struct CentroidPopulationGenerator<G: CentroidGenerator> {
    space: Arc<PointSpace>,
    k: usize,
    generator: G,
    size: usize,
}

impl<G: CentroidGenerator> CentroidPopulationGenerator<G> {
    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error if `k` is not in
    /// `[1, space.len()]` or `size` is zero.
    pub fn new(space: Arc<PointSpace>, k: usize, generator: G, size: usize) -> Result<Self> {
        if k == 0 || k > space.len() {
            return Err(GeneticError::Configuration(format!(
                "Cluster count must be in [1, {}], got {}",
                space.len(),
                k
            )));
        }
        if size == 0 {
            return Err(GeneticError::Configuration(
                "Population size cannot be zero".to_string(),
            ));
        }

        Ok(Self {
            space,
            k,
            generator,
            size,
        })
    }

    pub fn cluster_count(&self) -> usize {
        self.k
    }
}

impl<G: CentroidGenerator> PopulationGenerator<ClusterChromosome> for CentroidPopulationGenerator<G> {
    fn size(&self) -> usize {
        self.size
    }

    fn generate(&self, rng: &mut RandomNumberGenerator) -> Result<Vec<ClusterChromosome>> {
        debug!(
            size = self.size,
            k = self.k,
            generator = ?self.generator,
            "building initial population"
        );

        (0..self.size)
            .map(|_| {
                let centroids = self.generator.generate(&self.space, self.k, rng)?;
                ClusterChromosome::new(Arc::clone(&self.space), centroids)
            })
            .collect()
    }
}
