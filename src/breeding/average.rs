use std::sync::Arc;

use super::ReproductionAgent;
use crate::{cluster::ClusterChromosome, error::Result, rng::RandomNumberGenerator};

/// Child centroid `i` is the elementwise mean of the parents' centroid `i`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Average;

impl ReproductionAgent<ClusterChromosome> for Average {
    fn reproduce(
        &self,
        first: &ClusterChromosome,
        second: &ClusterChromosome,
        _rng: &mut RandomNumberGenerator,
    ) -> Result<ClusterChromosome> {
        first.ensure_compatible(second)?;

        let centroids = first
            .centroids()
            .iter()
            .zip(second.centroids())
            .map(|(a, b)| a.iter().zip(b).map(|(x, y)| (x + y) / 2.0).collect())
            .collect();

        ClusterChromosome::new(Arc::clone(first.space()), centroids)
    }
}
