use std::sync::Arc;

use super::ReproductionAgent;
use crate::{cluster::ClusterChromosome, error::Result, rng::RandomNumberGenerator};

/// Splits both parents at one cut index `c` drawn from `[1, k-1]`.
///
/// The child takes centroids `[0, c)` from the first parent and `[c, k)` from
/// the second, copied verbatim. With a single centroid there is nowhere to cut,
/// so the child is a copy of one parent picked at random.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OnePointCrossover;

impl ReproductionAgent<ClusterChromosome> for OnePointCrossover {
    fn reproduce(
        &self,
        first: &ClusterChromosome,
        second: &ClusterChromosome,
        rng: &mut RandomNumberGenerator,
    ) -> Result<ClusterChromosome> {
        first.ensure_compatible(second)?;

        let k = first.cluster_count();
        if k == 1 {
            let parent = if rng.chance(0.5) { first } else { second };
            return ClusterChromosome::new(Arc::clone(parent.space()), parent.centroids().to_vec());
        }

        let cut = rng.index_between(1, k - 1);
        let centroids = first.centroids()[..cut]
            .iter()
            .chain(&second.centroids()[cut..])
            .cloned()
            .collect();

        ClusterChromosome::new(Arc::clone(first.space()), centroids)
    }
}
