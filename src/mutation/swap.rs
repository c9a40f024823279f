use super::MutationAgent;
use crate::{
    cluster::ClusterChromosome,
    error::{check_probability, GeneticError, Result},
    rng::RandomNumberGenerator,
};

/// Exchanges the full coordinate vectors of two distinct centroids.
///
/// The set of centroid positions is unchanged; only their order moves, which
/// matters to [`OnePointCrossover`](crate::breeding::OnePointCrossover).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Swap;

impl MutationAgent<ClusterChromosome> for Swap {
    fn mutate(
        &self,
        chromosome: &mut ClusterChromosome,
        probability: f64,
        rng: &mut RandomNumberGenerator,
    ) -> Result<()> {
        check_probability(probability, "Mutation probability")?;
        self.check(chromosome)?;

        if !rng.chance(probability) {
            return Ok(());
        }

        let k = chromosome.cluster_count();
        let first = rng.index(k);
        // Draw from the k - 1 other indices so the pair is always distinct.
        let mut second = rng.index(k - 1);
        if second >= first {
            second += 1;
        }

        chromosome.update_centroids(|centroids| centroids.swap(first, second))
    }

    fn check(&self, sample: &ClusterChromosome) -> Result<()> {
        if sample.cluster_count() < 2 {
            return Err(GeneticError::Configuration(
                "Swap mutation needs at least two centroids".to_string(),
            ));
        }
        Ok(())
    }
}
