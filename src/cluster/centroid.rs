//! # Centroid Generators
//!
//! Strategies producing an initial set of k centroids from a point space.

use std::fmt::Debug;

use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;
use crate::space::{Point, PointSpace};

/// Produces `k` centroids for a point space.
pub trait CentroidGenerator: Debug + Send + Sync {
    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error if `k` is zero or the
    /// strategy cannot produce `k` centroids from `space`.
    fn generate(
        &self,
        space: &PointSpace,
        k: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Point>>;
}

fn check_k(space: &PointSpace, k: usize) -> Result<()> {
    if k == 0 {
        return Err(GeneticError::Configuration(
            "Cluster count must be at least 1".to_string(),
        ));
    }
    if k > space.len() {
        return Err(GeneticError::Configuration(format!(
            "Cluster count {} exceeds the number of points {}",
            k,
            space.len()
        )));
    }
    Ok(())
}

/// Every coordinate drawn uniformly within the data's per-dimension bounds.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RandomInBounds;

impl CentroidGenerator for RandomInBounds {
    fn generate(
        &self,
        space: &PointSpace,
        k: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Point>> {
        check_k(space, k)?;

        Ok((0..k)
            .map(|_| {
                space
                    .bounds()
                    .iter()
                    .map(|bound| rng.uniform(bound.min, bound.max))
                    .collect()
            })
            .collect())
    }
}

/// k distinct data points, sampled without replacement, copied verbatim.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShuffleFromData;

impl CentroidGenerator for ShuffleFromData {
    fn generate(
        &self,
        space: &PointSpace,
        k: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Point>> {
        check_k(space, k)?;

        Ok(rng
            .sample_distinct(space.len(), k)
            .into_iter()
            .map(|idx| space.points()[idx].clone())
            .collect())
    }
}

/// The centroid generation variant chosen for a run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CentroidStrategy {
    #[default]
    RandomInBounds,
    ShuffleFromData,
}

impl CentroidGenerator for CentroidStrategy {
    fn generate(
        &self,
        space: &PointSpace,
        k: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Point>> {
        match self {
            CentroidStrategy::RandomInBounds => RandomInBounds.generate(space, k, rng),
            CentroidStrategy::ShuffleFromData => ShuffleFromData.generate(space, k, rng),
        }
    }
}
