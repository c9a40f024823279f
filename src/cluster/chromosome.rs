use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::debug;

use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::space::{Point, PointSpace};

use super::metrics::ClusterMetrics;

/// A candidate clustering: an ordered list of exactly k centroids.
///
/// The metrics are computed on first access and cached. Every way of changing
/// the centroids goes through [`ClusterChromosome::update_centroids`] (or builds
/// a new chromosome), which drops the cache.
#[derive(Clone)]
pub struct ClusterChromosome {
    space: Arc<PointSpace>,
    centroids: Vec<Point>,
    metrics: OnceLock<ClusterMetrics>,
}

impl ClusterChromosome {
    /// Creates a chromosome from `centroids`.
    ///
    /// # Errors
    ///
    /// - `GeneticError::Configuration` if there are no centroids, more centroids
    ///   than points, or a centroid of the wrong dimensionality.
    /// - `GeneticError::NumericInstability` if a coordinate is not finite.
    pub fn new(space: Arc<PointSpace>, centroids: Vec<Point>) -> Result<Self> {
        if centroids.is_empty() {
            return Err(GeneticError::Configuration(
                "A chromosome needs at least one centroid".to_string(),
            ));
        }
        if centroids.len() > space.len() {
            return Err(GeneticError::Configuration(format!(
                "Cluster count {} exceeds the number of points {}",
                centroids.len(),
                space.len()
            )));
        }
        if let Some(idx) = centroids
            .iter()
            .position(|c| c.len() != space.dimensions())
        {
            return Err(GeneticError::Configuration(format!(
                "Centroid {} has {} dimensions, expected {}",
                idx,
                centroids[idx].len(),
                space.dimensions()
            )));
        }

        let chromosome = Self {
            space,
            centroids,
            metrics: OnceLock::new(),
        };
        chromosome.check_finite()?;
        Ok(chromosome)
    }

    pub fn space(&self) -> &Arc<PointSpace> {
        &self.space
    }

    pub fn centroids(&self) -> &[Point] {
        &self.centroids
    }

    pub fn into_centroids(self) -> Vec<Point> {
        self.centroids
    }

    /// k
    pub fn cluster_count(&self) -> usize {
        self.centroids.len()
    }

    pub fn dimensions(&self) -> usize {
        self.space.dimensions()
    }

    /// Edits the centroids in place and invalidates the cached metrics.
    ///
    /// The closure gets a slice, so it can move coordinates around but cannot
    /// change k. Dimensionality is checked afterwards.
    pub fn update_centroids<F>(&mut self, edit: F) -> Result<()>
    where
        F: FnOnce(&mut [Point]),
    {
        edit(&mut self.centroids);
        self.metrics = OnceLock::new();

        let dimensions = self.space.dimensions();
        if self.centroids.iter().any(|c| c.len() != dimensions) {
            return Err(GeneticError::InvariantViolation(
                "Centroid dimensionality changed during update".to_string(),
            ));
        }
        Ok(())
    }

    /// Fails unless this chromosome and `other` share the same point space shape and k.
    pub fn ensure_compatible(&self, other: &Self) -> Result<()> {
        if self.cluster_count() != other.cluster_count() {
            return Err(GeneticError::Configuration(format!(
                "Cannot combine chromosomes with {} and {} centroids",
                self.cluster_count(),
                other.cluster_count()
            )));
        }
        if self.dimensions() != other.dimensions() {
            return Err(GeneticError::Configuration(format!(
                "Cannot combine chromosomes of dimensionality {} and {}",
                self.dimensions(),
                other.dimensions()
            )));
        }
        Ok(())
    }

    pub fn check_finite(&self) -> Result<()> {
        for (idx, centroid) in self.centroids.iter().enumerate() {
            if centroid.iter().any(|x| !x.is_finite()) {
                return Err(GeneticError::NumericInstability(format!(
                    "Centroid {} has a non-finite coordinate",
                    idx
                )));
            }
        }
        Ok(())
    }

    /// Moves every centroid without assigned points onto the data point that
    /// lies farthest from the centroid it is assigned to, one centroid at a
    /// time. Returns how many centroids were moved.
    ///
    /// A moved centroid sits on a data point and keeps it, so each centroid
    /// moves at most once. Centroids that stay empty (all remaining points
    /// coincide with their centroids) are left where they are.
    pub fn reseed_empty_clusters(&mut self) -> usize {
        let mut moved = 0;

        for _ in 0..self.cluster_count() {
            let metrics = self.metrics();
            let Some(&empty) = metrics.empty_clusters().first() else {
                break;
            };

            let mut farthest: Option<(usize, f64)> = None;
            for (idx, (point, &cluster)) in
                self.space.points().iter().zip(metrics.assignment()).enumerate()
            {
                let distance = self.space.distance(point, &self.centroids[cluster]);
                if distance > farthest.map_or(0.0, |(_, d)| d) {
                    farthest = Some((idx, distance));
                }
            }
            let Some((idx, _)) = farthest else {
                break;
            };

            self.centroids[empty] = self.space.points()[idx].clone();
            self.metrics = OnceLock::new();
            moved += 1;
        }

        moved
    }

    /// The cached metrics, computed on first access.
    pub fn metrics(&self) -> &ClusterMetrics {
        self.metrics
            .get_or_init(|| ClusterMetrics::evaluate(&self.space, &self.centroids))
    }

    pub fn is_evaluated(&self) -> bool {
        self.metrics.get().is_some()
    }

    pub fn assignment(&self) -> &[usize] {
        self.metrics().assignment()
    }

    pub fn intra_cluster_distance(&self) -> f64 {
        self.metrics().intra_cluster_distance()
    }

    pub fn inter_cluster_distance(&self) -> f64 {
        self.metrics().inter_cluster_distance()
    }

    pub fn quantization_error(&self) -> f64 {
        self.metrics().quantization_error()
    }
}

impl Chromosome for ClusterChromosome {
    fn fitness(&self) -> f64 {
        self.metrics().fitness()
    }

    fn validate(&self) -> Result<()> {
        self.check_finite()
    }

    fn repair(&mut self) -> Result<()> {
        let moved = self.reseed_empty_clusters();
        if moved > 0 {
            debug!(moved, "reseeded empty clusters from the data");
        }
        Ok(())
    }
}

impl fmt::Debug for ClusterChromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClusterChromosome")
            .field("centroids", &self.centroids)
            .field("fitness", &self.metrics.get().map(ClusterMetrics::fitness))
            .finish()
    }
}

impl PartialEq for ClusterChromosome {
    fn eq(&self, other: &Self) -> bool {
        self.centroids == other.centroids
    }
}
