//! Fitness metrics of a centroid set measured against a point space.

use tracing::debug;

use crate::space::{Point, PointSpace};

/// Added to the intra-cluster distance so that a perfect fit does not divide by zero.
pub const FITNESS_EPSILON: f64 = 1e-6;

/// Everything derived from one assignment pass of the points to the centroids.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterMetrics {
    assignment: Vec<usize>,
    cluster_sizes: Vec<usize>,
    empty_clusters: Vec<usize>,
    intra_cluster_distance: f64,
    inter_cluster_distance: f64,
    quantization_error: f64,
    fitness: f64,
}

impl ClusterMetrics {
    /// Assigns every point to its nearest centroid and derives the scores.
    ///
    /// Ties go to the lowest centroid index. `centroids` must be non-empty and
    /// every centroid must have the space's dimensionality.
    pub fn evaluate(space: &PointSpace, centroids: &[Point]) -> Self {
        let k = centroids.len();
        let mut assignment = Vec::with_capacity(space.len());
        let mut cluster_sizes = vec![0usize; k];
        let mut cluster_distance_sums = vec![0.0f64; k];
        let mut total_distance = 0.0;

        for point in space.points() {
            let mut nearest = 0;
            let mut nearest_distance = f64::INFINITY;
            for (idx, centroid) in centroids.iter().enumerate() {
                let distance = space.distance(point, centroid);
                if distance < nearest_distance {
                    nearest = idx;
                    nearest_distance = distance;
                }
            }
            assignment.push(nearest);
            cluster_sizes[nearest] += 1;
            cluster_distance_sums[nearest] += nearest_distance;
            total_distance += nearest_distance;
        }

        let quantization_error = total_distance / space.len() as f64;

        let empty_clusters: Vec<usize> = cluster_sizes
            .iter()
            .enumerate()
            .filter(|(_, &size)| size == 0)
            .map(|(idx, _)| idx)
            .collect();
        if !empty_clusters.is_empty() {
            debug!(?empty_clusters, "degenerate clusters without assigned points");
        }

        let intra_cluster_distance = cluster_distance_sums
            .iter()
            .zip(&cluster_sizes)
            .map(|(&sum, &size)| if size == 0 { 0.0 } else { sum / size as f64 })
            .sum::<f64>()
            / k as f64;

        let inter_cluster_distance = mean_pairwise_distance(space, centroids);
        let fitness = inter_cluster_distance / (intra_cluster_distance + FITNESS_EPSILON);

        Self {
            assignment,
            cluster_sizes,
            empty_clusters,
            intra_cluster_distance,
            inter_cluster_distance,
            quantization_error,
            fitness,
        }
    }

    /// Index of the centroid each point is assigned to.
    pub fn assignment(&self) -> &[usize] {
        &self.assignment
    }

    /// Number of points assigned to each centroid.
    pub fn cluster_sizes(&self) -> &[usize] {
        &self.cluster_sizes
    }

    /// Centroids with no assigned point. Their intra-cluster contribution is 0.
    pub fn empty_clusters(&self) -> &[usize] {
        &self.empty_clusters
    }

    pub fn is_degenerate(&self) -> bool {
        !self.empty_clusters.is_empty()
    }

    pub fn intra_cluster_distance(&self) -> f64 {
        self.intra_cluster_distance
    }

    pub fn inter_cluster_distance(&self) -> f64 {
        self.inter_cluster_distance
    }

    pub fn quantization_error(&self) -> f64 {
        self.quantization_error
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }
}

fn mean_pairwise_distance(space: &PointSpace, centroids: &[Point]) -> f64 {
    let k = centroids.len();
    if k < 2 {
        return 0.0;
    }

    let mut sum = 0.0;
    for i in 0..k {
        for j in (i + 1)..k {
            sum += space.distance(&centroids[i], &centroids[j]);
        }
    }
    let pairs = (k * (k - 1) / 2) as f64;
    sum / pairs
}
