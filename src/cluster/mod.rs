//! # Cluster Chromosome
//!
//! The clustering genotype: a fixed-size ordered set of centroids scored
//! against a shared [`PointSpace`](crate::space::PointSpace), plus the
//! strategies that build the initial population.
//!
//! ## Fitness
//!
//! Each point is assigned to its nearest centroid (ties to the lowest index).
//! From that assignment:
//!
//! - quantization error: mean distance of every point to its centroid;
//! - intra-cluster distance: mean over clusters of the mean point-to-centroid
//!   distance inside the cluster (an empty cluster counts as 0);
//! - inter-cluster distance: mean distance over all centroid pairs;
//! - fitness: `inter / (intra + 1e-6)`.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use genclust::chromosome::Chromosome;
//! use genclust::cluster::ClusterChromosome;
//! use genclust::space::PointSpace;
//!
//! let space = Arc::new(PointSpace::new(vec![
//!     vec![0.0, 0.0],
//!     vec![0.0, 1.0],
//!     vec![10.0, 0.0],
//!     vec![10.0, 1.0],
//! ]).unwrap());
//!
//! let good = ClusterChromosome::new(space.clone(), vec![vec![0.0, 0.5], vec![10.0, 0.5]]).unwrap();
//! let poor = ClusterChromosome::new(space, vec![vec![4.0, 0.5], vec![6.0, 0.5]]).unwrap();
//!
//! assert!(good.fitness() > poor.fitness());
//! assert!((good.quantization_error() - 0.5).abs() < 1e-9);
//! ```
pub mod centroid;
pub mod chromosome;
pub mod metrics;
pub mod population;

pub use centroid::{CentroidGenerator, CentroidStrategy, RandomInBounds, ShuffleFromData};
pub use chromosome::ClusterChromosome;
pub use metrics::{ClusterMetrics, FITNESS_EPSILON};
pub use population::CentroidPopulationGenerator;
