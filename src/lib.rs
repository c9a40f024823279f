pub mod breeding;
pub mod chromosome;
pub mod cluster;
pub mod error;
pub mod evolution;
pub mod mutation;
pub mod rng;
pub mod selection;
pub mod space;

// Re-export commonly used types for convenience
pub use chromosome::Chromosome;
pub use cluster::ClusterChromosome;
pub use error::{GeneticError, OptionExt, Result};
pub use evolution::{ClusterRun, ClusteringConfig, EvolutionOptions, GeneticAlgorithm};
pub use space::PointSpace;
