//! # Error Types
//!
//! This module defines the error type shared by the engine, the clustering
//! genotype and every strategy family.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use genclust::error::{GeneticError, Result};
//!
//! fn pick_k(k: usize, points: usize) -> Result<usize> {
//!     if k == 0 || k > points {
//!         return Err(GeneticError::Configuration(format!(
//!             "Cluster count {} must be in [1, {}]",
//!             k, points
//!         )));
//!     }
//!     Ok(k)
//! }
//!
//! assert!(pick_k(3, 10).is_ok());
//! assert!(pick_k(0, 10).is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use genclust::error::{GeneticError, OptionExt};
//!
//! fn first_fitness(fitness: &[f64]) -> genclust::error::Result<f64> {
//!     fitness.first().copied().ok_or_else_genetic(|| GeneticError::EmptyPopulation)
//! }
//!
//! assert!(first_fitness(&[]).is_err());
//! ```

use thiserror::Error;

/// Represents errors that can occur while evolving cluster solutions.
///
/// Fatal conditions only. A cluster left without any assigned point is a
/// recoverable condition: offspring are repaired by
/// [`ClusterChromosome::reseed_empty_clusters`](crate::cluster::ClusterChromosome::reseed_empty_clusters)
/// and whatever remains is reported through
/// [`ClusterMetrics::empty_clusters`](crate::cluster::ClusterMetrics::empty_clusters).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneticError {
    /// An invalid configuration value: k, population size, tournament size,
    /// mutation probability, or mismatched genotype shapes.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A strategy received input that breaks one of its structural invariants.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// A centroid coordinate became NaN or infinite.
    #[error("Numeric instability: {0}")]
    NumericInstability(String),

    /// Error that occurs when a maximum number of attempts is reached.
    #[error("Maximum attempts reached: {0}")]
    MaxAttemptsReached(String),
}

/// A specialized Result type for genetic algorithm operations.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, GeneticError>` using
    /// a closure to generate the error.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}

/// Checks that `probability` is a valid Bernoulli parameter.
pub(crate) fn check_probability(probability: f64, what: &str) -> Result<()> {
    if !(0.0..=1.0).contains(&probability) {
        return Err(GeneticError::Configuration(format!(
            "{} must be in [0, 1], got {}",
            what, probability
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_probability() {
        assert!(check_probability(0.0, "p").is_ok());
        assert!(check_probability(1.0, "p").is_ok());
        assert!(check_probability(-0.1, "p").is_err());
        assert!(check_probability(f64::NAN, "p").is_err());

        match check_probability(1.5, "Mutation probability") {
            Err(GeneticError::Configuration(msg)) => {
                assert!(msg.contains("Mutation probability"))
            }
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_option_ext() {
        let none: Option<u8> = None;
        assert_eq!(
            none.ok_or_else_genetic(|| GeneticError::EmptyPopulation),
            Err(GeneticError::EmptyPopulation)
        );
        assert_eq!(Some(3).ok_or_else_genetic(|| GeneticError::EmptyPopulation), Ok(3));
    }
}
