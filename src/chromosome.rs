//! # Chromosome Trait
//!
//! The `Chromosome` trait is the contract the engine needs from a genotype:
//! a fitness score (higher is better) and a way to check that the genotype is
//! still numerically sound. Crossover and mutation are not methods of the
//! genotype; they live in the [`ReproductionAgent`](crate::breeding::ReproductionAgent)
//! and [`MutationAgent`](crate::mutation::MutationAgent) strategy families so
//! that the variants can be swapped independently.
//!
//! ## Example
//!
//! ```rust
//! use genclust::chromosome::Chromosome;
//!
//! #[derive(Clone, Debug)]
//! struct Scalar {
//!     value: f64,
//! }
//!
//! impl Chromosome for Scalar {
//!     fn fitness(&self) -> f64 {
//!         -(self.value - 2.0).powi(2)
//!     }
//! }
//!
//! assert!(Scalar { value: 2.0 }.fitness() > Scalar { value: 0.0 }.fitness());
//! ```

use std::fmt::Debug;

use crate::error::Result;

/// Trait for types that represent individuals in the genetic algorithm.
///
/// Types implementing this trait must also implement `Clone`, `Debug`, `Send`, and `Sync`
/// so that populations can be evaluated and bred on the rayon pool.
pub trait Chromosome: Clone + Debug + Send + Sync {
    /// Returns the fitness of this chromosome. Higher is better.
    ///
    /// Implementations may compute the score lazily, but repeated calls on an
    /// unchanged chromosome must return the same value.
    fn fitness(&self) -> f64;

    /// Checks that the genotype is usable.
    ///
    /// The engine calls this on every offspring. An offspring that fails with
    /// [`GeneticError::NumericInstability`](crate::error::GeneticError::NumericInstability)
    /// is discarded and bred again; any other error is fatal.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Brings a freshly bred offspring back into a usable shape.
    ///
    /// Called by the engine after [`Chromosome::validate`] succeeded. The
    /// default does nothing.
    fn repair(&mut self) -> Result<()> {
        Ok(())
    }
}
