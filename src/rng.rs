//! # RandomNumberGenerator
//!
//! The `RandomNumberGenerator` struct wraps the `rand` crate's `StdRng` and
//! provides the handful of draws the strategies need.
//!
//! ## Example
//!
//! ```rust
//! use genclust::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(7);
//! let x = rng.uniform(-1.0, 1.0);
//! assert!((-1.0..=1.0).contains(&x));
//! ```
//!
//! ## Sub-streams
//!
//! Offspring are produced from independent sub-streams derived from a run seed
//! and the `(generation, slot)` pair, so a run yields the same population no
//! matter in which order, or on which thread, the slots are filled:
//!
//! ```rust
//! use genclust::rng::RandomNumberGenerator;
//!
//! let mut a = RandomNumberGenerator::substream(42, 3, 9);
//! let mut b = RandomNumberGenerator::substream(42, 3, 9);
//! assert_eq!(a.index(1000), b.index(1000));
//! ```

use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::StandardNormal;

const GENERATION_MIX: u64 = 0x9E37_79B9_7F4A_7C15;
const SLOT_MIX: u64 = 0xC2B2_AE3D_27D4_EB4F;

/// A wrapper around the `rand` crate's `StdRng`.
#[derive(Clone, Debug)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// This is useful for reproducible tests and benchmarks.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Derives an independent generator for one offspring slot of one generation.
    pub fn substream(run_seed: u64, generation: u64, slot: u64) -> Self {
        let mixed = splitmix(
            run_seed ^ generation.wrapping_add(1).wrapping_mul(GENERATION_MIX)
                ^ slot.wrapping_add(1).wrapping_mul(SLOT_MIX),
        );
        Self::from_seed(mixed)
    }

    /// Draws a fresh `u64`, used to seed a run.
    pub fn next_seed(&mut self) -> u64 {
        self.rng.gen()
    }

    /// Draws uniformly from the closed interval `[from, to]`.
    ///
    /// A degenerate interval (`from == to`) returns `from`.
    pub fn uniform(&mut self, from: f64, to: f64) -> f64 {
        if from >= to {
            return from;
        }
        self.rng.gen_range(from..=to)
    }

    /// Draws uniformly from the half-open interval `[0, upper)`.
    pub fn unit_interval(&mut self, upper: f64) -> f64 {
        if upper <= 0.0 {
            return 0.0;
        }
        self.rng.gen_range(0.0..upper)
    }

    /// Draws an index uniformly from `[0, len)`. `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    /// Draws an index uniformly from the closed range `[low, high]`.
    pub fn index_between(&mut self, low: usize, high: usize) -> usize {
        self.rng.gen_range(low..=high)
    }

    /// A single Bernoulli trial with success probability `p`, clamped into `[0, 1]`.
    pub fn chance(&mut self, p: f64) -> bool {
        if p.is_nan() {
            return false;
        }
        self.rng.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Draws from the standard normal distribution.
    pub fn standard_normal(&mut self) -> f64 {
        self.rng.sample(StandardNormal)
    }

    /// Samples `amount` distinct indices from `[0, len)` without replacement.
    pub fn sample_distinct(&mut self, len: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.rng, len, amount).into_vec()
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn splitmix(mut z: u64) -> u64 {
    z = z.wrapping_add(GENERATION_MIX);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
