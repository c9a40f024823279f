use super::MutationAgent;
use crate::{
    cluster::ClusterChromosome,
    error::{check_probability, GeneticError, Result},
    rng::RandomNumberGenerator,
};

/// Adds zero-mean normal noise to every coordinate of every centroid.
///
/// Along dimension `d` the standard deviation is `fraction * (max_d - min_d)`.
/// With `anneal` set it is further multiplied by the mutation probability, so
/// the noise shrinks together with the mutation schedule. Results are not
/// clamped back into the data bounds.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianNoise {
    fraction: f64,
    anneal: bool,
}

impl GaussianNoise {
    pub const DEFAULT_FRACTION: f64 = 0.05;

    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error if `fraction` is negative
    /// or not finite.
    pub fn new(fraction: f64) -> Result<Self> {
        let noise = Self {
            fraction,
            anneal: false,
        };
        noise.validate()?;
        Ok(noise)
    }

    /// Checks a value that may not have gone through [`GaussianNoise::new`].
    pub fn validate(&self) -> Result<()> {
        if !self.fraction.is_finite() || self.fraction < 0.0 {
            return Err(GeneticError::Configuration(format!(
                "Noise fraction must be finite and non-negative, got {}",
                self.fraction
            )));
        }
        Ok(())
    }

    pub fn with_annealing(mut self) -> Self {
        self.anneal = true;
        self
    }

    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    pub fn is_annealing(&self) -> bool {
        self.anneal
    }

    fn scale(&self, probability: f64) -> f64 {
        if self.anneal {
            self.fraction * probability
        } else {
            self.fraction
        }
    }
}

impl Default for GaussianNoise {
    fn default() -> Self {
        Self {
            fraction: Self::DEFAULT_FRACTION,
            anneal: false,
        }
    }
}

impl MutationAgent<ClusterChromosome> for GaussianNoise {
    fn mutate(
        &self,
        chromosome: &mut ClusterChromosome,
        probability: f64,
        rng: &mut RandomNumberGenerator,
    ) -> Result<()> {
        check_probability(probability, "Mutation probability")?;
        self.validate()?;

        if !rng.chance(probability) {
            return Ok(());
        }

        let scale = self.scale(probability);
        let sigmas: Vec<f64> = chromosome
            .space()
            .bounds()
            .iter()
            .map(|bound| scale * bound.range())
            .collect();

        chromosome.update_centroids(|centroids| {
            for centroid in centroids.iter_mut() {
                for (coord, sigma) in centroid.iter_mut().zip(&sigmas) {
                    *coord += sigma * rng.standard_normal();
                }
            }
        })
    }

    fn check(&self, _sample: &ClusterChromosome) -> Result<()> {
        self.validate()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::space::PointSpace;

    fn chromosome() -> ClusterChromosome {
        let space = Arc::new(
            PointSpace::new(vec![vec![0.0, 0.0], vec![10.0, 4.0], vec![5.0, 2.0]]).unwrap(),
        );
        ClusterChromosome::new(space, vec![vec![1.0, 1.0], vec![9.0, 3.0]]).unwrap()
    }

    #[test]
    fn test_zero_sigma_is_identity() {
        let original = chromosome();
        let mut mutated = original.clone();
        let noise = GaussianNoise::new(0.0).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(51);

        for _ in 0..20 {
            noise.mutate(&mut mutated, 1.0, &mut rng).unwrap();
        }
        assert_eq!(mutated, original);
    }

    #[test]
    fn test_positive_sigma_moves_every_coordinate() {
        let original = chromosome();
        let mut mutated = original.clone();
        let mut rng = RandomNumberGenerator::from_seed(52);

        GaussianNoise::default().mutate(&mut mutated, 1.0, &mut rng).unwrap();

        for (a, b) in mutated.centroids().iter().zip(original.centroids()) {
            for (x, y) in a.iter().zip(b) {
                assert_ne!(x, y);
                assert!(x.is_finite());
            }
        }
    }

    #[test]
    fn test_zero_probability_skips_mutation() {
        let original = chromosome();
        let mut mutated = original.clone();
        let mut rng = RandomNumberGenerator::from_seed(53);

        GaussianNoise::new(1.0).unwrap().mutate(&mut mutated, 0.0, &mut rng).unwrap();
        assert_eq!(mutated, original);
    }

    #[test]
    fn test_annealing_scales_with_probability() {
        let noise = GaussianNoise::new(0.5).unwrap().with_annealing();

        assert!((noise.scale(1.0) - 0.5).abs() < f64::EPSILON);
        assert!((noise.scale(0.1) - 0.05).abs() < 1e-12);
        assert!((GaussianNoise::new(0.5).unwrap().scale(0.1) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_fraction() {
        assert!(GaussianNoise::new(-0.1).is_err());
        assert!(GaussianNoise::new(f64::NAN).is_err());
    }

    #[test]
    fn test_out_of_range_fraction_is_rejected() {
        assert!(GaussianNoise::new(-0.1).is_err());
        assert!(GaussianNoise::new(f64::NAN).is_err());

        let noise = GaussianNoise {
            fraction: -3.0,
            anneal: true,
        };
        let mut mutated = chromosome();
        let mut rng = RandomNumberGenerator::from_seed(8);

        assert!(matches!(noise.validate(), Err(GeneticError::Configuration(_))));
        assert!(matches!(noise.check(&mutated), Err(GeneticError::Configuration(_))));
        assert!(matches!(
            noise.mutate(&mut mutated, 1.0, &mut rng),
            Err(GeneticError::Configuration(_))
        ));
    }
}

