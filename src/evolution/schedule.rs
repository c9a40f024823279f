//! Mutation probability schedules.

use crate::error::{check_probability, GeneticError, Result};

/// How the mutation probability evolves over a run.
///
/// The linear schedule starts at `start` and loses `(start - floor) / G` per
/// generation over a run of `G` generations, approaching `floor` at the end.
///
/// ```rust
/// use genclust::evolution::MutationSchedule;
///
/// let schedule = MutationSchedule::default();
/// assert_eq!(schedule.probability_at(0, 100), 1.0);
/// assert!((schedule.probability_at(50, 100) - 0.505).abs() < 1e-12);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MutationSchedule {
    Constant(f64),
    Linear { start: f64, floor: f64 },
}

impl MutationSchedule {
    pub const DEFAULT_START: f64 = 1.0;
    pub const DEFAULT_FLOOR: f64 = 0.01;

    /// Probability to pass to the engine for `generation` of a `total`-generation run.
    pub fn probability_at(&self, generation: usize, total: usize) -> f64 {
        match *self {
            MutationSchedule::Constant(p) => p,
            MutationSchedule::Linear { start, floor } => {
                if total == 0 {
                    return start;
                }
                let progress = generation.min(total) as f64 / total as f64;
                (start - (start - floor) * progress).max(floor)
            }
        }
    }

    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error if a probability lies
    /// outside `[0, 1]` or the linear floor is above its start.
    pub fn validate(&self) -> Result<()> {
        match *self {
            MutationSchedule::Constant(p) => check_probability(p, "Mutation probability"),
            MutationSchedule::Linear { start, floor } => {
                check_probability(start, "Schedule start")?;
                check_probability(floor, "Schedule floor")?;
                if floor > start {
                    return Err(GeneticError::Configuration(format!(
                        "Schedule floor {} is above its start {}",
                        floor, start
                    )));
                }
                Ok(())
            }
        }
    }
}

impl Default for MutationSchedule {
    fn default() -> Self {
        MutationSchedule::Linear {
            start: Self::DEFAULT_START,
            floor: Self::DEFAULT_FLOOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_schedule_is_non_increasing() {
        let schedule = MutationSchedule::default();
        let probabilities: Vec<f64> = (0..=20).map(|g| schedule.probability_at(g, 20)).collect();

        assert_eq!(probabilities[0], 1.0);
        assert!(probabilities.windows(2).all(|w| w[1] <= w[0]));
        assert!((probabilities[20] - 0.01).abs() < 1e-12);
        assert!((schedule.probability_at(1, 20) - (1.0 - 0.99 / 20.0)).abs() < 1e-12);
        assert!((schedule.probability_at(40, 20) - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_constant_schedule() {
        let schedule = MutationSchedule::Constant(0.3);
        assert_eq!(schedule.probability_at(0, 10), 0.3);
        assert_eq!(schedule.probability_at(9, 10), 0.3);
    }

    #[test]
    fn test_validation() {
        assert!(MutationSchedule::default().validate().is_ok());
        assert!(MutationSchedule::Constant(1.2).validate().is_err());
        assert!(MutationSchedule::Linear { start: 0.2, floor: 0.5 }.validate().is_err());
        assert!(MutationSchedule::Linear { start: 1.0, floor: -0.1 }.validate().is_err());
    }
}
