use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;
use crate::selection::selector::FitnessSelector;

/// Fitness proportionate selection.
///
/// Negative (and NaN) fitness is clamped to 0 before the wheel is built, so an
/// individual with zero fitness can never be picked unless every individual
/// has zero fitness, in which case selection is uniform.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouletteSelection;

impl RouletteSelection {
    pub fn new() -> Self {
        Self
    }

    /// Cumulative clamped fitness; the last entry is the total.
    fn cumulative_fitness(fitness: &[f64]) -> Vec<f64> {
        let mut cumulative = 0.0;
        fitness
            .iter()
            .map(|&f| {
                // NaN.max(0.0) is 0.0
                cumulative += f.max(0.0);
                cumulative
            })
            .collect()
    }
}

impl FitnessSelector for RouletteSelection {
    fn select_index(&self, fitness: &[f64], rng: &mut RandomNumberGenerator) -> Result<usize> {
        if fitness.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        let cumulative = Self::cumulative_fitness(fitness);
        let total = cumulative[cumulative.len() - 1];

        if !total.is_finite() {
            return Err(GeneticError::NumericInstability(
                "Roulette wheel total fitness is not finite".to_string(),
            ));
        }

        if total <= 0.0 {
            return Ok(rng.index(fitness.len()));
        }

        let r = rng.unit_interval(total);
        if let Some(idx) = cumulative.iter().position(|&c| c > r) {
            return Ok(idx);
        }

        // Rounding pushed r onto the total: take the last slice with any width.
        Ok(fitness
            .iter()
            .rposition(|&f| f > 0.0)
            .unwrap_or(fitness.len() - 1))
    }
}
