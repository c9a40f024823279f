use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;
use crate::selection::selector::FitnessSelector;

/// Tournament selection.
///
/// Draws `tournament_size` individuals uniformly with replacement and returns
/// the fittest, ties going to the first drawn. A tournament of size 1 is plain
/// uniform selection. A tournament at least as large as the population always
/// returns the global best (first one on ties) without sampling.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TournamentSelection {
    tournament_size: usize,
}

impl TournamentSelection {
    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error if `tournament_size` is 0.
    pub fn new(tournament_size: usize) -> Result<Self> {
        let selection = Self { tournament_size };
        selection.validate()?;
        Ok(selection)
    }

    /// Checks a tournament that may not have gone through [`TournamentSelection::new`].
    pub fn validate(&self) -> Result<()> {
        if self.tournament_size < 1 {
            return Err(GeneticError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }

    fn is_better(candidate: f64, incumbent: f64) -> bool {
        candidate > incumbent || (incumbent.is_nan() && !candidate.is_nan())
    }

    fn global_best(fitness: &[f64]) -> usize {
        let mut best_idx = 0;
        for (idx, &score) in fitness.iter().enumerate().skip(1) {
            if Self::is_better(score, fitness[best_idx]) {
                best_idx = idx;
            }
        }
        best_idx
    }
}

impl Default for TournamentSelection {
    fn default() -> Self {
        Self { tournament_size: 2 }
    }
}

impl FitnessSelector for TournamentSelection {
    fn select_index(&self, fitness: &[f64], rng: &mut RandomNumberGenerator) -> Result<usize> {
        if fitness.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }
        self.validate()?;

        if self.tournament_size >= fitness.len() {
            return Ok(Self::global_best(fitness));
        }

        let mut best_idx = rng.index(fitness.len());
        for _ in 1..self.tournament_size {
            let idx = rng.index(fitness.len());
            if Self::is_better(fitness[idx], fitness[best_idx]) {
                best_idx = idx;
            }
        }

        Ok(best_idx)
    }
}
