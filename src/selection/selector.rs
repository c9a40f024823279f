use std::fmt::Debug;

use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

use super::{RouletteSelection, TournamentSelection};

/// Picks an index from a slice of fitness scores.
///
/// Implementors only see the scores, never the chromosomes, so one selector
/// serves every chromosome type through [`ChromosomeSelector`].
pub trait FitnessSelector: Debug + Send + Sync {
    /// Picks the index of one individual given the population's fitness scores.
    ///
    /// `fitness` is never empty when called through [`ChromosomeSelector::select`].
    fn select_index(&self, fitness: &[f64], rng: &mut RandomNumberGenerator) -> Result<usize>;
}

/// Trait for parent selection strategies.
///
/// A selector picks one chromosome at a time, biased toward fitness. The
/// chromosome stays in the population, so repeated calls sample with
/// replacement. Every [`FitnessSelector`] is a `ChromosomeSelector`.
///
/// # Examples
///
/// ```
/// use genclust::chromosome::Chromosome;
/// use genclust::rng::RandomNumberGenerator;
/// use genclust::selection::{ChromosomeSelector, TournamentSelection};
///
/// #[derive(Clone, Debug)]
/// struct Scalar(f64);
///
/// impl Chromosome for Scalar {
///     fn fitness(&self) -> f64 {
///         self.0
///     }
/// }
///
/// let population = vec![Scalar(0.5), Scalar(0.8), Scalar(0.3)];
/// let fitness: Vec<f64> = population.iter().map(Chromosome::fitness).collect();
/// let mut rng = RandomNumberGenerator::from_seed(1);
///
/// let selection = TournamentSelection::new(3).unwrap();
/// let winner = selection.select(&population, &fitness, &mut rng).unwrap();
/// assert_eq!(winner.0, 0.8);
/// ```
pub trait ChromosomeSelector<C>: FitnessSelector
where
    C: Chromosome,
{
    /// Picks one individual from `population`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The population is empty
    /// - The fitness vector length doesn't match the population length
    fn select<'a>(
        &self,
        population: &'a [C],
        fitness: &[f64],
        rng: &mut RandomNumberGenerator,
    ) -> Result<&'a C> {
        if population.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        if fitness.len() != population.len() {
            return Err(GeneticError::InvariantViolation(format!(
                "Fitness vector length ({}) doesn't match population length ({})",
                fitness.len(),
                population.len()
            )));
        }

        let idx = self.select_index(fitness, rng)?;
        population.get(idx).ok_or_else(|| {
            GeneticError::InvariantViolation(format!("Selected index {} is out of range", idx))
        })
    }
}

impl<C: Chromosome, S: FitnessSelector> ChromosomeSelector<C> for S {}

/// The selection variant chosen for a run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectorKind {
    #[default]
    Roulette,
    Tournament(TournamentSelection),
}

impl SelectorKind {
    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error if the variant's
    /// parameters are out of range.
    pub fn validate(&self) -> Result<()> {
        match self {
            SelectorKind::Roulette => Ok(()),
            SelectorKind::Tournament(tournament) => tournament.validate(),
        }
    }
}

impl FitnessSelector for SelectorKind {
    fn select_index(&self, fitness: &[f64], rng: &mut RandomNumberGenerator) -> Result<usize> {
        match self {
            SelectorKind::Roulette => RouletteSelection.select_index(fitness, rng),
            SelectorKind::Tournament(tournament) => tournament.select_index(fitness, rng),
        }
    }
}
