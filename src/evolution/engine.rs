use tracing::{debug, info, warn};

use super::{generator::PopulationGenerator, options::EvolutionOptions};
use crate::{
    breeding::ReproductionAgent,
    chromosome::Chromosome,
    error::{check_probability, GeneticError, OptionExt, Result},
    mutation::MutationAgent,
    rng::RandomNumberGenerator,
    selection::ChromosomeSelector,
};
use rayon::prelude::*;

/// Where the engine is in its generational cycle.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// A population is in place but its fitness may not have been computed.
    Initialized,
    /// Every chromosome of the current population has been evaluated.
    Ready,
}

/// Runs the generational loop over a population of chromosomes.
///
/// The engine only knows the strategy traits; which variants are plugged in
/// is decided by whoever builds it. It has no stopping condition of its own:
/// the caller decides how many times to call [`GeneticAlgorithm::next_generation`].
#[derive(Debug, Clone)]
pub struct GeneticAlgorithm<C, R, M, S>
where
    C: Chromosome,
    R: ReproductionAgent<C>,
    M: MutationAgent<C>,
    S: ChromosomeSelector<C>,
{
    population: Vec<C>,
    reproduction: R,
    mutation: M,
    selector: S,
    options: EvolutionOptions,
    generation: usize,
    run_seed: u64,
    state: EngineState,
}

impl<C, R, M, S> GeneticAlgorithm<C, R, M, S>
where
    C: Chromosome,
    R: ReproductionAgent<C>,
    M: MutationAgent<C>,
    S: ChromosomeSelector<C>,
{
    /// Builds generation 0 and validates the strategies against it.
    ///
    /// # Arguments
    ///
    /// * `generator` - Builds the initial population.
    /// * `reproduction` - Combines two parents into one offspring.
    /// * `mutation` - Perturbs offspring.
    /// * `selector` - Picks parents.
    /// * `options` - Run parameters; validated here.
    /// * `rng` - Source of the initial population and of the run seed.
    ///
    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error if the options are invalid,
    /// the generator's size differs from the configured population size, the
    /// generator yields no chromosome, or the mutation agent cannot work on the
    /// generated chromosomes.
    pub fn new<G>(
        generator: &G,
        reproduction: R,
        mutation: M,
        selector: S,
        options: EvolutionOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Self>
    where
        G: PopulationGenerator<C>,
    {
        options.validate()?;
        if generator.size() != options.get_population_size() {
            return Err(GeneticError::Configuration(format!(
                "Generator builds {} chromosomes but the options ask for {}",
                generator.size(),
                options.get_population_size()
            )));
        }

        let population = generator.generate(rng)?;
        let sample = population.first().ok_or_else_genetic(|| {
            GeneticError::Configuration("Population size cannot be zero".to_string())
        })?;
        if population.len() != generator.size() {
            return Err(GeneticError::InvariantViolation(format!(
                "Generator promised {} chromosomes but produced {}",
                generator.size(),
                population.len()
            )));
        }
        mutation.check(sample)?;

        let run_seed = rng.next_seed();
        debug!(size = population.len(), "initial population ready");

        Ok(Self {
            population,
            reproduction,
            mutation,
            selector,
            options,
            generation: 0,
            run_seed,
            state: EngineState::Initialized,
        })
    }

    pub fn population(&self) -> &[C] {
        &self.population
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn options(&self) -> &EvolutionOptions {
        &self.options
    }

    /// Computes the fitness of every chromosome of the current population.
    ///
    /// Evaluation runs on the rayon pool once the population reaches the
    /// configured parallel threshold.
    pub fn evaluate(&mut self) {
        if self.state == EngineState::Ready {
            return;
        }

        if self.population.len() >= self.options.get_parallel_threshold() {
            self.population.par_iter().for_each(|chromosome| {
                chromosome.fitness();
            });
        } else {
            self.population.iter().for_each(|chromosome| {
                chromosome.fitness();
            });
        }

        self.state = EngineState::Ready;
    }

    /// Returns the fittest chromosome of the current population.
    ///
    /// Ties go to the lowest index, so repeated calls without an intervening
    /// [`GeneticAlgorithm::next_generation`] return the same chromosome.
    pub fn best(&mut self) -> Result<&C> {
        self.evaluate();
        let idx = self.best_index()?;
        Ok(&self.population[idx])
    }

    fn best_index(&self) -> Result<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (idx, chromosome) in self.population.iter().enumerate() {
            let score = chromosome.fitness();
            let better = match best {
                None => true,
                Some((_, incumbent)) => {
                    score > incumbent || (incumbent.is_nan() && !score.is_nan())
                }
            };
            if better {
                best = Some((idx, score));
            }
        }

        best.map(|(idx, _)| idx)
            .ok_or_else_genetic(|| GeneticError::EmptyPopulation)
    }

    /// Replaces the population with a new one of the same size.
    ///
    /// Each offspring slot selects two parents, reproduces, and mutates the
    /// child with `mutation_probability`. With elitism enabled the current best
    /// chromosome takes the first slot unchanged. Offspring that turn out
    /// numerically unstable are discarded and bred again; the others go
    /// through [`Chromosome::repair`] before they join the new population.
    ///
    /// # Errors
    ///
    /// Returns an error if `mutation_probability` is outside `[0, 1]`, if a
    /// strategy fails, or if an offspring slot stays unstable after the
    /// configured number of attempts. The current population and generation
    /// counter are left untouched on error.
    pub fn next_generation(&mut self, mutation_probability: f64) -> Result<()> {
        check_probability(mutation_probability, "Mutation probability")?;
        self.evaluate();

        let fitness: Vec<f64> = self.population.iter().map(Chromosome::fitness).collect();
        let elite = if self.options.is_elitist() {
            Some(self.best_index()?)
        } else {
            None
        };

        let size = self.population.len();
        let offspring_count = size - usize::from(elite.is_some());
        let generation = self.generation as u64;
        let run_seed = self.run_seed;

        let breed_slot = |slot: usize| -> Result<C> {
            let mut rng = RandomNumberGenerator::substream(run_seed, generation, slot as u64);
            self.breed_offspring(&fitness, mutation_probability, &mut rng)
        };

        let offspring: Vec<C> = if size >= self.options.get_parallel_threshold() {
            (0..offspring_count)
                .into_par_iter()
                .map(breed_slot)
                .collect::<Result<_>>()?
        } else {
            (0..offspring_count).map(breed_slot).collect::<Result<_>>()?
        };

        let mut next = Vec::with_capacity(size);
        if let Some(idx) = elite {
            next.push(self.population[idx].clone());
        }
        next.extend(offspring);

        self.population = next;
        self.generation += 1;
        self.state = EngineState::Initialized;

        info!(
            generation = self.generation,
            mutation_probability,
            elitism = elite.is_some(),
            "generation complete"
        );

        Ok(())
    }

    fn breed_offspring(
        &self,
        fitness: &[f64],
        mutation_probability: f64,
        rng: &mut RandomNumberGenerator,
    ) -> Result<C> {
        let max_attempts = self.options.get_max_regeneration_attempts();

        for attempt in 1..=max_attempts {
            let first = self.selector.select(&self.population, fitness, rng)?;
            let second = self.selector.select(&self.population, fitness, rng)?;

            let child = self
                .reproduction
                .reproduce(first, second, rng)
                .and_then(|mut child| {
                    self.mutation.mutate(&mut child, mutation_probability, rng)?;
                    child.validate()?;
                    child.repair()?;
                    Ok(child)
                });

            match child {
                Ok(child) => return Ok(child),
                Err(GeneticError::NumericInstability(reason)) => {
                    warn!(attempt, %reason, "discarding numerically unstable offspring");
                }
                Err(e) => return Err(e),
            }
        }

        Err(GeneticError::MaxAttemptsReached(format!(
            "No numerically stable offspring after {} attempts",
            max_attempts
        )))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Scalar {
        value: f64,
    }

    impl Chromosome for Scalar {
        fn fitness(&self) -> f64 {
            -(self.value - 2.0).abs()
        }

        fn validate(&self) -> Result<()> {
            if self.value.is_finite() {
                Ok(())
            } else {
                Err(GeneticError::NumericInstability("value".to_string()))
            }
        }
    }

    struct Fixed(Vec<f64>);

    impl PopulationGenerator<Scalar> for Fixed {
        fn size(&self) -> usize {
            self.0.len()
        }

        fn generate(&self, _rng: &mut RandomNumberGenerator) -> Result<Vec<Scalar>> {
            Ok(self.0.iter().map(|&value| Scalar { value }).collect())
        }
    }

    #[derive(Debug)]
    struct Mean;

    impl ReproductionAgent<Scalar> for Mean {
        fn reproduce(
            &self,
            first: &Scalar,
            second: &Scalar,
            _rng: &mut RandomNumberGenerator,
        ) -> Result<Scalar> {
            Ok(Scalar {
                value: (first.value + second.value) / 2.0,
            })
        }
    }

    #[derive(Debug)]
    struct Jitter;

    impl MutationAgent<Scalar> for Jitter {
        fn mutate(
            &self,
            chromosome: &mut Scalar,
            probability: f64,
            rng: &mut RandomNumberGenerator,
        ) -> Result<()> {
            if rng.chance(probability) {
                chromosome.value += rng.uniform(-0.5, 0.5);
            }
            Ok(())
        }
    }

    /// Produces NaN for the first `failures` mutations.
    #[derive(Debug)]
    struct Poison {
        failures: usize,
        calls: AtomicUsize,
    }

    impl MutationAgent<Scalar> for Poison {
        fn mutate(
            &self,
            chromosome: &mut Scalar,
            _probability: f64,
            _rng: &mut RandomNumberGenerator,
        ) -> Result<()> {
            if self.calls.fetch_add(1, Ordering::SeqCst) < self.failures {
                chromosome.value = f64::NAN;
            }
            Ok(())
        }
    }

    fn options(elitism: bool) -> EvolutionOptions {
        sized_options(8, elitism)
    }

    fn sized_options(population_size: usize, elitism: bool) -> EvolutionOptions {
        EvolutionOptions::builder()
            .population_size(population_size)
            .num_generations(10)
            .elitism(elitism)
            .build()
    }

    fn engine(
        elitism: bool,
        seed: u64,
    ) -> GeneticAlgorithm<Scalar, Mean, Jitter, crate::selection::TournamentSelection> {
        let mut rng = RandomNumberGenerator::from_seed(seed);
        GeneticAlgorithm::new(
            &Fixed(vec![-4.0, -1.0, 0.0, 3.5, 6.0, 8.0, 9.0, 12.0]),
            Mean,
            Jitter,
            crate::selection::TournamentSelection::new(2).unwrap(),
            options(elitism),
            &mut rng,
        )
        .unwrap()
    }

    #[test]
    fn test_state_transitions() {
        let mut engine = engine(true, 1);
        assert_eq!(engine.state(), EngineState::Initialized);
        assert_eq!(engine.generation(), 0);

        engine.evaluate();
        assert_eq!(engine.state(), EngineState::Ready);

        engine.next_generation(0.5).unwrap();
        assert_eq!(engine.state(), EngineState::Initialized);
        assert_eq!(engine.generation(), 1);
        assert_eq!(engine.population().len(), 8);
    }

    #[test]
    fn test_best_is_idempotent() {
        let mut engine = engine(true, 2);
        let first = engine.best().unwrap().clone();
        let second = engine.best().unwrap().clone();

        assert_eq!(first, second);
        assert_eq!(first.value, 3.5);
    }

    #[test]
    fn test_elitism_never_loses_the_best() {
        let mut engine = engine(true, 3);
        let mut previous = engine.best().unwrap().fitness();

        for _ in 0..15 {
            engine.next_generation(1.0).unwrap();
            let current = engine.best().unwrap().fitness();
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn test_same_seed_same_population() {
        let mut a = engine(false, 4);
        let mut b = engine(false, 4);

        for _ in 0..5 {
            a.next_generation(0.7).unwrap();
            b.next_generation(0.7).unwrap();
        }
        assert_eq!(a.population(), b.population());
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let build = |threshold: usize| {
            let mut rng = RandomNumberGenerator::from_seed(5);
            let options = EvolutionOptions::builder()
                .population_size(8)
                .parallel_threshold(threshold)
                .build();
            GeneticAlgorithm::new(
                &Fixed(vec![-4.0, -1.0, 0.0, 3.5, 6.0, 8.0, 9.0, 12.0]),
                Mean,
                Jitter,
                crate::selection::TournamentSelection::new(3).unwrap(),
                options,
                &mut rng,
            )
            .unwrap()
        };

        let mut sequential = build(usize::MAX);
        let mut parallel = build(1);
        for _ in 0..4 {
            sequential.next_generation(0.9).unwrap();
            parallel.next_generation(0.9).unwrap();
        }

        assert_eq!(sequential.population(), parallel.population());
    }

    #[test]
    fn test_invalid_probability_leaves_state_untouched() {
        let mut engine = engine(true, 6);
        let before = engine.population().to_vec();

        assert!(matches!(
            engine.next_generation(1.5),
            Err(GeneticError::Configuration(_))
        ));
        assert_eq!(engine.generation(), 0);
        assert_eq!(engine.population(), before.as_slice());
    }

    #[test]
    fn test_empty_population_is_rejected() {
        let mut rng = RandomNumberGenerator::from_seed(7);
        let result = GeneticAlgorithm::new(
            &Fixed(Vec::new()),
            Mean,
            Jitter,
            crate::selection::TournamentSelection::default(),
            sized_options(0, true),
            &mut rng,
        );

        match result {
            Err(GeneticError::Configuration(msg)) => {
                assert!(msg.contains("Population size cannot be zero"))
            }
            other => panic!("Expected Configuration error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_generator_size_must_match_options() {
        let mut rng = RandomNumberGenerator::from_seed(10);
        let result = GeneticAlgorithm::new(
            &Fixed(vec![1.0, 2.0, 3.0]),
            Mean,
            Jitter,
            crate::selection::TournamentSelection::default(),
            sized_options(50, true),
            &mut rng,
        );

        match result {
            Err(GeneticError::Configuration(msg)) => {
                assert!(msg.contains("Generator builds 3 chromosomes but the options ask for 50"))
            }
            other => panic!("Expected Configuration error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_unstable_offspring_are_regenerated() {
        let mut rng = RandomNumberGenerator::from_seed(8);
        let mut engine = GeneticAlgorithm::new(
            &Fixed(vec![1.0, 2.0, 3.0]),
            Mean,
            Poison {
                failures: 4,
                calls: AtomicUsize::new(0),
            },
            crate::selection::TournamentSelection::default(),
            sized_options(3, false),
            &mut rng,
        )
        .unwrap();

        engine.next_generation(1.0).unwrap();
        assert!(engine.population().iter().all(|c| c.value.is_finite()));
    }

    #[test]
    fn test_persistent_instability_fails_without_mutating_state() {
        let mut rng = RandomNumberGenerator::from_seed(9);
        let options = EvolutionOptions::builder()
            .population_size(3)
            .elitism(false)
            .max_regeneration_attempts(3)
            .build();
        let mut engine = GeneticAlgorithm::new(
            &Fixed(vec![1.0, 2.0, 3.0]),
            Mean,
            Poison {
                failures: usize::MAX,
                calls: AtomicUsize::new(0),
            },
            crate::selection::TournamentSelection::default(),
            options,
            &mut rng,
        )
        .unwrap();

        assert!(matches!(
            engine.next_generation(1.0),
            Err(GeneticError::MaxAttemptsReached(_))
        ));
        assert_eq!(engine.generation(), 0);
        assert_eq!(
            engine.population(),
            &[Scalar { value: 1.0 }, Scalar { value: 2.0 }, Scalar { value: 3.0 }]
        );
    }
}
