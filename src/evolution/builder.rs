use crate::{
    breeding::ReproductionAgent,
    chromosome::Chromosome,
    error::{GeneticError, Result},
    mutation::MutationAgent,
    rng::RandomNumberGenerator,
    selection::ChromosomeSelector,
};

use super::{EvolutionOptions, GeneticAlgorithm, PopulationGenerator};

/// Fluent construction of a [`GeneticAlgorithm`].
pub struct GeneticAlgorithmBuilder<C, R, M, S>
where
    C: Chromosome,
    R: ReproductionAgent<C>,
    M: MutationAgent<C>,
    S: ChromosomeSelector<C>,
{
    reproduction_agent: Option<R>,
    mutation_agent: Option<M>,
    selector: Option<S>,
    options: Option<EvolutionOptions>,
    _marker: std::marker::PhantomData<C>,
}

impl<C, R, M, S> GeneticAlgorithmBuilder<C, R, M, S>
where
    C: Chromosome,
    R: ReproductionAgent<C>,
    M: MutationAgent<C>,
    S: ChromosomeSelector<C>,
{
    pub fn new() -> Self {
        Self {
            reproduction_agent: None,
            mutation_agent: None,
            selector: None,
            options: None,
            _marker: std::marker::PhantomData,
        }
    }

    pub fn with_reproduction_agent(mut self, reproduction_agent: R) -> Self {
        self.reproduction_agent = Some(reproduction_agent);
        self
    }

    pub fn with_mutation_agent(mut self, mutation_agent: M) -> Self {
        self.mutation_agent = Some(mutation_agent);
        self
    }

    pub fn with_selector(mut self, selector: S) -> Self {
        self.selector = Some(selector);
        self
    }

    pub fn with_options(mut self, options: EvolutionOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Builds the engine and its generation 0.
    ///
    /// Without explicit options the defaults are used, sized to the generator.
    pub fn build<G>(
        self,
        generator: &G,
        rng: &mut RandomNumberGenerator,
    ) -> Result<GeneticAlgorithm<C, R, M, S>>
    where
        G: PopulationGenerator<C>,
    {
        let reproduction_agent = self.reproduction_agent.ok_or_else(|| {
            GeneticError::Configuration("Reproduction agent not specified".to_string())
        })?;

        let mutation_agent = self.mutation_agent.ok_or_else(|| {
            GeneticError::Configuration("Mutation agent not specified".to_string())
        })?;

        let selector = self
            .selector
            .ok_or_else(|| GeneticError::Configuration("Selector not specified".to_string()))?;

        let options = self.options.unwrap_or_else(|| {
            EvolutionOptions::builder()
                .population_size(generator.size())
                .build()
        });

        GeneticAlgorithm::new(
            generator,
            reproduction_agent,
            mutation_agent,
            selector,
            options,
            rng,
        )
    }
}

impl<C, R, M, S> Default for GeneticAlgorithmBuilder<C, R, M, S>
where
    C: Chromosome,
    R: ReproductionAgent<C>,
    M: MutationAgent<C>,
    S: ChromosomeSelector<C>,
{
    fn default() -> Self {
        Self::new()
    }
}
