//! # ClusterRun
//!
//! Drives a complete clustering run: builds generation 0 from a point space,
//! anneals the mutation probability across the generations and records the
//! best chromosome's statistics before every generation and once at the end.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use genclust::evolution::{ClusterRun, ClusteringConfig, EvolutionOptions};
//! use genclust::space::PointSpace;
//!
//! let space = Arc::new(PointSpace::new(vec![
//!     vec![0.0, 0.0],
//!     vec![0.0, 1.0],
//!     vec![10.0, 0.0],
//!     vec![10.0, 1.0],
//! ]).unwrap());
//!
//! let options = EvolutionOptions::builder()
//!     .population_size(10)
//!     .num_generations(5)
//!     .seed(3)
//!     .build();
//!
//! let report = ClusterRun::new(space, ClusteringConfig::new(2), options)
//!     .unwrap()
//!     .run()
//!     .unwrap();
//!
//! assert_eq!(report.history.len(), 6);
//! assert_eq!(report.best.cluster_count(), 2);
//! ```

use std::sync::Arc;

use tracing::info;

use super::{EvolutionOptions, GeneticAlgorithm};
use crate::{
    breeding::ReproductionKind,
    cluster::{CentroidPopulationGenerator, CentroidStrategy, ClusterChromosome},
    error::{GeneticError, Result},
    mutation::MutationKind,
    rng::RandomNumberGenerator,
    selection::SelectorKind,
    space::{Point, PointSpace},
};

/// The engine as assembled from a [`ClusteringConfig`].
pub type ClusterEngine =
    GeneticAlgorithm<ClusterChromosome, ReproductionKind, MutationKind, SelectorKind>;

/// Cluster count plus one variant per strategy family.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusteringConfig {
    pub cluster_count: usize,
    pub centroid_strategy: CentroidStrategy,
    pub selector: SelectorKind,
    pub reproduction: ReproductionKind,
    pub mutation: MutationKind,
}

impl ClusteringConfig {
    /// Random-in-bounds centroids, roulette selection, average crossover and
    /// Gaussian noise.
    pub fn new(cluster_count: usize) -> Self {
        Self {
            cluster_count,
            centroid_strategy: CentroidStrategy::default(),
            selector: SelectorKind::default(),
            reproduction: ReproductionKind::default(),
            mutation: MutationKind::default(),
        }
    }

    pub fn with_centroid_strategy(mut self, centroid_strategy: CentroidStrategy) -> Self {
        self.centroid_strategy = centroid_strategy;
        self
    }

    pub fn with_selector(mut self, selector: SelectorKind) -> Self {
        self.selector = selector;
        self
    }

    pub fn with_reproduction(mut self, reproduction: ReproductionKind) -> Self {
        self.reproduction = reproduction;
        self
    }

    pub fn with_mutation(mut self, mutation: MutationKind) -> Self {
        self.mutation = mutation;
        self
    }

    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error if the cluster count is not
    /// in `[1, space.len()]`, is 1 while swap mutation is selected, or a
    /// strategy carries out-of-range parameters.
    pub fn validate(&self, space: &PointSpace) -> Result<()> {
        if self.cluster_count == 0 || self.cluster_count > space.len() {
            return Err(GeneticError::Configuration(format!(
                "Cluster count must be in [1, {}], got {}",
                space.len(),
                self.cluster_count
            )));
        }
        if self.mutation == MutationKind::Swap && self.cluster_count < 2 {
            return Err(GeneticError::Configuration(
                "Swap mutation needs at least two centroids".to_string(),
            ));
        }
        self.selector.validate()?;
        self.mutation.validate()
    }
}

/// The best chromosome of one generation, as plain numbers.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationStats {
    pub generation: usize,
    pub fitness: f64,
    pub quantization_error: f64,
    pub intra_cluster_distance: f64,
    pub inter_cluster_distance: f64,
    pub empty_clusters: usize,
    pub centroids: Vec<Point>,
}

impl GenerationStats {
    pub fn capture(generation: usize, best: &ClusterChromosome) -> Self {
        let metrics = best.metrics();
        Self {
            generation,
            fitness: metrics.fitness(),
            quantization_error: metrics.quantization_error(),
            intra_cluster_distance: metrics.intra_cluster_distance(),
            inter_cluster_distance: metrics.inter_cluster_distance(),
            empty_clusters: metrics.empty_clusters().len(),
            centroids: best.centroids().to_vec(),
        }
    }
}

/// Outcome of [`ClusterRun::run`].
#[derive(Debug, Clone)]
pub struct RunReport {
    /// One entry per generation, plus a final entry after the last one.
    pub history: Vec<GenerationStats>,
    pub best: ClusterChromosome,
}

impl RunReport {
    pub fn initial(&self) -> Option<&GenerationStats> {
        self.history.first()
    }

    pub fn last(&self) -> Option<&GenerationStats> {
        self.history.last()
    }
}

#[derive(Debug, Clone)]
pub struct ClusterRun {
    space: Arc<PointSpace>,
    config: ClusteringConfig,
    options: EvolutionOptions,
}

impl ClusterRun {
    /// Validates the whole configuration before anything is generated.
    pub fn new(
        space: Arc<PointSpace>,
        config: ClusteringConfig,
        options: EvolutionOptions,
    ) -> Result<Self> {
        options.validate()?;
        config.validate(&space)?;

        Ok(Self {
            space,
            config,
            options,
        })
    }

    pub fn config(&self) -> &ClusteringConfig {
        &self.config
    }

    pub fn options(&self) -> &EvolutionOptions {
        &self.options
    }

    /// Builds the engine with generation 0 in place.
    pub fn engine(&self, rng: &mut RandomNumberGenerator) -> Result<ClusterEngine> {
        let generator = CentroidPopulationGenerator::new(
            Arc::clone(&self.space),
            self.config.cluster_count,
            self.config.centroid_strategy,
            self.options.get_population_size(),
        )?;

        GeneticAlgorithm::new(
            &generator,
            self.config.reproduction,
            self.config.mutation,
            self.config.selector,
            self.options.clone(),
            rng,
        )
    }

    pub fn run(&self) -> Result<RunReport> {
        self.run_with(|_| {})
    }

    /// Runs all generations, handing every snapshot to `observer` as it is taken.
    pub fn run_with<F>(&self, mut observer: F) -> Result<RunReport>
    where
        F: FnMut(&GenerationStats),
    {
        let mut rng = match self.options.get_seed() {
            Some(seed) => RandomNumberGenerator::from_seed(seed),
            None => RandomNumberGenerator::new(),
        };
        let mut engine = self.engine(&mut rng)?;

        let total = self.options.get_num_generations();
        let schedule = *self.options.get_mutation_schedule();
        let mut history = Vec::with_capacity(total + 1);

        for generation in 0..total {
            let stats = GenerationStats::capture(generation, engine.best()?);
            observer(&stats);
            info!(
                generation,
                fitness = stats.fitness,
                quantization_error = stats.quantization_error,
                "best of generation"
            );
            history.push(stats);

            engine.next_generation(schedule.probability_at(generation, total))?;
        }

        let best = engine.best()?.clone();
        let stats = GenerationStats::capture(total, &best);
        observer(&stats);
        info!(
            fitness = stats.fitness,
            quantization_error = stats.quantization_error,
            intra_cluster_distance = stats.intra_cluster_distance,
            inter_cluster_distance = stats.inter_cluster_distance,
            "run complete"
        );
        history.push(stats);

        Ok(RunReport { history, best })
    }
}
