pub mod builder;
pub mod engine;
pub mod generator;
pub mod options;
pub mod run;
pub mod schedule;

pub use builder::GeneticAlgorithmBuilder;
pub use engine::{EngineState, GeneticAlgorithm};
pub use generator::PopulationGenerator;
pub use options::{EvolutionOptions, EvolutionOptionsBuilder};
pub use run::{ClusterEngine, ClusterRun, ClusteringConfig, GenerationStats, RunReport};
pub use schedule::MutationSchedule;
