pub mod roulette;
pub mod selector;
pub mod tournament;

pub use roulette::RouletteSelection;
pub use selector::{ChromosomeSelector, FitnessSelector, SelectorKind};
pub use tournament::TournamentSelection;
