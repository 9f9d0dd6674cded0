//! Bug world simulation engine.
//!
//! A toroidal grid of resource cells grazed by bugs that turn according to
//! a six-gene genome, age, reproduce with mutation and starve. [`World`]
//! owns every piece and advances them one cycle per [`World::step`].

pub mod genome;
pub mod grid;
pub mod history;
pub mod organism;
pub mod population;
pub mod reseed;
pub mod world;

pub use genome::Genome;
pub use grid::Grid;
pub use history::{History, HistoryEntry};
pub use organism::{Organism, OrganismSnapshot};
pub use population::{LifecycleSummary, Population};
pub use reseed::{ReseedOutcome, ReseedScheduler};
pub use world::{RunTotals, StepOutcome, StepStats, World};
