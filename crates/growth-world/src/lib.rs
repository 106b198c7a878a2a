//! Growth engine for organic cellular-automaton patterns.
//!
//! A seeded [`Grid`] is advanced one synchronous generation at a time by a
//! [`GrowthEngine`], using a [`RuleSet`] whose neighbor thresholds are bent by
//! static environmental influence fields.

pub mod grid;
pub mod environment;
pub mod rules;
pub mod seeder;
pub mod snapshot;
pub mod engine;
pub mod session;

pub use grid::Grid;
pub use environment::{effective_count, Environment, EnvironmentLayer};
pub use rules::{CountRange, RuleSet};
pub use snapshot::GridSnapshot;
pub use engine::{EngineState, GrowthEngine};
pub use session::{GrowthRun, RunReport};
