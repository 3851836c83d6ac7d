//! Scenario module - named strategic options with elasticity projections.

mod scenario;

pub use scenario::{Scenario, ScenarioName, ScenarioNarrative};
