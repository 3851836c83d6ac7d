//! Simulation engine - deterministic, bucketed elasticity projections.

mod engine;
mod result;
mod risk;

pub use engine::SimulationEngine;
pub use result::{LevelProjection, SimulationInput, SimulationResult};
pub use risk::RiskLevel;
