//! Scenario command handlers.

mod choose_scenario;
mod generate_scenarios;

pub use choose_scenario::{ChooseScenarioCommand, ChooseScenarioHandler};
pub use generate_scenarios::{GenerateScenariosCommand, GenerateScenariosHandler};
