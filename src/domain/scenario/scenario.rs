//! Scenario entity - one named strategic option attached to a decision.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::elasticity::PricingGoal;
use crate::domain::foundation::{ScenarioId, Timestamp};
use crate::domain::simulation::{RiskLevel, SimulationResult};

/// Name of a strategic scenario.
///
/// The three canonical names map to the pricing goals; custom scenario sets
/// carry their own labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioName {
    Conservative,
    Base,
    Aggressive,
    Custom(String),
}

impl ScenarioName {
    /// Canonical name for a pricing goal.
    pub fn from_goal(goal: PricingGoal) -> Self {
        match goal {
            PricingGoal::Conservative => ScenarioName::Conservative,
            PricingGoal::Base => ScenarioName::Base,
            PricingGoal::Aggressive => ScenarioName::Aggressive,
        }
    }

    /// Returns the display label.
    pub fn label(&self) -> &str {
        match self {
            ScenarioName::Conservative => "Conservative",
            ScenarioName::Base => "Base",
            ScenarioName::Aggressive => "Aggressive",
            ScenarioName::Custom(name) => name,
        }
    }
}

impl fmt::Display for ScenarioName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Narrative fields for a scenario, produced by the inference collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioNarrative {
    /// One-paragraph description of the strategic option.
    pub description: String,
    /// Why a business in this situation would pick it.
    pub rationale: String,
    /// Concrete things to watch after implementing.
    pub watchouts: Vec<String>,
}

/// One elasticity-projected strategic option.
///
/// Belongs to exactly one decision. At most one scenario per decision is
/// `chosen` at a time; the aggregate enforces that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: ScenarioId,
    pub name: ScenarioName,
    pub goal: PricingGoal,
    pub description: String,
    pub rationale: String,
    pub watchouts: Vec<String>,
    pub projection: SimulationResult,
    pub risk_level: RiskLevel,
    pub chosen: bool,
    pub created_at: Timestamp,
}

impl Scenario {
    /// Creates an unchosen scenario from a projection and its narrative.
    pub fn new(
        name: ScenarioName,
        goal: PricingGoal,
        narrative: ScenarioNarrative,
        projection: SimulationResult,
    ) -> Self {
        let risk_level = projection.risk_level;
        Self {
            id: ScenarioId::new(),
            name,
            goal,
            description: narrative.description,
            rationale: narrative.rationale,
            watchouts: narrative.watchouts,
            projection,
            risk_level,
            chosen: false,
            created_at: Timestamp::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::elasticity::ElasticityConfig;
    use crate::domain::foundation::Currency;
    use crate::domain::simulation::{SimulationEngine, SimulationInput};

    fn projection(goal: PricingGoal) -> SimulationResult {
        let engine = SimulationEngine::new(ElasticityConfig::shared_default());
        engine
            .simulate(&SimulationInput {
                current_price: 79.0,
                new_price: 99.0,
                active_customers: 423,
                currency: Currency::usd(),
                global_mrr: 0.0,
                global_churn_rate: 0.04,
                goal,
            })
            .unwrap()
    }

    fn narrative() -> ScenarioNarrative {
        ScenarioNarrative {
            description: "Raise to $99".to_string(),
            rationale: "Captures value from the current feature set".to_string(),
            watchouts: vec!["Watch logo churn in the first 60 days".to_string()],
        }
    }

    #[test]
    fn scenario_name_maps_from_goal() {
        assert_eq!(
            ScenarioName::from_goal(PricingGoal::Aggressive),
            ScenarioName::Aggressive
        );
    }

    #[test]
    fn scenario_name_custom_label() {
        let name = ScenarioName::Custom("Land and expand".to_string());
        assert_eq!(name.label(), "Land and expand");
    }

    #[test]
    fn new_scenario_starts_unchosen() {
        let s = Scenario::new(
            ScenarioName::Base,
            PricingGoal::Base,
            narrative(),
            projection(PricingGoal::Base),
        );
        assert!(!s.chosen);
    }

    #[test]
    fn new_scenario_inherits_projection_risk() {
        let p = projection(PricingGoal::Aggressive);
        let expected = p.risk_level;
        let s = Scenario::new(
            ScenarioName::Aggressive,
            PricingGoal::Aggressive,
            narrative(),
            p,
        );
        assert_eq!(s.risk_level, expected);
    }

    #[test]
    fn scenarios_get_unique_ids() {
        let a = Scenario::new(
            ScenarioName::Base,
            PricingGoal::Base,
            narrative(),
            projection(PricingGoal::Base),
        );
        let b = Scenario::new(
            ScenarioName::Base,
            PricingGoal::Base,
            narrative(),
            projection(PricingGoal::Base),
        );
        assert_ne!(a.id, b.id);
    }
}
