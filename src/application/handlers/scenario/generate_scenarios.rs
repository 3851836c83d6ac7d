//! GenerateScenarios - builds the strategic scenario set for a decision.

use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::application::handlers::{load_decision, with_inference_timeout};
use crate::domain::elasticity::PricingGoal;
use crate::domain::foundation::{CommandMetadata, DecisionId, DomainError, ScenarioId};
use crate::domain::scenario::{Scenario, ScenarioName};
use crate::domain::simulation::SimulationEngine;
use crate::ports::{
    DecisionRepository, InferenceProvider, LimitedAction, NarrativeRequest, UsageGate,
};

/// Command to generate scenarios for a decision.
#[derive(Debug, Clone)]
pub struct GenerateScenariosCommand {
    pub decision_id: DecisionId,
    /// Custom goal set; defaults to the three canonical goals.
    pub goals: Option<Vec<PricingGoal>>,
}

/// Handler for scenario generation.
///
/// Generate-then-commit: every scenario is fully simulated and narrated
/// before the aggregate is touched, so cancellation or a failing narrative
/// call can never leave a decision with a partially generated set.
/// Regeneration replaces prior unchosen scenarios and preserves a chosen
/// one untouched, since outcomes may already reference it.
pub struct GenerateScenariosHandler {
    repository: Arc<dyn DecisionRepository>,
    inference: Arc<dyn InferenceProvider>,
    usage_gate: Arc<dyn UsageGate>,
    engine: Arc<SimulationEngine>,
    inference_timeout: Duration,
}

impl GenerateScenariosHandler {
    pub fn new(
        repository: Arc<dyn DecisionRepository>,
        inference: Arc<dyn InferenceProvider>,
        usage_gate: Arc<dyn UsageGate>,
        engine: Arc<SimulationEngine>,
        inference_timeout: Duration,
    ) -> Self {
        Self {
            repository,
            inference,
            usage_gate,
            engine,
            inference_timeout,
        }
    }

    /// Generates the set and returns the new scenario ids.
    pub async fn handle(
        &self,
        cmd: GenerateScenariosCommand,
        metadata: CommandMetadata,
    ) -> Result<Vec<ScenarioId>, DomainError> {
        let mut decision = load_decision(self.repository.as_ref(), &cmd.decision_id).await?;
        decision.authorize(&metadata.user_id)?;
        self.usage_gate
            .check(&metadata.user_id, LimitedAction::GenerateScenarios)
            .await?;

        let goals = match cmd.goals {
            None => PricingGoal::ALL.to_vec(),
            Some(goals) => Self::validate_custom_goals(goals)?,
        };

        // Build everything up front; the aggregate is only touched once the
        // full set exists.
        let mut scenarios = Vec::with_capacity(goals.len());
        for goal in goals {
            let simulation = self.engine.simulate(&decision.pricing().with_goal(goal))?;
            let name = ScenarioName::from_goal(goal);
            let request = NarrativeRequest::from_simulation(
                decision.company_name(),
                name.clone(),
                &simulation,
            );
            let narrative = with_inference_timeout(
                self.inference_timeout,
                self.inference.generate_scenario_narrative(&request),
            )
            .await?;
            scenarios.push(Scenario::new(name, goal, narrative, simulation));
        }
        let ids: Vec<ScenarioId> = scenarios.iter().map(|s| s.id).collect();

        let loaded_revision = decision.revision();
        decision.replace_unchosen_scenarios(scenarios)?;
        self.repository.update(&decision, loaded_revision).await?;

        info!(
            decision_id = %cmd.decision_id,
            count = ids.len(),
            "scenarios generated"
        );
        Ok(ids)
    }

    /// Custom sets carry two to four distinct goals.
    fn validate_custom_goals(goals: Vec<PricingGoal>) -> Result<Vec<PricingGoal>, DomainError> {
        if goals.len() < 2 || goals.len() > 4 {
            return Err(DomainError::validation(
                "goals",
                "A custom scenario set must contain between 2 and 4 goals",
            ));
        }
        for (i, goal) in goals.iter().enumerate() {
            if goals[..i].contains(goal) {
                return Err(DomainError::validation(
                    "goals",
                    format!("Duplicate goal '{}' in custom scenario set", goal),
                ));
            }
        }
        Ok(goals)
    }
}
