//! ChooseScenario - marks the scenario the user committed to.

use std::sync::Arc;
use tracing::info;

use crate::application::handlers::load_decision;
use crate::domain::foundation::{CommandMetadata, DecisionId, DomainError, ScenarioId};
use crate::ports::DecisionRepository;

/// Command to choose a scenario.
#[derive(Debug, Clone)]
pub struct ChooseScenarioCommand {
    pub decision_id: DecisionId,
    pub scenario_id: ScenarioId,
}

/// Handler for scenario choice.
///
/// Un-choosing the prior scenario and choosing the new one commit together
/// under one compare-and-swap, so at most one scenario is ever chosen.
pub struct ChooseScenarioHandler {
    repository: Arc<dyn DecisionRepository>,
}

impl ChooseScenarioHandler {
    pub fn new(repository: Arc<dyn DecisionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: ChooseScenarioCommand,
        metadata: CommandMetadata,
    ) -> Result<(), DomainError> {
        let mut decision = load_decision(self.repository.as_ref(), &cmd.decision_id).await?;
        decision.authorize(&metadata.user_id)?;

        let loaded_revision = decision.revision();
        decision.choose_scenario(cmd.scenario_id)?;
        self.repository.update(&decision, loaded_revision).await?;

        info!(
            decision_id = %cmd.decision_id,
            scenario_id = %cmd.scenario_id,
            "scenario chosen"
        );
        Ok(())
    }
}
