//! RegenerateVerdict - appends a fresh verdict version.

use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::application::handlers::{load_decision, with_inference_timeout};
use crate::domain::foundation::{CommandMetadata, DecisionId, DomainError};
use crate::domain::simulation::SimulationEngine;
use crate::ports::{DecisionRepository, InferenceProvider, LimitedAction, UsageGate};

use super::verdict_from_draft;

/// Command to regenerate a decision's verdict.
#[derive(Debug, Clone)]
pub struct RegenerateVerdictCommand {
    pub decision_id: DecisionId,
}

/// Handler for verdict regeneration.
///
/// Re-simulates from the decision's stored pricing inputs and the current
/// context, then appends one verdict version. Either the whole version is
/// appended or, on inference failure/timeout, nothing is.
pub struct RegenerateVerdictHandler {
    repository: Arc<dyn DecisionRepository>,
    inference: Arc<dyn InferenceProvider>,
    usage_gate: Arc<dyn UsageGate>,
    engine: Arc<SimulationEngine>,
    inference_timeout: Duration,
}

impl RegenerateVerdictHandler {
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

    /// Appends the new verdict version and returns its number.
    pub async fn handle(
        &self,
        cmd: RegenerateVerdictCommand,
        metadata: CommandMetadata,
    ) -> Result<u32, DomainError> {
        let mut decision = load_decision(self.repository.as_ref(), &cmd.decision_id).await?;
        decision.authorize(&metadata.user_id)?;
        self.usage_gate
            .check(&metadata.user_id, LimitedAction::RegenerateVerdict)
            .await?;

        let simulation = self.engine.simulate(decision.pricing())?;
        let draft = with_inference_timeout(
            self.inference_timeout,
            self.inference.generate_verdict(decision.context(), &simulation),
        )
        .await?;
        let (verdict, model_meta) = verdict_from_draft(draft)?;

        let loaded_revision = decision.revision();
        let version = decision.append_verdict_version(verdict, model_meta)?;
        self.repository.update(&decision, loaded_revision).await?;

        info!(decision_id = %cmd.decision_id, version, "verdict regenerated");
        Ok(version)
    }
}
