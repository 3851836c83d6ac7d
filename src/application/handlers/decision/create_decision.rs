//! CreateDecision - creates a pending decision with its first verdict.

use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::application::handlers::with_inference_timeout;
use crate::domain::decision::{Decision, DecisionContext};
use crate::domain::foundation::{CommandMetadata, DecisionId, DomainError};
use crate::domain::simulation::{SimulationEngine, SimulationInput};
use crate::ports::{DecisionRepository, InferenceProvider, LimitedAction, UsageGate};

use super::verdict_from_draft;

/// Command to create a pricing decision.
#[derive(Debug, Clone)]
pub struct CreateDecisionCommand {
    pub company_name: String,
    pub website: Option<String>,
    pub pricing: SimulationInput,
    pub context: DecisionContext,
}

/// Handler for creating decisions.
///
/// The verdict is generated before anything is persisted; a slow or failing
/// inference collaborator leaves no partial decision behind.
pub struct CreateDecisionHandler {
    repository: Arc<dyn DecisionRepository>,
    inference: Arc<dyn InferenceProvider>,
    usage_gate: Arc<dyn UsageGate>,
    engine: Arc<SimulationEngine>,
    inference_timeout: Duration,
}

impl CreateDecisionHandler {
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

    pub async fn handle(
        &self,
        cmd: CreateDecisionCommand,
        metadata: CommandMetadata,
    ) -> Result<DecisionId, DomainError> {
        // 1. Plan limits gate every quota-bearing mutation.
        self.usage_gate
            .check(&metadata.user_id, LimitedAction::CreateDecision)
            .await?;

        // 2. Deterministic projection (also validates the pricing inputs).
        let simulation = self.engine.simulate(&cmd.pricing)?;

        // 3. First verdict, bounded by the inference timeout.
        let draft = with_inference_timeout(
            self.inference_timeout,
            self.inference.generate_verdict(&cmd.context, &simulation),
        )
        .await?;
        let (verdict, model_meta) = verdict_from_draft(draft)?;

        // 4. Assemble and persist the aggregate at version 1/1.
        let decision = Decision::new(
            DecisionId::new(),
            metadata.user_id.clone(),
            cmd.company_name,
            cmd.website,
            cmd.pricing,
            cmd.context,
            "Decision created",
            verdict,
            model_meta,
        )?;
        self.repository.save(&decision).await?;

        info!(
            decision_id = %decision.id(),
            user_id = %metadata.user_id,
            "decision created"
        );
        Ok(*decision.id())
    }
}
