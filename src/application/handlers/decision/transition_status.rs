//! TransitionStatus - moves a decision through its lifecycle.

use std::sync::Arc;
use tracing::info;

use crate::application::handlers::load_decision;
use crate::domain::decision::DecisionStatus;
use crate::domain::foundation::{CommandMetadata, DecisionId, DomainError, Timestamp};
use crate::ports::DecisionRepository;

/// Command to transition a decision's status.
#[derive(Debug, Clone)]
pub struct TransitionStatusCommand {
    pub decision_id: DecisionId,
    pub target: DecisionStatus,
    pub reason: String,
    pub implemented_at: Option<Timestamp>,
}

/// Handler for status transitions.
///
/// The status change and its audit event commit together under one
/// compare-and-swap; an invalid transition changes nothing.
pub struct TransitionStatusHandler {
    repository: Arc<dyn DecisionRepository>,
}

impl TransitionStatusHandler {
    pub fn new(repository: Arc<dyn DecisionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: TransitionStatusCommand,
        metadata: CommandMetadata,
    ) -> Result<(), DomainError> {
        let mut decision = load_decision(self.repository.as_ref(), &cmd.decision_id).await?;
        decision.authorize(&metadata.user_id)?;

        let loaded_revision = decision.revision();
        decision.transition_status(
            cmd.target,
            cmd.reason,
            metadata.user_id.clone(),
            cmd.implemented_at,
        )?;
        self.repository.update(&decision, loaded_revision).await?;

        info!(
            decision_id = %cmd.decision_id,
            status = %cmd.target,
            "decision status changed"
        );
        Ok(())
    }
}
