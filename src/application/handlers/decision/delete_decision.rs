//! DeleteDecision - soft-deletes a decision and everything it owns.

use std::sync::Arc;
use tracing::info;

use crate::application::handlers::load_decision;
use crate::domain::foundation::{CommandMetadata, DecisionId, DomainError};
use crate::ports::DecisionRepository;

/// Command to soft-delete a decision.
#[derive(Debug, Clone)]
pub struct DeleteDecisionCommand {
    pub decision_id: DecisionId,
}

/// Handler for soft deletion.
///
/// Scenarios and the outcome are tombstoned with the decision; nothing is
/// hard-deleted, preserving the audit history.
pub struct DeleteDecisionHandler {
    repository: Arc<dyn DecisionRepository>,
}

impl DeleteDecisionHandler {
    pub fn new(repository: Arc<dyn DecisionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: DeleteDecisionCommand,
        metadata: CommandMetadata,
    ) -> Result<(), DomainError> {
        let mut decision = load_decision(self.repository.as_ref(), &cmd.decision_id).await?;
        decision.authorize(&metadata.user_id)?;

        let loaded_revision = decision.revision();
        decision.soft_delete()?;
        self.repository.update(&decision, loaded_revision).await?;

        info!(decision_id = %cmd.decision_id, "decision soft-deleted");
        Ok(())
    }
}
