//! RecordRollback - flags a completed decision as rolled back.

use std::sync::Arc;
use tracing::info;

use crate::application::handlers::load_decision;
use crate::domain::foundation::{CommandMetadata, DecisionId, DomainError, Timestamp};
use crate::ports::DecisionRepository;

/// Command to record a rollback on a completed decision.
#[derive(Debug, Clone)]
pub struct RecordRollbackCommand {
    pub decision_id: DecisionId,
    pub reason: String,
    /// When the rollback took effect; defaults to now.
    pub rollback_at: Option<Timestamp>,
}

/// Handler for rollback events.
///
/// The status stays `completed`; only a rollback-flagged event is appended.
pub struct RecordRollbackHandler {
    repository: Arc<dyn DecisionRepository>,
}

impl RecordRollbackHandler {
    pub fn new(repository: Arc<dyn DecisionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: RecordRollbackCommand,
        metadata: CommandMetadata,
    ) -> Result<(), DomainError> {
        let mut decision = load_decision(self.repository.as_ref(), &cmd.decision_id).await?;
        decision.authorize(&metadata.user_id)?;

        let loaded_revision = decision.revision();
        decision.record_rollback(
            cmd.reason,
            metadata.user_id.clone(),
            cmd.rollback_at.unwrap_or_else(Timestamp::now),
        )?;
        self.repository.update(&decision, loaded_revision).await?;

        info!(decision_id = %cmd.decision_id, "rollback recorded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryDecisionRepository;
    use crate::application::handlers::testing;
    use crate::domain::decision::DecisionStatus;
    use crate::domain::foundation::ErrorCode;

    async fn completed_decision(repo: &InMemoryDecisionRepository) -> DecisionId {
        let mut decision = testing::sample_decision();
        decision
            .transition_status(DecisionStatus::Approved, "go", testing::owner(), None)
            .unwrap();
        decision
            .transition_status(DecisionStatus::Completed, "done", testing::owner(), None)
            .unwrap();
        repo.save(&decision).await.unwrap();
        *decision.id()
    }

    #[tokio::test]
    async fn rollback_keeps_completed_status_and_flags_event() {
        let repo = Arc::new(InMemoryDecisionRepository::new());
        let id = completed_decision(&repo).await;
        let handler = RecordRollbackHandler::new(repo.clone());

        handler
            .handle(
                RecordRollbackCommand {
                    decision_id: id,
                    reason: "customer backlash".to_string(),
                    rollback_at: None,
                },
                testing::metadata(),
            )
            .await
            .unwrap();

        let stored = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.status(), DecisionStatus::Completed);
        assert!(stored.status_events().last().unwrap().is_rollback());
    }

    #[tokio::test]
    async fn rollback_on_pending_decision_fails() {
        let repo = Arc::new(InMemoryDecisionRepository::new());
        let decision = testing::sample_decision();
        repo.save(&decision).await.unwrap();
        let handler = RecordRollbackHandler::new(repo);

        let err = handler
            .handle(
                RecordRollbackCommand {
                    decision_id: *decision.id(),
                    reason: "oops".to_string(),
                    rollback_at: None,
                },
                testing::metadata(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidStateTransition);
    }
}
