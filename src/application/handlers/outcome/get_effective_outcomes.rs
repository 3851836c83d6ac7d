//! GetEffectiveOutcomes - the read-optimized outcome view.

use std::sync::Arc;

use crate::application::handlers::load_decision;
use crate::domain::foundation::{CommandMetadata, DecisionId, DomainError};
use crate::domain::outcome::EffectiveOutcome;
use crate::ports::DecisionRepository;

/// Query for the effective outcome of a decision.
#[derive(Debug, Clone)]
pub struct GetEffectiveOutcomesQuery {
    pub decision_id: DecisionId,
}

/// Handler for the effective-outcome view.
///
/// The only outcome query surface consumers should use; raw outcome history
/// stays audit-only.
pub struct GetEffectiveOutcomesHandler {
    repository: Arc<dyn DecisionRepository>,
}

impl GetEffectiveOutcomesHandler {
    pub fn new(repository: Arc<dyn DecisionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: GetEffectiveOutcomesQuery,
        metadata: CommandMetadata,
    ) -> Result<EffectiveOutcome, DomainError> {
        let decision = load_decision(self.repository.as_ref(), &query.decision_id).await?;
        decision.authorize(&metadata.user_id)?;
        Ok(decision.effective_outcome())
    }
}
