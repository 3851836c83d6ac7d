//! CompareDecisions - side-by-side read projection across decisions.

use std::sync::Arc;

use futures::future::try_join_all;

use crate::application::handlers::load_decision;
use crate::domain::decision::ComparisonView;
use crate::domain::foundation::{CommandMetadata, DecisionId, DomainError};
use crate::ports::DecisionRepository;

/// Query for a comparison view.
#[derive(Debug, Clone)]
pub struct CompareDecisionsQuery {
    pub decision_ids: Vec<DecisionId>,
}

/// Handler for decision comparison.
///
/// Read-only; fails with `DecisionNotFound` if any id is missing or
/// soft-deleted.
pub struct CompareDecisionsHandler {
    repository: Arc<dyn DecisionRepository>,
}

impl CompareDecisionsHandler {
    pub fn new(repository: Arc<dyn DecisionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: CompareDecisionsQuery,
        metadata: CommandMetadata,
    ) -> Result<ComparisonView, DomainError> {
        if query.decision_ids.is_empty() {
            return Err(DomainError::validation(
                "decision_ids",
                "At least one decision id is required",
            ));
        }

        let decisions = try_join_all(
            query
                .decision_ids
                .iter()
                .map(|id| load_decision(self.repository.as_ref(), id)),
        )
        .await?;

        for decision in &decisions {
            decision.authorize(&metadata.user_id)?;
        }

        Ok(ComparisonView::build(&decisions))
    }
}
