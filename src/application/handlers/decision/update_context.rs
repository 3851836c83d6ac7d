//! UpdateContext - appends a context version to a decision.

use std::sync::Arc;
use tracing::debug;

use crate::application::handlers::load_decision;
use crate::domain::decision::DecisionContext;
use crate::domain::foundation::{CommandMetadata, DecisionId, DomainError};
use crate::ports::DecisionRepository;

/// Command to append a context version.
#[derive(Debug, Clone)]
pub struct UpdateContextCommand {
    pub decision_id: DecisionId,
    pub context: DecisionContext,
    pub reason: String,
}

/// Handler for context updates.
pub struct UpdateContextHandler {
    repository: Arc<dyn DecisionRepository>,
}

impl UpdateContextHandler {
    pub fn new(repository: Arc<dyn DecisionRepository>) -> Self {
        Self { repository }
    }

    /// Appends the version and returns its number.
    pub async fn handle(
        &self,
        cmd: UpdateContextCommand,
        metadata: CommandMetadata,
    ) -> Result<u32, DomainError> {
        let mut decision = load_decision(self.repository.as_ref(), &cmd.decision_id).await?;
        decision.authorize(&metadata.user_id)?;

        let loaded_revision = decision.revision();
        let version = decision.append_context_version(cmd.context, cmd.reason)?;
        self.repository.update(&decision, loaded_revision).await?;

        debug!(decision_id = %cmd.decision_id, version, "context version appended");
        Ok(version)
    }
}
