//! UpdateKpiActual - sets the measured value for one KPI.

use std::sync::Arc;
use tracing::info;

use crate::application::handlers::load_decision;
use crate::domain::foundation::{CommandMetadata, DecisionId, DomainError, ErrorCode};
use crate::domain::outcome::{KpiKey, ScenarioDelta};
use crate::ports::{DecisionRepository, LearningFeed};

use super::publish_deltas;

/// Command to set one KPI's actual measurement.
#[derive(Debug, Clone)]
pub struct UpdateKpiActualCommand {
    pub decision_id: DecisionId,
    /// KPI name, parsed leniently.
    pub kpi_key: String,
    pub actual_value: f64,
}

/// Handler for KPI updates.
pub struct UpdateKpiActualHandler {
    repository: Arc<dyn DecisionRepository>,
    learning_feed: Arc<dyn LearningFeed>,
}

impl UpdateKpiActualHandler {
    pub fn new(
        repository: Arc<dyn DecisionRepository>,
        learning_feed: Arc<dyn LearningFeed>,
    ) -> Self {
        Self {
            repository,
            learning_feed,
        }
    }

    /// Sets the actual and returns the recomputed deltas.
    pub async fn handle(
        &self,
        cmd: UpdateKpiActualCommand,
        metadata: CommandMetadata,
    ) -> Result<Vec<ScenarioDelta>, DomainError> {
        let kpi: KpiKey = cmd.kpi_key.parse().map_err(|_| {
            DomainError::new(ErrorCode::UnknownKpi, "Unknown KPI")
                .with_detail("kpi", cmd.kpi_key.clone())
        })?;

        let mut decision = load_decision(self.repository.as_ref(), &cmd.decision_id).await?;
        decision.authorize(&metadata.user_id)?;

        let loaded_revision = decision.revision();
        decision.set_kpi_actual(kpi, cmd.actual_value)?;
        self.repository.update(&decision, loaded_revision).await?;

        publish_deltas(self.learning_feed.as_ref(), &decision).await;

        info!(decision_id = %cmd.decision_id, kpi = %kpi, "KPI actual updated");
        Ok(decision.compute_deltas())
    }
}
