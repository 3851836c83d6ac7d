//! Outcome command and query handlers.

mod get_effective_outcomes;
mod record_outcome;
mod update_kpi_actual;

pub use get_effective_outcomes::{GetEffectiveOutcomesHandler, GetEffectiveOutcomesQuery};
pub use record_outcome::{RecordOutcomeCommand, RecordOutcomeHandler};
pub use update_kpi_actual::{UpdateKpiActualCommand, UpdateKpiActualHandler};

use tracing::warn;

use crate::domain::decision::Decision;
use crate::ports::LearningFeed;

/// Publishes the decision's delta report to the learning collaborator.
///
/// Best effort: the learning signal must never fail a user operation, so
/// publish failures are logged and swallowed.
pub(crate) async fn publish_deltas(feed: &dyn LearningFeed, decision: &Decision) {
    let Some(report) = decision.delta_report() else {
        return;
    };
    if let Err(err) = feed.publish(&report).await {
        warn!(
            decision_id = %decision.id(),
            error = %err,
            "failed to publish delta report to learning feed"
        );
    }
}
