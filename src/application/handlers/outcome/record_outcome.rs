//! RecordOutcome - upsert-merges measured results into a decision.

use std::sync::Arc;
use tracing::info;

use crate::application::handlers::load_decision;
use crate::domain::foundation::{CommandMetadata, DecisionId, DomainError};
use crate::domain::outcome::{EffectiveOutcome, OutcomePatch};
use crate::ports::{DecisionRepository, LearningFeed};

use super::publish_deltas;

/// Command to record (part of) an outcome.
#[derive(Debug, Clone)]
pub struct RecordOutcomeCommand {
    pub decision_id: DecisionId,
    pub patch: OutcomePatch,
}

/// Handler for outcome recording.
///
/// A decision has one outcome record that evolves over time; each call
/// merges the provided fields into it. After a successful merge the current
/// delta report is pushed to the learning feed, best effort.
pub struct RecordOutcomeHandler {
    repository: Arc<dyn DecisionRepository>,
    learning_feed: Arc<dyn LearningFeed>,
}

impl RecordOutcomeHandler {
    pub fn new(
        repository: Arc<dyn DecisionRepository>,
        learning_feed: Arc<dyn LearningFeed>,
    ) -> Self {
        Self {
            repository,
            learning_feed,
        }
    }

    pub async fn handle(
        &self,
        cmd: RecordOutcomeCommand,
        metadata: CommandMetadata,
    ) -> Result<EffectiveOutcome, DomainError> {
        let mut decision = load_decision(self.repository.as_ref(), &cmd.decision_id).await?;
        decision.authorize(&metadata.user_id)?;

        let loaded_revision = decision.revision();
        decision.record_outcome(&cmd.patch)?;
        self.repository.update(&decision, loaded_revision).await?;

        publish_deltas(self.learning_feed.as_ref(), &decision).await;

        info!(decision_id = %cmd.decision_id, "outcome recorded");
        Ok(decision.effective_outcome())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryDecisionRepository, InMemoryLearningFeed};
    use crate::application::handlers::testing;
    use crate::domain::decision::DecisionStatus;
    use crate::domain::foundation::ErrorCode;
    use std::collections::BTreeMap;

    async fn approved_decision(repo: &InMemoryDecisionRepository) -> DecisionId {
        let mut decision = testing::sample_decision();
        decision
            .transition_status(DecisionStatus::Approved, "go", testing::owner(), None)
            .unwrap();
        repo.save(&decision).await.unwrap();
        *decision.id()
    }

    fn patch_taken() -> OutcomePatch {
        OutcomePatch {
            decision_taken: Some(true),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn two_disjoint_patches_build_one_record() {
        let repo = Arc::new(InMemoryDecisionRepository::new());
        let id = approved_decision(&repo).await;
        let handler =
            RecordOutcomeHandler::new(repo.clone(), Arc::new(InMemoryLearningFeed::new()));

        handler
            .handle(
                RecordOutcomeCommand {
                    decision_id: id,
                    patch: patch_taken(),
                },
                testing::metadata(),
            )
            .await
            .unwrap();
        let view = handler
            .handle(
                RecordOutcomeCommand {
                    decision_id: id,
                    patch: OutcomePatch {
                        notes: Some("done".to_string()),
                        ..Default::default()
                    },
                },
                testing::metadata(),
            )
            .await
            .unwrap();

        let outcome = view.outcome.unwrap();
        assert_eq!(outcome.decision_taken, Some(true));
        assert_eq!(outcome.notes.as_deref(), Some("done"));

        let stored = repo.find_by_id(&id).await.unwrap().unwrap();
        assert!(stored.outcome().is_some());
    }

    #[tokio::test]
    async fn pending_decision_cannot_record_outcomes() {
        let repo = Arc::new(InMemoryDecisionRepository::new());
        let decision = testing::sample_decision();
        repo.save(&decision).await.unwrap();
        let handler =
            RecordOutcomeHandler::new(repo.clone(), Arc::new(InMemoryLearningFeed::new()));

        let err = handler
            .handle(
                RecordOutcomeCommand {
                    decision_id: *decision.id(),
                    patch: patch_taken(),
                },
                testing::metadata(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::OutcomeNotRecordable);
    }

    #[tokio::test]
    async fn learning_feed_failure_does_not_fail_the_operation() {
        let repo = Arc::new(InMemoryDecisionRepository::new());

        // Decision with a chosen scenario so KPI actuals produce deltas.
        let mut decision = testing::sample_decision();
        let engine = testing::engine();
        let scenario = crate::domain::scenario::Scenario::new(
            crate::domain::scenario::ScenarioName::Base,
            crate::domain::elasticity::PricingGoal::Base,
            crate::domain::scenario::ScenarioNarrative {
                description: "base".to_string(),
                rationale: "fits".to_string(),
                watchouts: vec![],
            },
            engine.simulate(&testing::pricing()).unwrap(),
        );
        let scenario_id = scenario.id;
        decision.replace_unchosen_scenarios(vec![scenario]).unwrap();
        decision.choose_scenario(scenario_id).unwrap();
        decision
            .transition_status(DecisionStatus::Approved, "go", testing::owner(), None)
            .unwrap();
        repo.save(&decision).await.unwrap();

        let handler =
            RecordOutcomeHandler::new(repo.clone(), Arc::new(InMemoryLearningFeed::failing()));

        let mut kpi_actuals = BTreeMap::new();
        kpi_actuals.insert("mrr".to_string(), "38000".to_string());
        let view = handler
            .handle(
                RecordOutcomeCommand {
                    decision_id: *decision.id(),
                    patch: OutcomePatch {
                        kpi_actuals,
                        ..Default::default()
                    },
                },
                testing::metadata(),
            )
            .await
            .unwrap();

        assert_eq!(view.deltas.len(), 1);
    }

    #[tokio::test]
    async fn measured_kpis_are_published_to_the_learning_feed() {
        let repo = Arc::new(InMemoryDecisionRepository::new());
        let feed = Arc::new(InMemoryLearningFeed::new());

        let mut decision = testing::sample_decision();
        let engine = testing::engine();
        let scenario = crate::domain::scenario::Scenario::new(
            crate::domain::scenario::ScenarioName::Base,
            crate::domain::elasticity::PricingGoal::Base,
            crate::domain::scenario::ScenarioNarrative {
                description: "base".to_string(),
                rationale: "fits".to_string(),
                watchouts: vec![],
            },
            engine.simulate(&testing::pricing()).unwrap(),
        );
        let scenario_id = scenario.id;
        decision.replace_unchosen_scenarios(vec![scenario]).unwrap();
        decision.choose_scenario(scenario_id).unwrap();
        decision
            .transition_status(DecisionStatus::Approved, "go", testing::owner(), None)
            .unwrap();
        repo.save(&decision).await.unwrap();

        let handler = RecordOutcomeHandler::new(repo.clone(), feed.clone());
        let mut kpi_actuals = BTreeMap::new();
        kpi_actuals.insert("arr".to_string(), "450000".to_string());
        handler
            .handle(
                RecordOutcomeCommand {
                    decision_id: *decision.id(),
                    patch: OutcomePatch {
                        kpi_actuals,
                        ..Default::default()
                    },
                },
                testing::metadata(),
            )
            .await
            .unwrap();

        let reports = feed.reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].decision_id, *decision.id());
        assert_eq!(reports[0].deltas.len(), 1);
    }
}
