//! Decision command and query handlers.

mod compare_decisions;
mod create_decision;
mod delete_decision;
mod record_rollback;
mod regenerate_verdict;
mod transition_status;
mod update_context;

pub use compare_decisions::{CompareDecisionsHandler, CompareDecisionsQuery};
pub use create_decision::{CreateDecisionCommand, CreateDecisionHandler};
pub use delete_decision::{DeleteDecisionCommand, DeleteDecisionHandler};
pub use record_rollback::{RecordRollbackCommand, RecordRollbackHandler};
pub use regenerate_verdict::{RegenerateVerdictCommand, RegenerateVerdictHandler};
pub use transition_status::{TransitionStatusCommand, TransitionStatusHandler};
pub use update_context::{UpdateContextCommand, UpdateContextHandler};

use crate::domain::decision::{ModelMeta, RiskOutlook, SupportingDetails, Verdict};
use crate::domain::foundation::{DomainError, Score};
use crate::ports::VerdictDraft;

/// Assembles a domain verdict from a collaborator draft.
///
/// Scores are validated here; an out-of-range score is the collaborator
/// misbehaving, so it surfaces as a `Dependency` error rather than a
/// validation failure of the caller's input. Labels are never taken from
/// the draft - they derive from the scores on access.
pub(crate) fn verdict_from_draft(
    draft: VerdictDraft,
) -> Result<(Verdict, ModelMeta), DomainError> {
    let confidence = Score::try_new(draft.confidence_score).map_err(|_| {
        DomainError::dependency(format!(
            "Inference returned an out-of-range confidence score: {}",
            draft.confidence_score
        ))
    })?;
    let risk = Score::try_new(draft.risk_score).map_err(|_| {
        DomainError::dependency(format!(
            "Inference returned an out-of-range risk score: {}",
            draft.risk_score
        ))
    })?;

    let verdict = Verdict::new(
        draft.headline,
        draft.summary,
        confidence,
        draft.cta,
        draft.why_this_decision,
        RiskOutlook {
            risk_score: risk,
            description: draft.risk_description,
        },
        SupportingDetails {
            expected_revenue_impact: draft.expected_revenue_impact,
            churn_outlook: draft.churn_outlook,
            market_positioning: draft.market_positioning,
        },
    )
    .map_err(|err| DomainError::dependency(format!("Inference returned a bad verdict: {}", err)))?;

    let model_meta = ModelMeta {
        model: draft.model,
        prompt_version: draft.prompt_version,
        inference_ms: draft.inference_ms,
    };
    Ok((verdict, model_meta))
}
