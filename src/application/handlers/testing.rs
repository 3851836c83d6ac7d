//! Shared fixtures for handler tests.

use std::sync::Arc;

use crate::domain::decision::{
    Decision, DecisionContext, ModelMeta, RiskOutlook, SupportingDetails, Verdict,
};
use crate::domain::elasticity::{ElasticityConfig, PricingGoal};
use crate::domain::foundation::{
    CommandMetadata, Currency, DecisionId, Score, UserId,
};
use crate::domain::simulation::{SimulationEngine, SimulationInput};

pub(crate) fn owner() -> UserId {
    UserId::new("founder@acme.test").unwrap()
}

pub(crate) fn metadata() -> CommandMetadata {
    CommandMetadata::new(owner()).with_source("test")
}

pub(crate) fn metadata_for(user: &str) -> CommandMetadata {
    CommandMetadata::new(UserId::new(user).unwrap())
}

pub(crate) fn engine() -> Arc<SimulationEngine> {
    Arc::new(SimulationEngine::new(ElasticityConfig::shared_default()))
}

pub(crate) fn pricing() -> SimulationInput {
    SimulationInput {
        current_price: 79.0,
        new_price: 99.0,
        active_customers: 423,
        currency: Currency::usd(),
        global_mrr: 0.0,
        global_churn_rate: 0.04,
        goal: PricingGoal::Base,
    }
}

pub(crate) fn sample_verdict() -> Verdict {
    Verdict::new(
        "Raise to $99".to_string(),
        "Feature depth supports the move.".to_string(),
        Score::new(0.7),
        "Apply to new signups".to_string(),
        vec!["Underpriced for the segment".to_string()],
        RiskOutlook {
            risk_score: Score::new(0.4),
            description: "Short churn bump expected".to_string(),
        },
        SupportingDetails {
            expected_revenue_impact: "ARR up 8-15%".to_string(),
            churn_outlook: "Temporary".to_string(),
            market_positioning: "Mid-market".to_string(),
        },
    )
    .unwrap()
}

pub(crate) fn sample_model_meta() -> ModelMeta {
    ModelMeta {
        model: "verdict-v2".to_string(),
        prompt_version: "2025-05".to_string(),
        inference_ms: 420,
    }
}

pub(crate) fn sample_decision() -> Decision {
    Decision::new(
        DecisionId::new(),
        owner(),
        "Acme Analytics".to_string(),
        Some("acme.test".to_string()),
        pricing(),
        DecisionContext::empty(),
        "initial intake",
        sample_verdict(),
        sample_model_meta(),
    )
    .unwrap()
}
