//! Inference provider port - interface for verdict and narrative generation.
//!
//! Abstracts the LLM-backed collaborator that turns context and simulation
//! results into verdict drafts and scenario narratives. The collaborator may
//! be slow or unreliable; its failures surface as `Dependency` errors so
//! callers can retry with backoff instead of treating them as permanent.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::decision::DecisionContext;
use crate::domain::elasticity::PricingGoal;
use crate::domain::foundation::DomainError;
use crate::domain::scenario::{ScenarioName, ScenarioNarrative};
use crate::domain::simulation::{RiskLevel, SimulationResult};

/// Port for the verdict/narrative inference collaborator.
#[async_trait]
pub trait InferenceProvider: Send + Sync {
    /// Generates a verdict draft from the current context and simulation.
    async fn generate_verdict(
        &self,
        context: &DecisionContext,
        simulation: &SimulationResult,
    ) -> Result<VerdictDraft, InferenceError>;

    /// Generates the narrative fields for one scenario.
    async fn generate_scenario_narrative(
        &self,
        request: &NarrativeRequest,
    ) -> Result<ScenarioNarrative, InferenceError>;
}

/// Raw verdict content as produced by the collaborator.
///
/// Scores are unvalidated here; the domain validates them when assembling
/// the `Verdict` and derives labels from them fresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerdictDraft {
    pub headline: String,
    pub summary: String,
    pub confidence_score: f64,
    pub cta: String,
    pub why_this_decision: Vec<String>,
    pub risk_score: f64,
    pub risk_description: String,
    pub expected_revenue_impact: String,
    pub churn_outlook: String,
    pub market_positioning: String,
    /// Model that produced the draft.
    pub model: String,
    pub prompt_version: String,
    pub inference_ms: u64,
}

/// Inputs for one scenario's narrative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeRequest {
    pub company_name: String,
    pub scenario_name: ScenarioName,
    pub goal: PricingGoal,
    pub price_change_pct: f64,
    pub risk_level: RiskLevel,
    pub customer_count_min: i64,
    pub customer_count_max: i64,
}

impl NarrativeRequest {
    /// Builds a request from a simulation for one goal.
    pub fn from_simulation(
        company_name: impl Into<String>,
        name: ScenarioName,
        simulation: &SimulationResult,
    ) -> Self {
        let (count_min, count_max) = simulation
            .levels
            .values()
            .fold((i64::MAX, i64::MIN), |(lo, hi), level| {
                (
                    lo.min(level.new_customer_count_min),
                    hi.max(level.new_customer_count_max),
                )
            });
        Self {
            company_name: company_name.into(),
            scenario_name: name,
            goal: simulation.goal,
            price_change_pct: simulation.price_change_pct,
            risk_level: simulation.risk_level,
            customer_count_min: count_min,
            customer_count_max: count_max,
        }
    }
}

/// Errors from the inference collaborator.
#[derive(Debug, Clone, Error)]
pub enum InferenceError {
    /// Rate limited by the provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },

    /// Failed to parse the provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl InferenceError {
    /// Creates a rate-limited error.
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a timeout error.
    pub fn timeout(timeout_secs: u32) -> Self {
        Self::Timeout { timeout_secs }
    }
}

impl From<InferenceError> for DomainError {
    fn from(err: InferenceError) -> Self {
        DomainError::dependency(format!("Inference collaborator failed: {}", err))
            .with_detail("source", "inference")
    }
}
