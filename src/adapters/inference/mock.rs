//! Mock inference provider for testing.
//!
//! Produces deterministic verdict drafts and narratives from its inputs,
//! with optional scripted failures, simulated latency, and call tracking,
//! so handlers and flows can be exercised without a live model.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::decision::DecisionContext;
use crate::domain::scenario::ScenarioNarrative;
use crate::domain::simulation::{RiskLevel, SimulationResult};
use crate::ports::{InferenceError, InferenceProvider, NarrativeRequest, VerdictDraft};

/// Mock inference provider.
///
/// Scripted failures are consumed in order before any successful response.
#[derive(Debug, Clone, Default)]
pub struct MockInferenceProvider {
    failures: Arc<Mutex<VecDeque<InferenceError>>>,
    delay: Duration,
    verdict_calls: Arc<Mutex<u32>>,
    narrative_calls: Arc<Mutex<u32>>,
}

impl MockInferenceProvider {
    /// Creates a provider that always succeeds instantly.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an error for the next call.
    pub fn with_failure(self, error: InferenceError) -> Self {
        self.failures.lock().unwrap().push_back(error);
        self
    }

    /// Adds simulated latency to every call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of verdict generations requested.
    pub fn verdict_calls(&self) -> u32 {
        *self.verdict_calls.lock().unwrap()
    }

    /// Number of narrative generations requested.
    pub fn narrative_calls(&self) -> u32 {
        *self.narrative_calls.lock().unwrap()
    }

    fn take_failure(&self) -> Option<InferenceError> {
        self.failures.lock().unwrap().pop_front()
    }

    fn risk_score_for(level: RiskLevel) -> f64 {
        match level {
            RiskLevel::Low => 0.25,
            RiskLevel::Medium => 0.5,
            RiskLevel::High => 0.8,
        }
    }
}

#[async_trait]
impl InferenceProvider for MockInferenceProvider {
    async fn generate_verdict(
        &self,
        context: &DecisionContext,
        simulation: &SimulationResult,
    ) -> Result<VerdictDraft, InferenceError> {
        *self.verdict_calls.lock().unwrap() += 1;
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
        if let Some(error) = self.take_failure() {
            return Err(error);
        }

        let direction = if simulation.price_change_pct >= 0.0 {
            "Raise"
        } else {
            "Lower"
        };
        // Confidence grows with how much of the context is actually known.
        let confidence = (0.5 + 0.08 * context.resolved_count() as f64).min(0.9);

        Ok(VerdictDraft {
            headline: format!(
                "{} your price to {} {:.0}",
                direction, simulation.currency, simulation.new_price
            ),
            summary: format!(
                "A {:.1}% change with {} risk for your stage.",
                simulation.price_change_pct, simulation.risk_level
            ),
            confidence_score: confidence,
            cta: "Apply to new signups first".to_string(),
            why_this_decision: vec![
                format!("{} active customers anchor the projection", simulation.active_customers),
                format!("{} goal selected", simulation.goal),
            ],
            risk_score: Self::risk_score_for(simulation.risk_level),
            risk_description: format!("{} risk price move", simulation.risk_level),
            expected_revenue_impact: "Revenue impact within the projected band".to_string(),
            churn_outlook: "Churn normalizes after the adjustment window".to_string(),
            market_positioning: "Stays within the segment's price corridor".to_string(),
            model: "mock-verdict-1".to_string(),
            prompt_version: "mock".to_string(),
            inference_ms: self.delay.as_millis() as u64,
        })
    }

    async fn generate_scenario_narrative(
        &self,
        request: &NarrativeRequest,
    ) -> Result<ScenarioNarrative, InferenceError> {
        *self.narrative_calls.lock().unwrap() += 1;
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
        if let Some(error) = self.take_failure() {
            return Err(error);
        }

        Ok(ScenarioNarrative {
            description: format!(
                "{}: a {:.1}% price change for {}",
                request.scenario_name, request.price_change_pct, request.company_name
            ),
            rationale: format!("Fits the {} posture", request.goal),
            watchouts: vec![format!(
                "{} risk: watch customer count staying within {}-{}",
                request.risk_level, request.customer_count_min, request.customer_count_max
            )],
        })
    }
}
