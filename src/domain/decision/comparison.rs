//! Side-by-side comparison view across decisions.
//!
//! Read-only projection of each decision's current context and verdict.
//! Labels shown here are derived from the scores at build time.

use serde::Serialize;

use crate::domain::foundation::{DecisionId, Score, Timestamp};
use crate::domain::scenario::ScenarioName;

use super::{ConfidenceLabel, Decision, DecisionStatus, RiskLabel};

/// Comparison view for multiple decisions.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonView {
    pub decisions: Vec<ComparisonItem>,
    pub generated_at: Timestamp,
}

/// One decision's current state for side-by-side display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonItem {
    pub decision_id: DecisionId,
    pub company_name: String,
    pub status: DecisionStatus,
    pub price_change_pct: f64,
    pub context_version: u32,
    pub resolved_context_fields: usize,
    pub verdict_version: u32,
    pub headline: String,
    pub confidence_score: Score,
    pub confidence_label: ConfidenceLabel,
    pub risk_label: RiskLabel,
    pub chosen_scenario: Option<ScenarioName>,
}

impl ComparisonView {
    /// Builds the view from loaded decisions.
    pub fn build(decisions: &[Decision]) -> Self {
        let items = decisions
            .iter()
            .map(|d| ComparisonItem {
                decision_id: *d.id(),
                company_name: d.company_name().to_string(),
                status: d.status(),
                price_change_pct: d.pricing().price_change_pct(),
                context_version: d.context_version(),
                resolved_context_fields: d.context().resolved_count(),
                verdict_version: d.verdict_version(),
                headline: d.verdict().headline.clone(),
                confidence_score: d.verdict().confidence_score,
                confidence_label: d.verdict().confidence_label(),
                risk_label: d.verdict().risk_label(),
                chosen_scenario: d.chosen_scenario().map(|s| s.name.clone()),
            })
            .collect();
        Self {
            decisions: items,
            generated_at: Timestamp::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decision::{
        DecisionContext, ModelMeta, RiskOutlook, SupportingDetails, Verdict,
    };
    use crate::domain::elasticity::PricingGoal;
    use crate::domain::foundation::{Currency, UserId};
    use crate::domain::simulation::SimulationInput;

    fn sample_decision(company: &str, confidence: f64) -> Decision {
        let verdict = Verdict::new(
            format!("Reprice {}", company),
            "summary".to_string(),
            Score::new(confidence),
            "cta".to_string(),
            vec![],
            RiskOutlook {
                risk_score: Score::new(0.5),
                description: "desc".to_string(),
            },
            SupportingDetails {
                expected_revenue_impact: String::new(),
                churn_outlook: String::new(),
                market_positioning: String::new(),
            },
        )
        .unwrap();
        Decision::new(
            crate::domain::foundation::DecisionId::new(),
            UserId::new("owner@test").unwrap(),
            company.to_string(),
            None,
            SimulationInput {
                current_price: 79.0,
                new_price: 99.0,
                active_customers: 423,
                currency: Currency::usd(),
                global_mrr: 0.0,
                global_churn_rate: 0.04,
                goal: PricingGoal::Base,
            },
            DecisionContext::empty(),
            "initial",
            verdict,
            ModelMeta {
                model: "verdict-v2".to_string(),
                prompt_version: "2025-05".to_string(),
                inference_ms: 100,
            },
        )
        .unwrap()
    }

    #[test]
    fn build_produces_one_item_per_decision() {
        let decisions = vec![sample_decision("Acme", 0.8), sample_decision("Globex", 0.3)];
        let view = ComparisonView::build(&decisions);
        assert_eq!(view.decisions.len(), 2);
    }

    #[test]
    fn labels_are_derived_from_scores_at_build_time() {
        let decisions = vec![sample_decision("Acme", 0.8), sample_decision("Globex", 0.3)];
        let view = ComparisonView::build(&decisions);
        assert_eq!(view.decisions[0].confidence_label, ConfidenceLabel::High);
        assert_eq!(view.decisions[1].confidence_label, ConfidenceLabel::Low);
    }

    #[test]
    fn view_serializes_camel_case() {
        let view = ComparisonView::build(&[sample_decision("Acme", 0.5)]);
        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains("priceChangePct"));
        assert!(json.contains("confidenceLabel"));
    }
}
