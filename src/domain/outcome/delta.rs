//! Predicted-vs-actual deltas and the effective outcome view.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DecisionId, Timestamp};
use crate::domain::scenario::ScenarioName;
use crate::domain::simulation::SimulationResult;

use super::{KpiKey, Outcome};

/// Classification of an actual measurement against its predicted range.
///
/// Bounds are inclusive: an actual exactly at a predicted bound is on track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonStatus {
    Below,
    OnTrack,
    Above,
}

impl ComparisonStatus {
    /// Classifies an actual value against a predicted range.
    pub fn classify(predicted_min: f64, predicted_max: f64, actual: f64) -> Self {
        if actual < predicted_min {
            ComparisonStatus::Below
        } else if actual > predicted_max {
            ComparisonStatus::Above
        } else {
            ComparisonStatus::OnTrack
        }
    }
}

/// One KPI's predicted range compared to its measured actual.
///
/// Derived on read from the outcome and the chosen scenario; never persisted
/// as input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDelta {
    pub kpi: KpiKey,
    pub predicted_min: f64,
    pub predicted_max: f64,
    pub actual: f64,
    pub status: ComparisonStatus,
}

/// Computes deltas for every KPI that has both sides.
///
/// KPIs missing a predicted range or an actual are omitted rather than
/// reported as a third "unknown" class.
pub fn compute_deltas(outcome: &Outcome) -> Vec<ScenarioDelta> {
    outcome
        .kpis
        .iter()
        .filter_map(|(kpi, entry)| {
            entry.actual.map(|actual| ScenarioDelta {
                kpi: *kpi,
                predicted_min: entry.predicted_min,
                predicted_max: entry.predicted_max,
                actual,
                status: ComparisonStatus::classify(
                    entry.predicted_min,
                    entry.predicted_max,
                    actual,
                ),
            })
        })
        .collect()
}

/// Predicted range for a KPI across all estimate levels of a projection.
///
/// The scenario's predicted window for a KPI is the envelope over its
/// three levels: the lowest floor to the highest ceiling.
pub fn predicted_envelope(projection: &SimulationResult, kpi: KpiKey) -> Option<(f64, f64)> {
    let mut min: Option<f64> = None;
    let mut max: Option<f64> = None;
    for level in projection.levels.values() {
        let (lo, hi) = match kpi {
            KpiKey::CustomerCount => (
                level.new_customer_count_min as f64,
                level.new_customer_count_max as f64,
            ),
            KpiKey::Mrr => (level.new_mrr_min, level.new_mrr_max),
            KpiKey::Arr => (level.new_arr_min, level.new_arr_max),
        };
        min = Some(min.map_or(lo, |m| m.min(lo)));
        max = Some(max.map_or(hi, |m| m.max(hi)));
    }
    Some((min?, max?))
}

/// Delta history for one decision, published to the learning collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeltaReport {
    pub decision_id: DecisionId,
    pub scenario: Option<ScenarioName>,
    pub deltas: Vec<ScenarioDelta>,
    pub generated_at: Timestamp,
}

/// Latest reconciled outcome plus computed deltas.
///
/// The only outcome query surface consumers should use; the raw record
/// history is for audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveOutcome {
    pub decision_id: DecisionId,
    pub chosen_scenario: Option<ScenarioName>,
    pub outcome: Option<Outcome>,
    pub deltas: Vec<ScenarioDelta>,
    pub as_of: Timestamp,
}
