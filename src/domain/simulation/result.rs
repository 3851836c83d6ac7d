//! Simulation inputs and projections.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::elasticity::{PricingGoal, ScenarioLevel};
use crate::domain::foundation::{Currency, ValidationError};

use super::RiskLevel;

/// Pricing inputs for one simulation run.
///
/// Also stored on the decision aggregate so verdicts and scenarios can be
/// regenerated from the same inputs later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationInput {
    pub current_price: f64,
    pub new_price: f64,
    pub active_customers: u64,
    pub currency: Currency,
    /// Monthly recurring revenue across the business. Zero means unknown;
    /// projections then fall back to `customers x price`.
    pub global_mrr: f64,
    /// Global churn rate as a fraction in `[0, 1]`.
    pub global_churn_rate: f64,
    pub goal: PricingGoal,
}

impl SimulationInput {
    /// Validates value ranges.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` for non-positive prices, zero customers, negative MRR,
    ///   or a churn rate outside `[0, 1]`
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.current_price <= 0.0 || !self.current_price.is_finite() {
            return Err(ValidationError::out_of_range(
                "current_price",
                f64::MIN_POSITIVE,
                f64::MAX,
                self.current_price,
            ));
        }
        if self.new_price <= 0.0 || !self.new_price.is_finite() {
            return Err(ValidationError::out_of_range(
                "new_price",
                f64::MIN_POSITIVE,
                f64::MAX,
                self.new_price,
            ));
        }
        if self.active_customers == 0 {
            return Err(ValidationError::out_of_range(
                "active_customers",
                1.0,
                f64::MAX,
                0.0,
            ));
        }
        if self.global_mrr < 0.0 || !self.global_mrr.is_finite() {
            return Err(ValidationError::out_of_range(
                "global_mrr",
                0.0,
                f64::MAX,
                self.global_mrr,
            ));
        }
        if !(0.0..=1.0).contains(&self.global_churn_rate) {
            return Err(ValidationError::out_of_range(
                "global_churn_rate",
                0.0,
                1.0,
                self.global_churn_rate,
            ));
        }
        Ok(())
    }

    /// Price change in percent of the current price.
    pub fn price_change_pct(&self) -> f64 {
        (self.new_price - self.current_price) / self.current_price * 100.0
    }

    /// Returns a copy of the input with a different goal.
    pub fn with_goal(&self, goal: PricingGoal) -> Self {
        Self {
            goal,
            ..self.clone()
        }
    }
}

/// Bounded projection for one estimate level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelProjection {
    pub new_customer_count_min: i64,
    pub new_customer_count_max: i64,
    pub new_mrr_min: f64,
    pub new_mrr_max: f64,
    pub new_arr_min: f64,
    pub new_arr_max: f64,
}

/// Deterministic, bounded elasticity projection for one price change.
///
/// Derived and immutable once computed for a given input tuple.
/// Recomputation always produces a fresh value, never an in-place patch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub current_price: f64,
    pub new_price: f64,
    pub price_change_pct: f64,
    pub currency: Currency,
    pub active_customers: u64,
    pub goal: PricingGoal,
    pub levels: BTreeMap<ScenarioLevel, LevelProjection>,
    pub risk_level: RiskLevel,
}

impl SimulationResult {
    /// Returns the projection for an estimate level.
    pub fn projection_for(&self, level: ScenarioLevel) -> Option<&LevelProjection> {
        self.levels.get(&level)
    }

    /// Current annual recurring revenue implied by the inputs.
    pub fn current_arr(&self) -> f64 {
        self.active_customers as f64 * self.current_price * 12.0
    }
}
