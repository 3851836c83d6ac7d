//! Deterministic elasticity simulation.
//!
//! The engine owns no state beyond the injected elasticity table. Every
//! operation is a pure function of its inputs and that table.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::elasticity::{
    ElasticityConfig, PriceChangeBucket, PricingGoal, ScenarioBand, ScenarioLevel,
};
use crate::domain::foundation::DomainError;

use super::{LevelProjection, RiskLevel, SimulationInput, SimulationResult};

/// Simulation engine over an immutable elasticity table.
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    config: Arc<ElasticityConfig>,
}

impl SimulationEngine {
    /// Creates an engine over the given table.
    pub fn new(config: Arc<ElasticityConfig>) -> Self {
        Self { config }
    }

    /// Returns the elasticity table in use.
    pub fn config(&self) -> &ElasticityConfig {
        &self.config
    }

    /// Finds the bucket for a price-change percentage.
    ///
    /// Buckets are checked in ascending order with closed-open ranges
    /// (`min <= pct < max`). A change at or beyond the last bucket's max
    /// still matches the last bucket (open upper tail). Only a change below
    /// the first bucket's min has no match.
    pub fn find_bucket(&self, pct: f64) -> Option<&PriceChangeBucket> {
        for bucket in &self.config.buckets {
            if bucket.contains(pct) {
                return Some(bucket);
            }
        }
        match self.config.buckets.last() {
            Some(last) if pct >= last.min_pct => Some(last),
            _ => None,
        }
    }

    /// Returns the churn band multiplier for a global churn rate.
    ///
    /// Flat between the thresholds (no interpolation) - a simplification
    /// carried over from the original table, not a bug.
    pub fn churn_multiplier(&self, global_churn_rate: f64) -> f64 {
        let churn = &self.config.churn;
        if global_churn_rate >= churn.high_threshold {
            churn.high_multiplier
        } else if global_churn_rate <= churn.low_threshold {
            churn.low_multiplier
        } else {
            1.0
        }
    }

    /// Derives the risk level for an absolute price change under a goal.
    ///
    /// Base banding comes from the configured thresholds; the goal then
    /// adjusts it: conservative softens high to medium (never further),
    /// aggressive hardens low to medium and anything else to high, base
    /// passes through unchanged.
    pub fn derive_risk_level(&self, abs_price_change_pct: f64, goal: PricingGoal) -> RiskLevel {
        let risk = &self.config.risk;
        let base = if abs_price_change_pct <= risk.low_max {
            RiskLevel::Low
        } else if abs_price_change_pct <= risk.medium_max {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        };

        match goal {
            PricingGoal::Base => base,
            PricingGoal::Conservative => match base {
                RiskLevel::High => RiskLevel::Medium,
                other => other,
            },
            PricingGoal::Aggressive => match base {
                RiskLevel::Low => RiskLevel::Medium,
                _ => RiskLevel::High,
            },
        }
    }

    /// Runs one simulation, producing bounded per-level projections.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` and friends for invalid input values
    /// - `Configuration` when no bucket matches or the goal profile is
    ///   missing; with a correctly configured open-ended table this signals
    ///   a fatal misconfiguration, not a user error
    pub fn simulate(&self, input: &SimulationInput) -> Result<SimulationResult, DomainError> {
        input.validate()?;

        let pct = input.price_change_pct();
        let bucket = self.find_bucket(pct).ok_or_else(|| {
            DomainError::configuration(format!(
                "No elasticity bucket matches a {:.1}% price change",
                pct
            ))
        })?;
        let profile = bucket.profile_for(input.goal).ok_or_else(|| {
            DomainError::configuration(format!(
                "Elasticity bucket [{}, {}) has no {} profile",
                bucket.min_pct, bucket.max_pct, input.goal
            ))
        })?;

        let multiplier = self.churn_multiplier(input.global_churn_rate);

        let mut levels = BTreeMap::new();
        for level in ScenarioLevel::ALL {
            let band = profile.band_for(level);
            levels.insert(level, self.project(input, band, multiplier));
        }

        Ok(SimulationResult {
            current_price: input.current_price,
            new_price: input.new_price,
            price_change_pct: pct,
            currency: input.currency.clone(),
            active_customers: input.active_customers,
            goal: input.goal,
            levels,
            risk_level: self.derive_risk_level(pct.abs(), input.goal),
        })
    }

    /// Applies one churn-adjusted band to the business metrics.
    fn project(
        &self,
        input: &SimulationInput,
        band: &ScenarioBand,
        multiplier: f64,
    ) -> LevelProjection {
        let loss_min = (band.customer_loss_min * multiplier).min(100.0);
        let loss_max = (band.customer_loss_max * multiplier).min(100.0);
        let gain_min = band.customer_gain_min * multiplier;
        let gain_max = band.customer_gain_max * multiplier;

        let customers = input.active_customers as f64;
        // Worst case pairs the heaviest loss with the lightest gain.
        let count_min = (customers * (1.0 - loss_max / 100.0 + gain_min / 100.0))
            .round()
            .max(0.0) as i64;
        let count_max = (customers * (1.0 - loss_min / 100.0 + gain_max / 100.0))
            .round()
            .max(0.0) as i64;

        let mrr_min = self.monthly_revenue(input, count_min as f64);
        let mrr_max = self.monthly_revenue(input, count_max as f64);

        LevelProjection {
            new_customer_count_min: count_min,
            new_customer_count_max: count_max,
            new_mrr_min: mrr_min,
            new_mrr_max: mrr_max,
            new_arr_min: mrr_min * 12.0,
            new_arr_max: mrr_max * 12.0,
        }
    }

    /// Projects MRR for a post-change customer count.
    ///
    /// When the business-wide MRR is known it is scaled by the customer and
    /// price ratios; otherwise fall back to `customers x new price`.
    fn monthly_revenue(&self, input: &SimulationInput, customers_after: f64) -> f64 {
        if input.global_mrr > 0.0 {
            input.global_mrr * (customers_after / input.active_customers as f64)
                * (input.new_price / input.current_price)
        } else {
            customers_after * input.new_price
        }
    }
}
