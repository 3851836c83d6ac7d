//! Elasticity configuration types.
//!
//! The elasticity table is static, versionable data: ordered price-change
//! buckets mapping to per-goal scenario bands, plus churn and risk
//! thresholds. It is loaded once, validated, and injected into the
//! simulation engine as an immutable dependency (never a singleton).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::foundation::DomainError;

/// Strategic pricing posture used to select elasticity bands.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PricingGoal {
    Conservative,
    Base,
    Aggressive,
}

impl PricingGoal {
    /// The three canonical goals, in presentation order.
    pub const ALL: [PricingGoal; 3] = [
        PricingGoal::Conservative,
        PricingGoal::Base,
        PricingGoal::Aggressive,
    ];

    /// Returns the display label for this goal.
    pub fn label(&self) -> &'static str {
        match self {
            PricingGoal::Conservative => "Conservative",
            PricingGoal::Base => "Base",
            PricingGoal::Aggressive => "Aggressive",
        }
    }
}

impl fmt::Display for PricingGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Estimate level within a goal's profile.
///
/// Distinct from [`PricingGoal`]: the goal is the strategic posture, the
/// level is how cautious or optimistic the projection inside that posture is.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioLevel {
    Conservative,
    Base,
    Aggressive,
}

impl ScenarioLevel {
    /// The three levels, in presentation order.
    pub const ALL: [ScenarioLevel; 3] = [
        ScenarioLevel::Conservative,
        ScenarioLevel::Base,
        ScenarioLevel::Aggressive,
    ];

    /// Returns the display label for this level.
    pub fn label(&self) -> &'static str {
        match self {
            ScenarioLevel::Conservative => "Conservative",
            ScenarioLevel::Base => "Base",
            ScenarioLevel::Aggressive => "Aggressive",
        }
    }
}

impl fmt::Display for ScenarioLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Customer movement band, in percent of active customers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioBand {
    pub customer_loss_min: f64,
    pub customer_loss_max: f64,
    pub customer_gain_min: f64,
    pub customer_gain_max: f64,
}

impl ScenarioBand {
    /// Creates a band from loss and gain ranges (percent).
    pub fn new(loss_min: f64, loss_max: f64, gain_min: f64, gain_max: f64) -> Self {
        Self {
            customer_loss_min: loss_min,
            customer_loss_max: loss_max,
            customer_gain_min: gain_min,
            customer_gain_max: gain_max,
        }
    }

    fn is_well_formed(&self) -> bool {
        let ordered = self.customer_loss_min <= self.customer_loss_max
            && self.customer_gain_min <= self.customer_gain_max;
        let non_negative = self.customer_loss_min >= 0.0 && self.customer_gain_min >= 0.0;
        ordered && non_negative
    }
}

/// Scenario bands for one pricing goal, per estimate level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalProfile {
    pub conservative: ScenarioBand,
    pub base: ScenarioBand,
    pub aggressive: ScenarioBand,
}

impl GoalProfile {
    /// Returns the band for an estimate level.
    pub fn band_for(&self, level: ScenarioLevel) -> &ScenarioBand {
        match level {
            ScenarioLevel::Conservative => &self.conservative,
            ScenarioLevel::Base => &self.base,
            ScenarioLevel::Aggressive => &self.aggressive,
        }
    }

    fn is_well_formed(&self) -> bool {
        self.conservative.is_well_formed()
            && self.base.is_well_formed()
            && self.aggressive.is_well_formed()
    }
}

/// One price-change-percentage range in the elasticity table.
///
/// Matching is closed-open: `min_pct <= pct < max_pct`. The last bucket in
/// the table additionally has an open upper bound: any change at or beyond
/// its `max_pct` still matches it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceChangeBucket {
    pub min_pct: f64,
    pub max_pct: f64,
    pub profiles: BTreeMap<PricingGoal, GoalProfile>,
}

impl PriceChangeBucket {
    /// Creates a bucket covering `[min_pct, max_pct)`.
    pub fn new(min_pct: f64, max_pct: f64) -> Self {
        Self {
            min_pct,
            max_pct,
            profiles: BTreeMap::new(),
        }
    }

    /// Adds the profile for a goal.
    pub fn with_profile(mut self, goal: PricingGoal, profile: GoalProfile) -> Self {
        self.profiles.insert(goal, profile);
        self
    }

    /// Closed-open range check (the open tail is handled by the table scan).
    pub fn contains(&self, pct: f64) -> bool {
        self.min_pct <= pct && pct < self.max_pct
    }

    /// Returns the profile for a goal, if configured.
    pub fn profile_for(&self, goal: PricingGoal) -> Option<&GoalProfile> {
        self.profiles.get(&goal)
    }
}

/// Churn-rate adjustment applied to scenario bands.
///
/// The multiplier is flat between the thresholds (no interpolation). That is
/// intentional per the original table's notes; introducing interpolation is a
/// behavior change requiring product sign-off.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChurnAdjustment {
    /// Churn rate (fraction) at or above which the high multiplier applies.
    pub high_threshold: f64,
    pub high_multiplier: f64,
    /// Churn rate (fraction) at or below which the low multiplier applies.
    pub low_threshold: f64,
    pub low_multiplier: f64,
}

/// Absolute price-change thresholds for risk banding, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    /// Changes at or below this magnitude are low risk.
    pub low_max: f64,
    /// Changes at or below this magnitude (and above `low_max`) are medium risk.
    pub medium_max: f64,
}

/// The full elasticity table. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElasticityConfig {
    pub buckets: Vec<PriceChangeBucket>,
    pub churn: ChurnAdjustment,
    pub risk: RiskThresholds,
}

impl ElasticityConfig {
    /// Validates the table shape.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if:
    /// - the table has no buckets
    /// - any bucket range is empty or buckets are not ascending and disjoint
    /// - any bucket is missing a goal profile or has a malformed band
    /// - churn thresholds/multipliers or risk thresholds are inconsistent
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.buckets.is_empty() {
            return Err(DomainError::configuration(
                "Elasticity table must define at least one bucket",
            ));
        }

        for (i, bucket) in self.buckets.iter().enumerate() {
            if bucket.min_pct >= bucket.max_pct {
                return Err(DomainError::configuration(format!(
                    "Bucket {} has empty range [{}, {})",
                    i, bucket.min_pct, bucket.max_pct
                )));
            }
            if let Some(prev) = i.checked_sub(1).map(|p| &self.buckets[p]) {
                if bucket.min_pct < prev.max_pct {
                    return Err(DomainError::configuration(format!(
                        "Bucket {} overlaps or is out of order at {}",
                        i, bucket.min_pct
                    )));
                }
            }
            for goal in PricingGoal::ALL {
                match bucket.profile_for(goal) {
                    None => {
                        return Err(DomainError::configuration(format!(
                            "Bucket {} is missing the {} goal profile",
                            i, goal
                        )));
                    }
                    Some(profile) if !profile.is_well_formed() => {
                        return Err(DomainError::configuration(format!(
                            "Bucket {} has a malformed band for the {} goal",
                            i, goal
                        )));
                    }
                    Some(_) => {}
                }
            }
        }

        if self.churn.low_threshold > self.churn.high_threshold {
            return Err(DomainError::configuration(
                "Churn low threshold exceeds high threshold",
            ));
        }
        if self.churn.low_multiplier <= 0.0 || self.churn.high_multiplier <= 0.0 {
            return Err(DomainError::configuration(
                "Churn multipliers must be positive",
            ));
        }
        if self.risk.low_max <= 0.0 || self.risk.medium_max <= self.risk.low_max {
            return Err(DomainError::configuration(
                "Risk thresholds must satisfy 0 < low_max < medium_max",
            ));
        }

        Ok(())
    }

    /// Returns the lowest covered price-change percentage.
    pub fn floor_pct(&self) -> Option<f64> {
        self.buckets.first().map(|b| b.min_pct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_band() -> ScenarioBand {
        ScenarioBand::new(1.0, 2.0, 0.0, 0.5)
    }

    fn flat_profile() -> GoalProfile {
        GoalProfile {
            conservative: flat_band(),
            base: flat_band(),
            aggressive: flat_band(),
        }
    }

    fn bucket(min: f64, max: f64) -> PriceChangeBucket {
        let mut b = PriceChangeBucket::new(min, max);
        for goal in PricingGoal::ALL {
            b = b.with_profile(goal, flat_profile());
        }
        b
    }

    fn config_with(buckets: Vec<PriceChangeBucket>) -> ElasticityConfig {
        ElasticityConfig {
            buckets,
            churn: ChurnAdjustment {
                high_threshold: 0.08,
                high_multiplier: 1.3,
                low_threshold: 0.02,
                low_multiplier: 0.8,
            },
            risk: RiskThresholds {
                low_max: 10.0,
                medium_max: 25.0,
            },
        }
    }

    #[test]
    fn validate_accepts_well_formed_table() {
        let config = config_with(vec![bucket(-100.0, 0.0), bucket(0.0, 20.0)]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_table() {
        let config = config_with(vec![]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_bucket_range() {
        let config = config_with(vec![bucket(5.0, 5.0)]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_overlapping_buckets() {
        let config = config_with(vec![bucket(0.0, 10.0), bucket(5.0, 20.0)]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_missing_goal_profile() {
        let b = PriceChangeBucket::new(0.0, 10.0)
            .with_profile(PricingGoal::Base, flat_profile());
        let config = config_with(vec![b]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_inverted_risk_thresholds() {
        let mut config = config_with(vec![bucket(0.0, 10.0)]);
        config.risk = RiskThresholds {
            low_max: 25.0,
            medium_max: 10.0,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn bucket_contains_is_closed_open() {
        let b = bucket(10.0, 20.0);
        assert!(b.contains(10.0));
        assert!(b.contains(19.999));
        assert!(!b.contains(20.0));
        assert!(!b.contains(9.999));
    }

    #[test]
    fn goal_serializes_snake_case() {
        let json = serde_json::to_string(&PricingGoal::Aggressive).unwrap();
        assert_eq!(json, "\"aggressive\"");
    }

    #[test]
    fn config_roundtrips_through_yaml() {
        let config = config_with(vec![bucket(-100.0, 0.0), bucket(0.0, 20.0)]);
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: ElasticityConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }
}
