//! Built-in elasticity table.
//!
//! Shipped defaults used when no table file is configured. Loss/gain numbers
//! are percent of active customers; buckets are price-change percent with the
//! usual closed-open semantics and an open tail on the last bucket.

use once_cell::sync::Lazy;
use std::sync::Arc;

use super::config::{
    ChurnAdjustment, ElasticityConfig, GoalProfile, PriceChangeBucket, PricingGoal,
    RiskThresholds, ScenarioBand,
};

fn band(b: [f64; 4]) -> ScenarioBand {
    ScenarioBand::new(b[0], b[1], b[2], b[3])
}

fn profile(conservative: [f64; 4], base: [f64; 4], aggressive: [f64; 4]) -> GoalProfile {
    GoalProfile {
        conservative: band(conservative),
        base: band(base),
        aggressive: band(aggressive),
    }
}

fn bucket(
    min_pct: f64,
    max_pct: f64,
    conservative: GoalProfile,
    base: GoalProfile,
    aggressive: GoalProfile,
) -> PriceChangeBucket {
    PriceChangeBucket::new(min_pct, max_pct)
        .with_profile(PricingGoal::Conservative, conservative)
        .with_profile(PricingGoal::Base, base)
        .with_profile(PricingGoal::Aggressive, aggressive)
}

impl ElasticityConfig {
    /// Builds the shipped default table.
    ///
    /// Band arrays are `[loss_min, loss_max, gain_min, gain_max]`.
    pub fn default_table() -> Self {
        let buckets = vec![
            // Deep price cut: churn risk near zero, acquisition upside high.
            bucket(
                -100.0,
                -15.0,
                profile(
                    [0.0, 1.0, 4.0, 9.0],
                    [0.0, 0.5, 6.0, 12.0],
                    [0.0, 0.5, 8.0, 16.0],
                ),
                profile(
                    [0.0, 1.0, 5.0, 11.0],
                    [0.0, 0.5, 8.0, 15.0],
                    [0.0, 0.5, 10.0, 20.0],
                ),
                profile(
                    [0.0, 1.5, 6.0, 13.0],
                    [0.0, 1.0, 9.0, 18.0],
                    [0.0, 0.5, 12.0, 24.0],
                ),
            ),
            // Modest cut.
            bucket(
                -15.0,
                0.0,
                profile(
                    [0.0, 0.5, 1.0, 3.0],
                    [0.0, 0.5, 2.0, 4.5],
                    [0.0, 0.5, 3.0, 6.0],
                ),
                profile(
                    [0.0, 0.5, 1.5, 4.0],
                    [0.0, 0.5, 2.5, 6.0],
                    [0.0, 0.5, 3.5, 8.0],
                ),
                profile(
                    [0.0, 1.0, 2.0, 5.0],
                    [0.0, 0.5, 3.0, 7.5],
                    [0.0, 0.5, 4.5, 10.0],
                ),
            ),
            // Rounding-noise increase.
            bucket(
                0.0,
                5.0,
                profile(
                    [0.5, 2.0, 0.0, 0.5],
                    [0.5, 1.5, 0.0, 0.5],
                    [0.0, 1.0, 0.0, 1.0],
                ),
                profile(
                    [1.0, 2.5, 0.0, 0.5],
                    [0.5, 2.0, 0.0, 0.5],
                    [0.5, 1.5, 0.0, 1.0],
                ),
                profile(
                    [1.0, 3.0, 0.0, 0.5],
                    [1.0, 2.5, 0.0, 0.5],
                    [0.5, 2.0, 0.0, 1.0],
                ),
            ),
            // Noticeable increase.
            bucket(
                5.0,
                12.0,
                profile(
                    [1.5, 4.5, 0.0, 0.5],
                    [1.0, 3.5, 0.0, 0.5],
                    [0.5, 2.5, 0.0, 1.0],
                ),
                profile(
                    [2.0, 5.5, 0.0, 0.5],
                    [1.5, 4.5, 0.0, 0.5],
                    [1.0, 3.5, 0.0, 1.0],
                ),
                profile(
                    [2.5, 7.0, 0.0, 0.5],
                    [2.0, 5.5, 0.0, 0.5],
                    [1.5, 4.5, 0.0, 1.0],
                ),
            ),
            // Material increase.
            bucket(
                12.0,
                20.0,
                profile(
                    [3.0, 8.0, 0.0, 0.5],
                    [2.5, 6.5, 0.0, 0.5],
                    [2.0, 5.0, 0.0, 0.5],
                ),
                profile(
                    [4.0, 9.5, 0.0, 0.5],
                    [3.0, 8.0, 0.0, 0.5],
                    [2.5, 6.5, 0.0, 0.5],
                ),
                profile(
                    [5.0, 11.0, 0.0, 0.5],
                    [4.0, 9.5, 0.0, 0.5],
                    [3.0, 8.0, 0.0, 0.5],
                ),
            ),
            // Aggressive repricing.
            bucket(
                20.0,
                30.0,
                profile(
                    [5.0, 11.0, 0.0, 0.5],
                    [4.0, 9.0, 0.0, 0.5],
                    [3.0, 7.0, 0.0, 0.5],
                ),
                profile(
                    [6.0, 13.0, 0.0, 0.5],
                    [5.0, 11.0, 0.0, 0.5],
                    [4.0, 9.0, 0.0, 0.5],
                ),
                profile(
                    [7.5, 15.0, 0.0, 0.5],
                    [6.0, 13.0, 0.0, 0.5],
                    [5.0, 11.0, 0.0, 0.5],
                ),
            ),
            // Step-change repricing; open tail catches anything beyond 50%.
            bucket(
                30.0,
                50.0,
                profile(
                    [9.0, 18.0, 0.0, 0.0],
                    [7.5, 15.0, 0.0, 0.0],
                    [6.0, 12.0, 0.0, 0.0],
                ),
                profile(
                    [11.0, 21.0, 0.0, 0.0],
                    [9.0, 18.0, 0.0, 0.0],
                    [7.5, 15.0, 0.0, 0.0],
                ),
                profile(
                    [13.0, 25.0, 0.0, 0.0],
                    [11.0, 21.0, 0.0, 0.0],
                    [9.0, 18.0, 0.0, 0.0],
                ),
            ),
        ];

        ElasticityConfig {
            buckets,
            churn: ChurnAdjustment {
                high_threshold: 0.08,
                high_multiplier: 1.35,
                low_threshold: 0.02,
                low_multiplier: 0.85,
            },
            risk: RiskThresholds {
                low_max: 10.0,
                medium_max: 25.0,
            },
        }
    }

    /// Returns the process-wide shared default table.
    pub fn shared_default() -> Arc<ElasticityConfig> {
        static DEFAULT: Lazy<Arc<ElasticityConfig>> =
            Lazy::new(|| Arc::new(ElasticityConfig::default_table()));
        Arc::clone(&DEFAULT)
    }
}
